//! Head-to-head comparison of two pool entries.

use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, Scores};
use crate::error::{MadnessError, Result};
use crate::pool::{PoolEntry, Superlatives};

const TIE_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DuelSide {
    Left,
    Right,
    Tie,
}

impl DuelSide {
    fn compare(left: f64, right: f64) -> DuelSide {
        if (left - right).abs() < TIE_EPSILON {
            DuelSide::Tie
        } else if left > right {
            DuelSide::Left
        } else {
            DuelSide::Right
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Chaos,
    Brand,
    Survive,
    Danger,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Chaos, Axis::Brand, Axis::Survive, Axis::Danger];

    pub fn value(&self, scores: &Scores) -> f64 {
        match self {
            Axis::Chaos => scores.chaos_addiction,
            Axis::Brand => scores.brand_bias,
            Axis::Survive => 1.0 - scores.collapse_risk,
            Axis::Danger => scores.overconfidence * (1.0 + scores.chaos_addiction),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisResult {
    pub axis: Axis,
    pub left: f64,
    pub right: f64,
    pub winner: DuelSide,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    pub seed: u64,
    pub archetype: Archetype,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Duel {
    pub left: Contender,
    pub right: Contender,
    pub axes: Vec<AxisResult>,
    pub left_wins: usize,
    pub right_wins: usize,
    pub verdict: DuelSide,
}

impl Duel {
    /// Seed of the overall winner, `None` on a tie.
    pub fn winner_seed(&self) -> Option<u64> {
        match self.verdict {
            DuelSide::Left => Some(self.left.seed),
            DuelSide::Right => Some(self.right.seed),
            DuelSide::Tie => None,
        }
    }
}

/// Compare two entries on chaos, brand, survival and danger.
///
/// # Arguments
/// * `left` - Entry shown on the left
/// * `right` - Entry shown on the right
///
/// # Returns
/// Per-axis winners (ties within 1e-9) and the verdict by axis wins
pub fn duel(left: &PoolEntry, right: &PoolEntry) -> Duel {
    let axes: Vec<AxisResult> = Axis::ALL
        .iter()
        .map(|&axis| {
            let l = axis.value(&left.scores);
            let r = axis.value(&right.scores);
            AxisResult {
                axis,
                left: l,
                right: r,
                winner: DuelSide::compare(l, r),
            }
        })
        .collect();

    let left_wins = axes.iter().filter(|a| a.winner == DuelSide::Left).count();
    let right_wins = axes.iter().filter(|a| a.winner == DuelSide::Right).count();
    let verdict = DuelSide::compare(left_wins as f64, right_wins as f64);

    Duel {
        left: Contender {
            seed: left.seed,
            archetype: left.archetype,
        },
        right: Contender {
            seed: right.seed,
            archetype: right.archetype,
        },
        axes,
        left_wins,
        right_wins,
        verdict,
    }
}

/// Safest-but-dead on the left, most brand-loyal on the right.
pub fn featured_duel(entries: &[PoolEntry], superlatives: &Superlatives) -> Result<Duel> {
    let find = |seed: u64| {
        entries
            .iter()
            .find(|e| e.seed == seed)
            .ok_or(MadnessError::EmptyPool)
    };
    let left = find(superlatives.safest_but_dead.seed)?;
    let right = find(superlatives.most_brand.seed)?;
    Ok(duel(left, right))
}
