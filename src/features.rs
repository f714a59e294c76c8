//! Behavioral signals read straight from the structure of a pick-set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bracket::Bracket;
use crate::constants::clamp01;
use crate::error::{MadnessError, Result};
use crate::game::OutcomeTag;

/// Four pick-derived signals plus tag frequencies across the bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSignals {
    pub chaos_addiction: f64,
    pub brand_bias: f64,
    pub narrative_bias: f64,
    pub overconfidence: f64,
    pub tag_counts: BTreeMap<OutcomeTag, usize>,
}

impl BehaviorSignals {
    pub fn tag_count(&self, tag: OutcomeTag) -> usize {
        self.tag_counts.get(&tag).copied().unwrap_or(0)
    }
}

/// Overconfidence when the picker never backed a seed favorite
pub const DEFAULT_OVERCONFIDENCE: f64 = 0.45;

const CHAOS_ADDICTION_SCALE: f64 = 1.35;

/// Extract signals from every resolved game. Fails on a bracket with none.
pub fn extract_features(bracket: &Bracket) -> Result<BehaviorSignals> {
    let mut upset_weights = Vec::new();
    let mut brand_pulls = Vec::new();
    let mut narrative_pulls = Vec::new();
    let mut favorite_confidence = Vec::new();
    let mut tag_counts: BTreeMap<OutcomeTag, usize> = BTreeMap::new();

    for game in bracket.played() {
        let (Some(winner), Some(loser)) = (game.winner(), game.loser()) else {
            continue;
        };
        let gap = f64::from(game.team_a.seed_gap(&game.team_b));

        // later upsets are bolder
        let round_w = 0.65 + f64::from(game.round()) * 0.10;
        let is_upset = winner.seed > loser.seed;
        upset_weights.push(if is_upset {
            clamp01(gap / 15.0 * round_w)
        } else {
            0.0
        });

        // brand and hype pulls net of what momentum would justify
        let momentum_pull = winner.momentum - loser.momentum;
        let brand_pull = winner.brand_code - loser.brand_code;
        brand_pulls.push(clamp01(0.5 + (brand_pull - 0.5 * momentum_pull)));

        let hype_pull = winner.hype - loser.hype;
        narrative_pulls.push(clamp01(0.5 + (hype_pull - 0.6 * momentum_pull)));

        if winner.seed < loser.seed {
            favorite_confidence.push(clamp01(0.55 + gap / 18.0 - winner.chaos * 0.25));
        }

        for &tag in game.tags() {
            *tag_counts.entry(tag).or_insert(0) += 1;
        }
    }

    if upset_weights.is_empty() {
        return Err(MadnessError::UnplayedBracket);
    }

    let overconfidence = if favorite_confidence.is_empty() {
        DEFAULT_OVERCONFIDENCE
    } else {
        clamp01(mean(&favorite_confidence))
    };

    Ok(BehaviorSignals {
        chaos_addiction: clamp01(mean(&upset_weights) * CHAOS_ADDICTION_SCALE),
        brand_bias: clamp01(mean(&brand_pulls)),
        narrative_bias: clamp01(mean(&narrative_pulls)),
        overconfidence,
        tag_counts,
    })
}

/// Mean of `values`, 0 when empty.
pub fn mean(values: &[f64]) -> f64 {
    use statrs::statistics::Statistics;

    if values.is_empty() {
        0.0
    } else {
        values.iter().mean()
    }
}
