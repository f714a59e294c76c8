use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{BIG_UPSET_GAP, CHOKE_MIN_ROUND, CHOKE_PRESSURE};
use crate::persona::PickerProfile;
use crate::team::Team;
use crate::win_prob::{favorite_is_a, win_probability, Mode};

/// Explanation attached to a decided game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTag {
    Favorite,
    Upset,
    Momentum,
    Hype,
    Brand,
    Choke,
    BigUpset,
}

impl OutcomeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeTag::Favorite => "favorite",
            OutcomeTag::Upset => "upset",
            OutcomeTag::Momentum => "momentum",
            OutcomeTag::Hype => "hype",
            OutcomeTag::Brand => "brand",
            OutcomeTag::Choke => "choke",
            OutcomeTag::BigUpset => "big_upset",
        }
    }
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Result of one decided game.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub winner: Side,
    pub tags: Vec<OutcomeTag>,
}

/// Monte Carlo game simulation without tags.
///
/// Consumes exactly two uniform draws from `rng`: the chaos noise,
/// then the winner roll.
pub fn play<R: Rng + ?Sized>(
    team_a: &Team,
    team_b: &Team,
    rng: &mut R,
    round: u8,
    mode: Mode,
    profile: Option<&PickerProfile>,
) -> Side {
    let noise = rng.gen::<f64>() * 2.0 - 1.0;
    let prob = win_probability(team_a, team_b, round, mode, profile, noise);
    if rng.gen::<f64>() < prob {
        Side::A
    } else {
        Side::B
    }
}

/// Decide a game and explain the result.
pub fn decide<R: Rng + ?Sized>(
    team_a: &Team,
    team_b: &Team,
    rng: &mut R,
    round: u8,
    mode: Mode,
    profile: Option<&PickerProfile>,
) -> Decision {
    let winner = play(team_a, team_b, rng, round, mode, profile);
    Decision {
        winner,
        tags: outcome_tags(team_a, team_b, winner, round),
    }
}

/// Explanatory tags for a decided game. Not used for scoring except
/// for the `big_upset` and `choke` counts behind reason strings.
pub fn outcome_tags(team_a: &Team, team_b: &Team, winner: Side, round: u8) -> Vec<OutcomeTag> {
    let (won, lost) = match winner {
        Side::A => (team_a, team_b),
        Side::B => (team_b, team_a),
    };
    let favorite = if favorite_is_a(team_a, team_b) {
        Side::A
    } else {
        Side::B
    };

    let mut tags = Vec::with_capacity(4);
    tags.push(if winner == favorite {
        OutcomeTag::Favorite
    } else {
        OutcomeTag::Upset
    });
    tags.push(dominant_factor(won));

    if lost.pressure > CHOKE_PRESSURE && round >= CHOKE_MIN_ROUND {
        tags.push(OutcomeTag::Choke);
    }
    if winner != favorite && team_a.seed_gap(team_b) >= BIG_UPSET_GAP {
        tags.push(OutcomeTag::BigUpset);
    }
    tags
}

/// Largest of momentum, hype and brand; ties keep that order.
fn dominant_factor(team: &Team) -> OutcomeTag {
    let mut best = (OutcomeTag::Momentum, team.momentum);
    for candidate in [
        (OutcomeTag::Hype, team.hype),
        (OutcomeTag::Brand, team.brand_code),
    ] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::fixtures::team;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_decide_deterministic() {
        let a = team("a", 3, 0.6);
        let b = team("b", 14, 0.4);
        let profile = PickerProfile {
            contrarian: 0.9,
            ..PickerProfile::NEUTRAL
        };
        for seed in 0..50u64 {
            let mut r1 = ChaCha8Rng::seed_from_u64(seed);
            let mut r2 = ChaCha8Rng::seed_from_u64(seed);
            let d1 = decide(&a, &b, &mut r1, 1, Mode::Pick, Some(&profile));
            let d2 = decide(&a, &b, &mut r2, 1, Mode::Pick, Some(&profile));
            assert_eq!(d1, d2);
        }
    }

    #[test]
    fn test_play_consumes_two_draws() {
        let a = team("a", 1, 0.5);
        let b = team("b", 16, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut reference = ChaCha8Rng::seed_from_u64(9);
        play(&a, &b, &mut rng, 1, Mode::Reality, None);
        let _: f64 = reference.gen();
        let _: f64 = reference.gen();
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_one_seed_beats_sixteen_without_chaos() {
        let one = Team {
            chaos: 0.0,
            ..team("a", 1, 0.5)
        };
        let sixteen = Team {
            chaos: 0.0,
            ..team("b", 16, 0.5)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let wins = (0..4000)
            .filter(|_| play(&one, &sixteen, &mut rng, 1, Mode::Reality, None) == Side::A)
            .count();
        // p = logistic(0.42) ~ 0.603
        assert!(wins > 2200, "seed 1 won only {} of 4000", wins);
        assert!(wins < 2650);
    }

    #[test]
    fn test_tags_favorite_win() {
        let fav = Team {
            momentum: 0.9,
            hype: 0.2,
            brand_code: 0.1,
            ..team("a", 2, 0.5)
        };
        let dog = team("b", 15, 0.5);
        assert_eq!(
            outcome_tags(&fav, &dog, Side::A, 1),
            vec![OutcomeTag::Favorite, OutcomeTag::Momentum]
        );
    }

    #[test]
    fn test_tags_big_upset_and_choke() {
        let fav = Team {
            pressure: 0.9,
            ..team("a", 3, 0.5)
        };
        let dog = Team {
            brand_code: 0.8,
            ..team("b", 11, 0.5)
        };
        assert_eq!(
            outcome_tags(&fav, &dog, Side::B, 2),
            vec![
                OutcomeTag::Upset,
                OutcomeTag::Brand,
                OutcomeTag::Choke,
                OutcomeTag::BigUpset
            ]
        );
        // no choke in round 1
        assert!(!outcome_tags(&fav, &dog, Side::B, 1).contains(&OutcomeTag::Choke));
    }

    #[test]
    fn test_small_upset_not_big() {
        let fav = team("a", 8, 0.5);
        let dog = team("b", 9, 0.5);
        let tags = outcome_tags(&fav, &dog, Side::B, 1);
        assert!(tags.contains(&OutcomeTag::Upset));
        assert!(!tags.contains(&OutcomeTag::BigUpset));
    }

    #[test]
    fn test_equal_seeds_favor_b() {
        let a = team("a", 1, 0.5);
        let b = team("b", 1, 0.5);
        assert_eq!(outcome_tags(&a, &b, Side::B, 5)[0], OutcomeTag::Favorite);
        assert_eq!(outcome_tags(&a, &b, Side::A, 5)[0], OutcomeTag::Upset);
    }

    #[test]
    fn test_dominant_factor_tie_order() {
        assert_eq!(dominant_factor(&team("a", 1, 0.5)), OutcomeTag::Momentum);
        let t = Team {
            momentum: 0.2,
            ..team("a", 1, 0.7)
        };
        assert_eq!(dominant_factor(&t), OutcomeTag::Hype);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(OutcomeTag::BigUpset.to_string(), "big_upset");
        assert_eq!(
            serde_json::to_string(&OutcomeTag::BigUpset).unwrap(),
            "\"big_upset\""
        );
    }
}
