use serde::{Deserialize, Serialize};
use statrs::function::logistic::{logistic, logit};

use crate::constants::{
    clamp01, round_chaos_mult, BRAND_LOYALTY_SCALE, CHAOS_NOISE_SCALE, CONTRARIAN_SCALE,
    HYPE_UNDERDOG_NUDGE, HYPE_UNDERDOG_THRESHOLD, LOGISTIC_STEEPNESS, NARRATIVE_SCALE,
    REALITY_CHAOS_DAMPING, RISK_PUSH_LAST_ROUND, RISK_PUSH_SCALE, SEED_TILT_SCALE,
};
use crate::persona::PickerProfile;
use crate::team::Team;

/// Which process is producing outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// A human filling in a bracket: extra chaos, persona nudges
    Pick,
    /// One plausible real tournament: calmer, no persona
    Reality,
}

const LOGIT_EPS: f64 = 1e-9;

/// Seed-advantage tilt for `team_a` (lower seed number is stronger).
pub fn seed_advantage(team_a: &Team, team_b: &Team) -> f64 {
    let gap = f64::from(team_b.seed) - f64::from(team_a.seed);
    clamp01(0.5 + gap / SEED_TILT_SCALE)
}

/// Win probability for `team_a` from latent strength alone.
pub fn base_win_prob(team_a: &Team, team_b: &Team) -> f64 {
    let adv_a = seed_advantage(team_a, team_b);
    let diff = team_a.latent_strength(adv_a) - team_b.latent_strength(1.0 - adv_a);
    logistic(LOGISTIC_STEEPNESS * diff)
}

/// Noise amplitude for a matchup in `round`.
pub fn chaos_level(team_a: &Team, team_b: &Team, round: u8, mode: Mode) -> f64 {
    let chaos = (team_a.chaos + team_b.chaos) / 2.0 * round_chaos_mult(round);
    match mode {
        Mode::Reality => chaos * REALITY_CHAOS_DAMPING,
        Mode::Pick => chaos,
    }
}

/// Seed favorite of the pairing; ties go to `team_b`.
pub fn favorite_is_a(team_a: &Team, team_b: &Team) -> bool {
    team_a.seed < team_b.seed
}

/// Shift `p_a` in log-odds space by the picker's four traits.
pub fn apply_profile(
    p_a: f64,
    team_a: &Team,
    team_b: &Team,
    round: u8,
    profile: &PickerProfile,
) -> f64 {
    let a_is_favorite = favorite_is_a(team_a, team_b);
    let mut z = logit(clamp01(p_a).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS));

    if round <= RISK_PUSH_LAST_ROUND {
        let push = (profile.risk_tolerance - 0.5) * RISK_PUSH_SCALE;
        if a_is_favorite {
            z -= push;
        } else {
            z += push;
        }
    }

    let contra = (profile.contrarian - 0.5) * CONTRARIAN_SCALE;
    if a_is_favorite {
        z -= contra;
    } else {
        z += contra;
    }

    let hype_gap = team_a.hype - team_b.hype;
    z += hype_gap * (profile.narrative_chasing - 0.5) * NARRATIVE_SCALE;

    let brand_gap = team_a.brand_code - team_b.brand_code;
    z += brand_gap * (profile.brand_loyalty - 0.5) * BRAND_LOYALTY_SCALE;

    clamp01(logistic(z))
}

/// Final probability that `team_a` wins.
///
/// `noise` is the uniform chaos draw in [-1, 1]; everything else is
/// deterministic, so the same noise always gives the same probability.
pub fn win_probability(
    team_a: &Team,
    team_b: &Team,
    round: u8,
    mode: Mode,
    profile: Option<&PickerProfile>,
    noise: f64,
) -> f64 {
    let chaos = chaos_level(team_a, team_b, round, mode);
    let mut p_a = clamp01(base_win_prob(team_a, team_b) + noise * chaos * CHAOS_NOISE_SCALE);

    if mode == Mode::Pick {
        if let Some(profile) = profile {
            p_a = apply_profile(p_a, team_a, team_b, round, profile);
        }

        // everyone wants a few first-round upsets
        if round == 1 {
            let a_is_underdog = team_a.seed > team_b.seed;
            let underdog = if a_is_underdog { team_a } else { team_b };
            if underdog.hype > HYPE_UNDERDOG_THRESHOLD {
                p_a = if a_is_underdog {
                    clamp01(p_a + HYPE_UNDERDOG_NUDGE)
                } else {
                    clamp01(p_a - HYPE_UNDERDOG_NUDGE)
                };
            }
        }
    }

    p_a
}
