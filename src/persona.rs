//! Picker persona: four behavioral traits derived from the bracket seed.

use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Beta;

use crate::constants::{
    clamp01, BRAND_LOYALTY_SHAPE, CONTRARIAN_SHAPE, NARRATIVE_CHASING_SHAPE, RISK_TOLERANCE_SHAPE,
};

/// How a simulated human leans when filling a bracket.
///
/// Every trait is in [0, 1]; 0.5 is neutral and has no effect on picks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickerProfile {
    /// Appetite for early-round underdogs
    pub risk_tolerance: f64,
    /// Extra weight on hype
    pub narrative_chasing: f64,
    /// Extra weight on brand aura
    pub brand_loyalty: f64,
    /// Tendency to fade the favorite in every round
    pub contrarian: f64,
}

impl PickerProfile {
    pub const NEUTRAL: PickerProfile = PickerProfile {
        risk_tolerance: 0.5,
        narrative_chasing: 0.5,
        brand_loyalty: 0.5,
        contrarian: 0.5,
    };
}

/// Derive the persona for a bracket seed.
pub fn profile_from_seed(seed: u64) -> PickerProfile {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(9173).wrapping_add(11));

    let risk = draw_trait(&mut rng, RISK_TOLERANCE_SHAPE);
    let narrative = draw_trait(&mut rng, NARRATIVE_CHASING_SHAPE);
    let brand = draw_trait(&mut rng, BRAND_LOYALTY_SHAPE);
    let contrarian = draw_trait(&mut rng, CONTRARIAN_SHAPE);

    PickerProfile {
        risk_tolerance: round3(risk),
        narrative_chasing: round3(narrative),
        brand_loyalty: round3(brand),
        contrarian: round3(contrarian),
    }
}

fn draw_trait<R: Rng + ?Sized>(rng: &mut R, (alpha, beta): (f64, f64)) -> f64 {
    // shapes are compile-time constants, a rejected shape falls back to neutral
    Beta::new(alpha, beta)
        .map(|dist| clamp01(dist.sample(rng)))
        .unwrap_or(0.5)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
