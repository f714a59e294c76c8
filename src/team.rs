#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BRAND_WEIGHT, HYPE_WEIGHT, MAX_SEED, MIN_SEED, MOMENTUM_WEIGHT, PRESSURE_WEIGHT,
    SEED_ADVANTAGE_WEIGHT,
};
use crate::error::{MadnessError, Result};

/// Tournament entrant with a seed and five synthetic traits.
///
/// All traits live in [0, 1]. Lower seed numbers are stronger.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,

    pub name: String,

    /// Seed, 1..=16
    pub seed: u8,

    /// Recent form
    pub momentum: f64,

    /// Media attention
    pub hype: f64,

    /// Choke tendency (higher = more likely to fold)
    pub pressure: f64,

    /// Outcome variance
    pub chaos: f64,

    /// Synthetic legacy aura
    pub brand_code: f64,
}

#[cfg(feature = "python")]
#[pymethods]
impl Team {
    #[new]
    #[allow(clippy::too_many_arguments)]
    pub fn py_new(
        id: String,
        name: String,
        seed: u8,
        momentum: f64,
        hype: f64,
        pressure: f64,
        chaos: f64,
        brand_code: f64,
    ) -> PyResult<Self> {
        let team = Team {
            id,
            name,
            seed,
            momentum,
            hype,
            pressure,
            chaos,
            brand_code,
        };
        team.validate()?;
        Ok(team)
    }

    fn __repr__(&self) -> String {
        format!("Team({:?}, {:?}, seed={})", self.id, self.name, self.seed)
    }
}

impl Team {
    /// Named trait values in a fixed order, used for range validation.
    pub fn features(&self) -> [(&'static str, f64); 5] {
        [
            ("momentum", self.momentum),
            ("hype", self.hype),
            ("pressure", self.pressure),
            ("chaos", self.chaos),
            ("brand_code", self.brand_code),
        ]
    }

    /// Check seed range and that every trait is a finite value in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SEED..=MAX_SEED).contains(&self.seed) {
            return Err(MadnessError::SeedOutOfRange {
                team: self.name.clone(),
                seed: i64::from(self.seed),
            });
        }
        for (feature, value) in self.features() {
            if !(0.0..=1.0).contains(&value) {
                return Err(MadnessError::FeatureOutOfRange {
                    team: self.name.clone(),
                    feature,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Latent strength given this side's seed-advantage tilt.
    pub fn latent_strength(&self, seed_advantage: f64) -> f64 {
        MOMENTUM_WEIGHT * self.momentum + HYPE_WEIGHT * self.hype
            - PRESSURE_WEIGHT * self.pressure
            + BRAND_WEIGHT * self.brand_code
            + SEED_ADVANTAGE_WEIGHT * seed_advantage
    }

    /// Absolute seed difference to `other`
    pub fn seed_gap(&self, other: &Team) -> u8 {
        self.seed.abs_diff(other.seed)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::constants::{FIELD_SIZE, TEAMS_PER_SEED};

    /// Plain team with every trait at `level`.
    pub fn team(id: &str, seed: u8, level: f64) -> Team {
        Team {
            id: id.to_string(),
            name: format!("Team {}", id),
            seed,
            momentum: level,
            hype: level,
            pressure: level,
            chaos: level,
            brand_code: level,
        }
    }

    /// Valid 64-team field whose traits vary deterministically with seed and region.
    pub fn field() -> Vec<Team> {
        let mut teams = Vec::with_capacity(FIELD_SIZE);
        for seed in 1..=16u8 {
            for region in 0..TEAMS_PER_SEED {
                let s = f64::from(seed);
                let r = region as f64;
                teams.push(Team {
                    id: format!("t{:02}{}", seed, region),
                    name: format!("Seed {} Region {}", seed, region),
                    seed,
                    momentum: (1.0 - s / 17.0 + r * 0.03).clamp(0.0, 1.0),
                    hype: ((s * 0.37 + r * 0.21) % 1.0).clamp(0.0, 1.0),
                    pressure: ((s * 0.13 + r * 0.29) % 1.0).clamp(0.0, 1.0),
                    chaos: (0.2 + s / 40.0 + r * 0.05).clamp(0.0, 1.0),
                    brand_code: (1.0 - s / 20.0 - r * 0.04).clamp(0.0, 1.0),
                });
            }
        }
        teams
    }
}
