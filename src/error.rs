use thiserror::Error;

use crate::bracket::Slot;

#[derive(Error, Debug)]
pub enum MadnessError {
    #[error("Expected {expected} teams, got {found}")]
    FieldSize { expected: usize, found: usize },

    #[error("Expected 4 teams for seed {seed}, got {found}")]
    SeedCount { seed: u8, found: usize },

    #[error("Bad seed for {team}: {seed}")]
    SeedOutOfRange { team: String, seed: i64 },

    #[error("Feature {feature} for {team} must be within [0, 1], got {value}")]
    FeatureOutOfRange {
        team: String,
        feature: &'static str,
        value: f64,
    },

    #[error("Duplicate team id: {id}")]
    DuplicateTeam { id: String },

    #[error("Bracket has no winners yet. Generate picks first.")]
    UnplayedBracket,

    #[error("Game {slot} already has a winner")]
    AlreadyDecided { slot: Slot },

    #[error("Invalid slot label: {0}")]
    InvalidSlot(String),

    #[error("Unknown roast level: {0}")]
    UnknownRoastLevel(String),

    #[error("Pool has no entries")]
    EmptyPool,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MadnessError {
    /// Validation errors are raised before any simulation starts.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MadnessError::FieldSize { .. }
                | MadnessError::SeedCount { .. }
                | MadnessError::SeedOutOfRange { .. }
                | MadnessError::FeatureOutOfRange { .. }
                | MadnessError::DuplicateTeam { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MadnessError>;

#[cfg(feature = "python")]
impl From<MadnessError> for pyo3::PyErr {
    fn from(err: MadnessError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
