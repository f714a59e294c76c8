//! Madness Core - bracket personality engine.
//!
//! Generates a 64-team single-elimination bracket from a seeded picker
//! persona, measures how fragile it is against simulated reality, and turns
//! the resulting signals into an archetype, roast lines and a shareability
//! score. Pools of brackets are classified relative to each other.
//!
//! Python bindings are available behind the `python` feature.

pub mod archetype;
pub mod bracket;
pub mod collapse;
pub mod constants;
pub mod duel;
pub mod error;
pub mod features;
pub mod game;
pub mod persona;
pub mod pool;
pub mod profile;
pub mod registry;
pub mod roast;
pub mod score;
pub mod share;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use archetype::{classify, Archetype, Scores, Thresholds};
pub use bracket::{build_empty_bracket, pair_first_round, Bracket, Game, Slot};
pub use collapse::estimate_collapse_risk;
pub use duel::{duel, Duel, DuelSide};
pub use error::{MadnessError, Result};
pub use features::{extract_features, BehaviorSignals};
pub use game::{decide, Decision, OutcomeTag, Side};
pub use persona::{profile_from_seed, PickerProfile};
pub use pool::{run_pool, summarize_pool, PoolEntry, PoolRun, PoolSummary, PoolThresholds};
pub use profile::{profile_bracket, BracketProfile, ProfileOptions};
pub use registry::{parse_field, validate_field};
pub use roast::{headline, select_roast_lines, RoastLevel};
pub use score::{score_bracket, SignalReport};
pub use share::{score_shareability, Shareability};
pub use team::Team;
pub use tournament::{complete_bracket, generate_bracket, simulate_reality};
pub use win_prob::{win_probability, Mode};
