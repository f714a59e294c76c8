use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::bracket::Bracket;
use crate::constants::{DEFAULT_MONTE_CARLO_SEED, DEFAULT_SIMULATIONS};
use crate::error::Result;
use crate::roast::{headline, select_roast_lines, RoastLevel};
use crate::score::{score_bracket, SignalReport};
use crate::share::{score_shareability, Shareability};
use crate::team::Team;
use crate::tournament::generate_bracket;

/// Run-level settings for profiling brackets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Reality samples for collapse risk (at least 80 are always run)
    pub sims: usize,
    /// Seed of the Monte Carlo batch, shared by every bracket in a run
    pub monte_carlo_seed: u64,
    pub roast: RoastLevel,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        ProfileOptions {
            sims: DEFAULT_SIMULATIONS,
            monte_carlo_seed: DEFAULT_MONTE_CARLO_SEED,
            roast: RoastLevel::Normal,
        }
    }
}

/// Everything produced for one bracket seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketProfile {
    pub seed: u64,
    pub bracket: Bracket,
    pub report: SignalReport,
    pub roast_lines: Vec<String>,
    pub headline: String,
    pub shareability: Shareability,
}

/// Generate, score and rank the bracket for `seed`.
pub fn profile_bracket(teams: &[Team], seed: u64, options: &ProfileOptions) -> Result<BracketProfile> {
    let bracket = generate_bracket(teams, seed)?;

    let mut rng = ChaCha8Rng::seed_from_u64(options.monte_carlo_seed);
    let report = score_bracket(&bracket, &mut rng, options.sims)?;

    let roast_lines = select_roast_lines(&report.reasons, options.roast);
    let headline = headline(report.archetype, &report.scores);
    let shareability = score_shareability(report.archetype, &report.scores, &headline, &roast_lines);

    log::debug!(
        "seed {}: {} ({:.2} shareable)",
        seed,
        report.archetype,
        shareability.score
    );

    Ok(BracketProfile {
        seed,
        bracket,
        report,
        roast_lines,
        headline,
        shareability,
    })
}
