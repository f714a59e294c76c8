//! Collapse risk: how quickly a fixed pick-set diverges from plausible reality.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;

use crate::bracket::{Bracket, Slot};
use crate::constants::{clamp01, round_weight, FIRST_ROUND_GAMES, MIN_SIMULATIONS};
use crate::error::{MadnessError, Result};
use crate::team::Team;
use crate::tournament::{simulate_reality, RoundWinners};

/// Picked winner id for every resolved slot.
pub type PickSet<'a> = HashMap<Slot, &'a str>;

/// Collect the picks of every resolved game.
pub fn pick_set(bracket: &Bracket) -> PickSet<'_> {
    bracket
        .played()
        .filter_map(|g| g.winner().map(|w| (g.slot, w.id.as_str())))
        .collect()
}

/// Round-weighted share of picked slots that a reality sample agrees with.
///
/// Round r credits `0.7 + 0.25 r` per picked slot, so deep agreement counts
/// more than round 1. Returns 0 when nothing was picked.
pub fn survival_fraction(picks: &PickSet<'_>, sample: &RoundWinners<'_>) -> f64 {
    let mut matched = 0.0;
    let mut possible = 0.0;

    for (r, winners) in sample.iter().enumerate() {
        let round = r as u8 + 1;
        let weight = round_weight(round);
        for (p, winner) in winners.iter().enumerate() {
            let slot = Slot::new(round, p as u8 + 1);
            if let Some(&picked) = picks.get(&slot) {
                possible += weight;
                if picked == winner.id {
                    matched += weight;
                }
            }
        }
    }

    if possible <= 0.0 {
        0.0
    } else {
        matched / possible
    }
}

/// Estimate collapse risk in [0, 1] for a pick-set.
///
/// Runs `max(80, sims)` reality samples from the bracket's round-1 pairings.
/// `rng` draws one seed per sample; samples then run in parallel, each on
/// its own generator, and are averaged in sample order, so the result only
/// depends on the state of `rng`.
pub fn estimate_collapse_risk<R: Rng + ?Sized>(
    bracket: &Bracket,
    rng: &mut R,
    sims: usize,
) -> Result<f64> {
    let picks = pick_set(bracket);
    if picks.is_empty() {
        return Err(MadnessError::UnplayedBracket);
    }

    let mut pairs: Vec<(&Team, &Team)> = bracket.first_round_pairs();
    if pairs.len() != FIRST_ROUND_GAMES {
        // TODO: confirm with product whether a short first round should be rejected instead
        log::warn!(
            "collapse estimate over {} first-round games (expected {}), using at most {}",
            pairs.len(),
            FIRST_ROUND_GAMES,
            FIRST_ROUND_GAMES
        );
        pairs.truncate(FIRST_ROUND_GAMES);
    }

    let n = sims.max(MIN_SIMULATIONS);
    let seeds: Vec<u64> = (0..n).map(|_| rng.gen()).collect();
    log::debug!("running {} reality samples over {} picks", n, picks.len());

    let survivals: Vec<f64> = seeds
        .par_iter()
        .map(|&seed| {
            let mut sim_rng = ChaCha8Rng::seed_from_u64(seed);
            let sample = simulate_reality(&pairs, &mut sim_rng);
            survival_fraction(&picks, &sample)
        })
        .collect();

    let avg_survival = survivals.iter().sum::<f64>() / n as f64;
    Ok(clamp01(1.0 - avg_survival))
}
