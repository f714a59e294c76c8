use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bracket::{build_empty_bracket, Bracket, Game, Slot};
use crate::constants::ROUNDS;
use crate::error::Result;
use crate::game::{decide, play, Side};
use crate::persona::profile_from_seed;
use crate::team::Team;
use crate::win_prob::Mode;

/// Winners of one reality sample, indexed by round then position.
pub type RoundWinners<'a> = Vec<Vec<&'a Team>>;

/// Build and fill a bracket for `seed` in pick mode.
pub fn generate_bracket(teams: &[Team], seed: u64) -> Result<Bracket> {
    let mut bracket = build_empty_bracket(teams)?;
    complete_bracket(&mut bracket, seed)?;
    Ok(bracket)
}

/// Fill a bracket from its round-1 pairings in pick mode.
///
/// Any later rounds or earlier picks are discarded and replaced by fresh
/// games, so the same seed always yields the same bracket.
pub fn complete_bracket(bracket: &mut Bracket, seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let profile = profile_from_seed(seed);
    log::debug!("completing bracket for seed {} with profile {:?}", seed, profile);

    let mut games: Vec<Game> = bracket
        .round(1)
        .map(|g| Game::new(g.slot, g.team_a.clone(), g.team_b.clone()))
        .collect();

    let mut start = 0;
    let mut round = 1;
    while start < games.len() {
        for game in &mut games[start..] {
            let decision = decide(
                &game.team_a,
                &game.team_b,
                &mut rng,
                round,
                Mode::Pick,
                Some(&profile),
            );
            game.record(decision.winner, decision.tags)?;
        }

        if round == ROUNDS {
            break;
        }

        let winners: Vec<Team> = games[start..]
            .iter()
            .filter_map(|g| g.winner().cloned())
            .collect();
        start = games.len();
        round += 1;
        for (k, pair) in winners.chunks_exact(2).enumerate() {
            games.push(Game::new(
                Slot::new(round, k as u8 + 1),
                pair[0].clone(),
                pair[1].clone(),
            ));
        }
    }

    log::debug!(
        "bracket for seed {} has {} games, champion {:?}",
        seed,
        games.len(),
        games.last().and_then(Game::winner).map(|t| t.name.as_str())
    );
    bracket.games = games;
    Ok(())
}

/// Simulate one plausible tournament in reality mode.
///
/// Sequential winners pair off (0 & 1, 2 & 3, ...) until round 6 is done or
/// fewer than two entrants remain. Nothing outside `rng` is touched.
pub fn simulate_reality<'a, R: Rng + ?Sized>(
    pairs: &[(&'a Team, &'a Team)],
    rng: &mut R,
) -> RoundWinners<'a> {
    let mut rounds = Vec::with_capacity(ROUNDS as usize);
    let mut current = pairs.to_vec();

    for round in 1..=ROUNDS {
        if current.is_empty() {
            break;
        }
        let winners: Vec<&'a Team> = current
            .iter()
            .map(|&(a, b)| match play(a, b, rng, round, Mode::Reality, None) {
                Side::A => a,
                Side::B => b,
            })
            .collect();
        current = winners.chunks_exact(2).map(|w| (w[0], w[1])).collect();
        rounds.push(winners);
    }

    rounds
}
