//! Bracket structure and first-round seed pairing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{FIRST_ROUND_GAMES, ROUNDS, SEED_MATCHUPS, TEAMS_PER_SEED};
use crate::error::{MadnessError, Result};
use crate::game::{OutcomeTag, Side};
use crate::registry::{group_by_seed, validate_field};
use crate::team::Team;

/// Address of one game: round 1..=6 and 1-based position within the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub round: u8,
    pub position: u8,
}

impl Slot {
    pub fn new(round: u8, position: u8) -> Self {
        Slot { round, position }
    }

    /// Slot in the next round fed by this one
    pub fn parent(&self) -> Slot {
        Slot::new(self.round + 1, self.position / 2 + self.position % 2)
    }

    /// Number of games in `round`, 0 outside 1..=6
    pub fn games_in_round(round: u8) -> usize {
        if (1..=ROUNDS).contains(&round) {
            FIRST_ROUND_GAMES >> (round - 1)
        } else {
            0
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}-G{:02}", self.round, self.position)
    }
}

impl FromStr for Slot {
    type Err = MadnessError;

    /// Parse labels like `R1-G01`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MadnessError::InvalidSlot(s.to_string());
        let (round, position) = s
            .strip_prefix('R')
            .and_then(|rest| rest.split_once("-G"))
            .ok_or_else(invalid)?;
        let round: u8 = round.parse().map_err(|_| invalid())?;
        let position: u8 = position.parse().map_err(|_| invalid())?;
        if position == 0 || usize::from(position) > Slot::games_in_round(round) {
            return Err(invalid());
        }
        Ok(Slot::new(round, position))
    }
}

/// One game of the bracket. The winner is recorded at most once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub slot: Slot,
    pub team_a: Team,
    pub team_b: Team,
    winner: Option<Side>,
    tags: Vec<OutcomeTag>,
}

impl Game {
    pub fn new(slot: Slot, team_a: Team, team_b: Team) -> Self {
        Game {
            slot,
            team_a,
            team_b,
            winner: None,
            tags: Vec::new(),
        }
    }

    pub fn round(&self) -> u8 {
        self.slot.round
    }

    pub fn is_played(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.winner
    }

    pub fn tags(&self) -> &[OutcomeTag] {
        &self.tags
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn winner(&self) -> Option<&Team> {
        self.winner.map(|side| self.team(side))
    }

    pub fn loser(&self) -> Option<&Team> {
        self.winner.map(|side| self.team(side.other()))
    }

    /// Record the result. Fails if a winner is already set.
    pub fn record(&mut self, winner: Side, tags: Vec<OutcomeTag>) -> Result<()> {
        if self.winner.is_some() {
            return Err(MadnessError::AlreadyDecided { slot: self.slot });
        }
        self.winner = Some(winner);
        self.tags = tags;
        Ok(())
    }
}

/// Ordered games for rounds 1..=6.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub(crate) games: Vec<Game>,
}

impl Bracket {
    pub fn from_games(games: Vec<Game>) -> Self {
        Bracket { games }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn round(&self, round: u8) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.round() == round)
    }

    /// Games that have a winner
    pub fn played(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.is_played())
    }

    pub fn game(&self, slot: Slot) -> Option<&Game> {
        self.games.iter().find(|g| g.slot == slot)
    }

    /// Round-1 pairings in bracket order.
    pub fn first_round_pairs(&self) -> Vec<(&Team, &Team)> {
        self.round(1).map(|g| (&g.team_a, &g.team_b)).collect()
    }

    /// True once every game of rounds 1..=6 has a winner.
    pub fn is_complete(&self) -> bool {
        let expected: usize = (0..ROUNDS).map(|r| FIRST_ROUND_GAMES >> r).sum();
        self.games.len() == expected && self.games.iter().all(Game::is_played)
    }

    pub fn champion(&self) -> Option<&Team> {
        self.round(ROUNDS).next().and_then(Game::winner)
    }
}

/// Build the 32 first-round pairs, region-major in matchup order.
///
/// Adjacent pairs (2k, 2k+1) meet in round 2, so this order is what the
/// rest of the tournament is built on.
pub fn pair_first_round(teams: &[Team]) -> Result<Vec<(&Team, &Team)>> {
    validate_field(teams)?;
    let by_seed = group_by_seed(teams);

    let mut pairs = Vec::with_capacity(FIRST_ROUND_GAMES);
    for region in 0..TEAMS_PER_SEED {
        for (a_seed, b_seed) in SEED_MATCHUPS {
            let a = by_seed[&a_seed][region];
            let b = by_seed[&b_seed][region];
            pairs.push((a, b));
        }
    }
    Ok(pairs)
}

/// Fresh bracket with 32 unplayed round-1 games `R1-G01..R1-G32`.
pub fn build_empty_bracket(teams: &[Team]) -> Result<Bracket> {
    let games = pair_first_round(teams)?
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| Game::new(Slot::new(1, i as u8 + 1), a.clone(), b.clone()))
        .collect();
    Ok(Bracket { games })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::fixtures::field;
    use std::collections::HashSet;

    #[test]
    fn test_pairs_follow_matchup_table() {
        let teams = field();
        let pairs = pair_first_round(&teams).unwrap();
        assert_eq!(pairs.len(), 32);
        for (i, (a, b)) in pairs.iter().enumerate() {
            assert_eq!((a.seed, b.seed), SEED_MATCHUPS[i % 8]);
            assert_eq!(a.seed + b.seed, 17);
        }
        let ids: HashSet<&str> = pairs
            .iter()
            .flat_map(|(a, b)| [a.id.as_str(), b.id.as_str()])
            .collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_regions_use_id_order() {
        let mut teams = field();
        teams.reverse();
        let pairs = pair_first_round(&teams).unwrap();
        // region 0 takes the smallest id for every seed
        assert_eq!(pairs[0].0.id, "t010");
        assert_eq!(pairs[0].1.id, "t160");
        assert_eq!(pairs[8].0.id, "t011");
    }

    #[test]
    fn test_pairing_rejects_bad_seed_count() {
        let mut teams = field();
        teams[0].seed = 2;
        assert!(matches!(
            pair_first_round(&teams),
            Err(MadnessError::SeedCount { .. })
        ));
    }

    #[test]
    fn test_empty_bracket_slots() {
        let bracket = build_empty_bracket(&field()).unwrap();
        assert_eq!(bracket.games().len(), 32);
        assert_eq!(bracket.played().count(), 0);
        assert!(!bracket.is_complete());
        assert_eq!(bracket.games()[0].slot.to_string(), "R1-G01");
        assert_eq!(bracket.games()[31].slot.to_string(), "R1-G32");
    }

    #[test]
    fn test_record_once() {
        let mut bracket = build_empty_bracket(&field()).unwrap();
        let game = &mut bracket.games[0];
        game.record(Side::A, vec![OutcomeTag::Favorite]).unwrap();
        assert_eq!(game.winner().unwrap().seed, 1);
        assert_eq!(game.loser().unwrap().seed, 16);
        let err = game.record(Side::B, vec![]).unwrap_err();
        assert!(matches!(err, MadnessError::AlreadyDecided { .. }));
        assert_eq!(game.winning_side(), Some(Side::A));
    }

    #[test]
    fn test_slot_parse_round_trip() {
        let slot: Slot = "R3-G07".parse().unwrap();
        assert_eq!(slot, Slot::new(3, 7));
        assert_eq!(slot.to_string(), "R3-G07");
        assert_eq!(Slot::new(1, 31).parent(), Slot::new(2, 16));
        assert_eq!(Slot::new(1, 32).parent(), Slot::new(2, 16));
        assert!("R7-G01".parse::<Slot>().is_err());
        assert!("X1-G01".parse::<Slot>().is_err());
        assert!("R1-G00".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_positions_bounded_by_round() {
        assert_eq!(Slot::games_in_round(1), 32);
        assert_eq!(Slot::games_in_round(6), 1);
        assert_eq!(Slot::games_in_round(7), 0);
        assert!("R1-G32".parse::<Slot>().is_ok());
        assert!("R1-G33".parse::<Slot>().is_err());
        assert!("R1-G255".parse::<Slot>().is_err());
        assert!("R6-G02".parse::<Slot>().is_err());
        // no overflow at the top of the u8 range
        assert_eq!(Slot::new(1, 255).parent(), Slot::new(2, 128));
    }
}
