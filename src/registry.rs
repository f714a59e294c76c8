//! Entrant registry: parse and validate a full field.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::constants::{FIELD_SIZE, MAX_SEED, MIN_SEED, TEAMS_PER_SEED};
use crate::error::{MadnessError, Result};
use crate::team::Team;

/// On-disk entrant record. Ids may be strings or numbers and seeds are
/// range-checked after parsing so that bad seeds get a precise error.
#[derive(Deserialize)]
struct RawTeam {
    id: Value,
    name: String,
    seed: i64,
    momentum: f64,
    hype: f64,
    pressure: f64,
    chaos: f64,
    brand_code: f64,
}

impl RawTeam {
    fn into_team(self) -> Result<Team> {
        let seed = u8::try_from(self.seed)
            .ok()
            .filter(|s| (MIN_SEED..=MAX_SEED).contains(s))
            .ok_or_else(|| MadnessError::SeedOutOfRange {
                team: self.name.clone(),
                seed: self.seed,
            })?;
        let id = match self.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Team {
            id,
            name: self.name,
            seed,
            momentum: self.momentum,
            hype: self.hype,
            pressure: self.pressure,
            chaos: self.chaos,
            brand_code: self.brand_code,
        })
    }
}

/// Parse a JSON array of entrants and validate it as a full field.
pub fn parse_field(json: &str) -> Result<Vec<Team>> {
    let raw: Vec<RawTeam> = serde_json::from_str(json)?;
    if raw.len() != FIELD_SIZE {
        return Err(MadnessError::FieldSize {
            expected: FIELD_SIZE,
            found: raw.len(),
        });
    }
    let teams = raw
        .into_iter()
        .map(RawTeam::into_team)
        .collect::<Result<Vec<_>>>()?;
    validate_field(&teams)?;
    Ok(teams)
}

/// Validate a field: 64 teams, unique ids, traits in range, four per seed.
pub fn validate_field(teams: &[Team]) -> Result<()> {
    if teams.len() != FIELD_SIZE {
        return Err(MadnessError::FieldSize {
            expected: FIELD_SIZE,
            found: teams.len(),
        });
    }

    let mut ids = HashSet::with_capacity(teams.len());
    for team in teams {
        team.validate()?;
        if !ids.insert(team.id.as_str()) {
            return Err(MadnessError::DuplicateTeam {
                id: team.id.clone(),
            });
        }
    }

    let groups = group_by_seed(teams);
    for seed in MIN_SEED..=MAX_SEED {
        let found = groups.get(&seed).map_or(0, Vec::len);
        if found != TEAMS_PER_SEED {
            return Err(MadnessError::SeedCount { seed, found });
        }
    }
    Ok(())
}

/// Group teams by seed; each group is ordered by id for stable output.
pub fn group_by_seed(teams: &[Team]) -> BTreeMap<u8, Vec<&Team>> {
    let mut groups: BTreeMap<u8, Vec<&Team>> = BTreeMap::new();
    for team in teams {
        groups.entry(team.seed).or_default().push(team);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.id.cmp(&b.id));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::fixtures::field;

    fn field_json(teams: &[Team]) -> String {
        serde_json::to_string(teams).unwrap()
    }

    #[test]
    fn test_parse_valid_field() {
        let teams = field();
        let parsed = parse_field(&field_json(&teams)).unwrap();
        assert_eq!(parsed, teams);
    }

    #[test]
    fn test_parse_numeric_ids() {
        let mut value: Value = serde_json::to_value(field()).unwrap();
        for (i, item) in value.as_array_mut().unwrap().iter_mut().enumerate() {
            item["id"] = Value::from(i as u64 + 100);
        }
        let parsed = parse_field(&value.to_string()).unwrap();
        assert_eq!(parsed[0].id, "100");
    }

    #[test]
    fn test_wrong_count() {
        let teams = &field()[..63];
        let err = parse_field(&field_json(teams)).unwrap_err();
        assert!(matches!(
            err,
            MadnessError::FieldSize {
                expected: 64,
                found: 63
            }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_seed_out_of_range() {
        let mut value: Value = serde_json::to_value(field()).unwrap();
        value[5]["seed"] = Value::from(17);
        let err = parse_field(&value.to_string()).unwrap_err();
        assert!(matches!(err, MadnessError::SeedOutOfRange { seed: 17, .. }));
    }

    #[test]
    fn test_unbalanced_seeds() {
        let mut teams = field();
        // move one 16-seed to seed 1: seed 1 has 5, seed 16 has 3
        let idx = teams.iter().position(|t| t.seed == 16).unwrap();
        teams[idx].seed = 1;
        let err = validate_field(&teams).unwrap_err();
        assert!(matches!(err, MadnessError::SeedCount { seed: 1, found: 5 }));
    }

    #[test]
    fn test_duplicate_id() {
        let mut teams = field();
        teams[1].id = teams[0].id.clone();
        assert!(matches!(
            validate_field(&teams),
            Err(MadnessError::DuplicateTeam { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_field("{not json"), Err(MadnessError::Json(_))));
    }

    #[test]
    fn test_group_by_seed_sorted() {
        let mut teams = field();
        teams.reverse();
        let groups = group_by_seed(&teams);
        assert_eq!(groups.len(), 16);
        for group in groups.values() {
            assert_eq!(group.len(), 4);
            assert!(group.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
