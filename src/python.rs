//! Python entry points. Results cross the boundary as JSON strings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::constants::{DEFAULT_MONTE_CARLO_SEED, DEFAULT_SIMULATIONS};
use crate::error::MadnessError;
use crate::persona::profile_from_seed;
use crate::pool::run_pool;
use crate::profile::{profile_bracket, ProfileOptions};
use crate::registry::parse_field;
use crate::roast::RoastLevel;
use crate::team::Team;
use crate::win_prob::{win_probability, Mode};

fn options(sims: usize, monte_carlo_seed: u64, roast: &str) -> PyResult<ProfileOptions> {
    Ok(ProfileOptions {
        sims,
        monte_carlo_seed,
        roast: roast.parse::<RoastLevel>()?,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    Ok(serde_json::to_string(value).map_err(MadnessError::from)?)
}

/// Parse and validate a 64-team field from JSON.
#[pyfunction]
fn py_parse_field(json: &str) -> PyResult<Vec<Team>> {
    Ok(parse_field(json)?)
}

/// Probability that `team_a` beats `team_b` for a given chaos draw.
#[pyfunction]
#[pyo3(signature = (team_a, team_b, round = 1, mode = "reality", noise = 0.0, persona_seed = None))]
fn py_win_probability(
    team_a: &Team,
    team_b: &Team,
    round: u8,
    mode: &str,
    noise: f64,
    persona_seed: Option<u64>,
) -> PyResult<f64> {
    let mode = match mode {
        "pick" => Mode::Pick,
        "reality" => Mode::Reality,
        other => return Err(PyValueError::new_err(format!("unknown mode: {}", other))),
    };
    let profile = persona_seed.map(profile_from_seed);
    Ok(win_probability(
        team_a,
        team_b,
        round,
        mode,
        profile.as_ref(),
        noise.clamp(-1.0, 1.0),
    ))
}

/// Full profile of one bracket seed, as JSON.
#[pyfunction]
#[pyo3(signature = (teams, seed, sims = DEFAULT_SIMULATIONS, monte_carlo_seed = DEFAULT_MONTE_CARLO_SEED, roast = "normal"))]
fn py_profile_bracket(
    teams: Vec<Team>,
    seed: u64,
    sims: usize,
    monte_carlo_seed: u64,
    roast: &str,
) -> PyResult<String> {
    let options = options(sims, monte_carlo_seed, roast)?;
    to_json(&profile_bracket(&teams, seed, &options)?)
}

/// Leaderboard, summary and featured duel for a pool, as JSON.
#[pyfunction]
#[pyo3(signature = (teams, first_seed, count, sims = DEFAULT_SIMULATIONS, monte_carlo_seed = DEFAULT_MONTE_CARLO_SEED, roast = "normal"))]
fn py_run_pool(
    py: Python<'_>,
    teams: Vec<Team>,
    first_seed: u64,
    count: usize,
    sims: usize,
    monte_carlo_seed: u64,
    roast: &str,
) -> PyResult<String> {
    let options = options(sims, monte_carlo_seed, roast)?;
    let run = py.allow_threads(|| run_pool(&teams, first_seed, count, &options))?;
    to_json(&run)
}

#[pymodule]
fn madness_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Team>()?;

    m.add_function(wrap_pyfunction!(py_parse_field, m)?)?;
    m.add_function(wrap_pyfunction!(py_win_probability, m)?)?;
    m.add_function(wrap_pyfunction!(py_profile_bracket, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_pool, m)?)?;

    m.add("DEFAULT_SIMULATIONS", DEFAULT_SIMULATIONS)?;
    m.add("DEFAULT_MONTE_CARLO_SEED", DEFAULT_MONTE_CARLO_SEED)?;
    Ok(())
}
