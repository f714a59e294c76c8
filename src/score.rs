use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::archetype::{classify, reasons, Archetype, Scores, Thresholds};
use crate::bracket::Bracket;
use crate::collapse::estimate_collapse_risk;
use crate::error::Result;
use crate::features::extract_features;
use crate::game::OutcomeTag;

/// Scores, archetype and reasons for one completed bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub scores: Scores,
    pub archetype: Archetype,
    pub reasons: Vec<String>,
    pub tag_counts: BTreeMap<OutcomeTag, usize>,
}

/// Score a bracket against `sims` reality samples drawn from `rng`.
///
/// Partially filled brackets are scored on the picks they have.
pub fn score_bracket<R: Rng + ?Sized>(
    bracket: &Bracket,
    rng: &mut R,
    sims: usize,
) -> Result<SignalReport> {
    let signals = extract_features(bracket)?;
    let collapse_risk = estimate_collapse_risk(bracket, rng, sims)?;

    let scores = Scores::from_signals(&signals, collapse_risk);
    let archetype = classify(&scores, &Thresholds::ABSOLUTE);
    let reasons = reasons(&scores, &signals);

    Ok(SignalReport {
        scores,
        archetype,
        reasons,
        tag_counts: signals.tag_counts,
    })
}
