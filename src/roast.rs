//! Headline and roast-line selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::archetype::{Archetype, Scores};
use crate::error::MadnessError;

/// How sharp the roast lines are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastLevel {
    Friendly,
    #[default]
    Normal,
    Unhinged,
}

impl RoastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Friendly => "friendly",
            RoastLevel::Normal => "normal",
            RoastLevel::Unhinged => "unhinged",
        }
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoastLevel {
    type Err = MadnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friendly" => Ok(RoastLevel::Friendly),
            "normal" => Ok(RoastLevel::Normal),
            "unhinged" => Ok(RoastLevel::Unhinged),
            _ => Err(MadnessError::UnknownRoastLevel(s.to_string())),
        }
    }
}

pub const ROAST_LINES: usize = 3;

const UNHINGED_PUNCHLINE: &str = "This is a spreadsheet with a plot twist.";

/// Pick up to three roast lines from the report reasons.
pub fn select_roast_lines(reasons: &[String], level: RoastLevel) -> Vec<String> {
    let base = reasons.iter().take(ROAST_LINES).cloned();
    match level {
        RoastLevel::Friendly => base.map(|r| r.replace("You ", "You might ")).collect(),
        RoastLevel::Normal => base.collect(),
        RoastLevel::Unhinged => base
            .chain(std::iter::once(UNHINGED_PUNCHLINE.to_string()))
            .take(ROAST_LINES)
            .collect(),
    }
}

/// One-line headline for a report.
pub fn headline(archetype: Archetype, scores: &Scores) -> String {
    let oc = scores.overconfidence;
    let chaos = scores.chaos_addiction;
    let collapse = scores.collapse_risk;

    if chaos < 0.20 && collapse > 0.85 && oc > 0.70 {
        return "PLAYED IT SAFE. DIED IMMEDIATELY.".to_string();
    }
    if chaos > 0.75 && collapse > 0.70 {
        return "YOU DIDN'T PICK UPSETS. YOU SUMMONED THEM.".to_string();
    }
    if scores.brand_bias > 0.80 && oc > 0.60 {
        return "THE BRAND WON. YOU JUST WORK HERE.".to_string();
    }
    if scores.narrative_bias > 0.75 && chaos < 0.55 {
        return "YOU BUILT A STORY, NOT A BRACKET.".to_string();
    }
    if collapse < 0.45 {
        return "ANNOYINGLY STABLE. LEGALLY INSPECTABLE.".to_string();
    }
    format!("{} ENERGY DETECTED.", archetype.label().to_uppercase())
}
