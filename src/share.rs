//! Shareability: how likely a report is to get passed around.

use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, Scores};
use crate::constants::clamp01;

/// Roast length (chars) with the best density
const IDEAL_ROAST_LEN: f64 = 110.0;
const ROAST_LEN_FALLOFF: f64 = 140.0;

const MEME_WEIGHT: f64 = 0.42;
const ROAST_WEIGHT: f64 = 0.18;
const HEADLINE_WEIGHT: f64 = 0.14;
const ARCHETYPE_WEIGHT: f64 = 0.18;
const COLLAPSE_BLEND_WEIGHT: f64 = 0.08;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareBreakdown {
    pub meme_axis: f64,
    pub irony: f64,
    pub chaos_pop: f64,
    pub brand_pop: f64,
    pub story_pop: f64,
    pub roast_density: f64,
    pub headline_bonus: f64,
    pub archetype_bonus: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shareability {
    pub score: f64,
    pub breakdown: ShareBreakdown,
}

/// Safe bracket that still dies early.
pub fn irony(scores: &Scores) -> f64 {
    let safe = clamp01(scores.overconfidence * 0.7 + (1.0 - scores.chaos_addiction) * 0.6);
    clamp01(safe * scores.collapse_risk)
}

/// Flat bonus for archetypes that tend to get passed around.
pub fn archetype_bonus(archetype: Archetype) -> f64 {
    match archetype {
        Archetype::SpreadsheetLiar | Archetype::ChaosGoblin => 0.16,
        Archetype::BrandWorshipper => 0.14,
        Archetype::NarrativeRomantic => 0.13,
        Archetype::QuietAssassin => 0.10,
        Archetype::SocialCopycat => 0.11,
    }
}

/// Keyword bonus, first match wins.
pub fn headline_bonus(headline: &str) -> f64 {
    const KEYWORDS: [(&str, f64); 5] = [
        ("DIED IMMEDIATELY", 0.18),
        ("SUMMONED", 0.16),
        ("THE BRAND WON", 0.14),
        ("STORY", 0.12),
        ("ANNOYINGLY STABLE", 0.10),
    ];
    let upper = headline.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map_or(0.06, |&(_, bonus)| bonus)
}

/// Peaks when the first three roast lines total about 110 characters.
pub fn roast_density(roast_lines: &[String]) -> f64 {
    let text = roast_lines
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let len = text.trim().chars().count() as f64;
    clamp01(1.0 - (len - IDEAL_ROAST_LEN).abs() / ROAST_LEN_FALLOFF)
}

/// Score in [0, 1] plus the sub-scores behind it.
pub fn score_shareability(
    archetype: Archetype,
    scores: &Scores,
    headline: &str,
    roast_lines: &[String],
) -> Shareability {
    let oc = scores.overconfidence;
    let collapse = scores.collapse_risk;

    let irony = irony(scores);
    let chaos_pop = clamp01(scores.chaos_addiction * 0.9 + collapse * 0.2);
    let brand_pop = clamp01(scores.brand_bias * 0.7 + oc * 0.2);
    let story_pop = clamp01(scores.narrative_bias * 0.8);
    let meme_axis = irony.max(chaos_pop).max(brand_pop).max(story_pop);

    let roast_density = roast_density(roast_lines);
    let headline_bonus = headline_bonus(headline);
    let archetype_bonus = archetype_bonus(archetype);

    let score = clamp01(
        MEME_WEIGHT * meme_axis
            + ROAST_WEIGHT * roast_density
            + HEADLINE_WEIGHT * headline_bonus
            + ARCHETYPE_WEIGHT * archetype_bonus
            + COLLAPSE_BLEND_WEIGHT * clamp01(collapse * 0.6 + oc * 0.2),
    );

    Shareability {
        score,
        breakdown: ShareBreakdown {
            meme_axis,
            irony,
            chaos_pop,
            brand_pop,
            story_pop,
            roast_density,
            headline_bonus,
            archetype_bonus,
        },
    }
}
