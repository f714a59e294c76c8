//! Archetype classification and reason strings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::BehaviorSignals;
use crate::game::OutcomeTag;

/// The five-signal vector behind every report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub overconfidence: f64,
    pub chaos_addiction: f64,
    pub brand_bias: f64,
    pub narrative_bias: f64,
    pub collapse_risk: f64,
}

impl Scores {
    pub const KEYS: [&'static str; 5] = [
        "overconfidence",
        "chaos_addiction",
        "brand_bias",
        "narrative_bias",
        "collapse_risk",
    ];

    pub fn from_signals(signals: &BehaviorSignals, collapse_risk: f64) -> Self {
        Scores {
            overconfidence: signals.overconfidence,
            chaos_addiction: signals.chaos_addiction,
            brand_bias: signals.brand_bias,
            narrative_bias: signals.narrative_bias,
            collapse_risk,
        }
    }

    /// Value by key name
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "overconfidence" => Some(self.overconfidence),
            "chaos_addiction" => Some(self.chaos_addiction),
            "brand_bias" => Some(self.brand_bias),
            "narrative_bias" => Some(self.narrative_bias),
            "collapse_risk" => Some(self.collapse_risk),
            _ => None,
        }
    }

    /// `(key, value)` pairs in `KEYS` order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::KEYS
            .iter()
            .filter_map(move |&k| self.get(k).map(|v| (k, v)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "Chaos Goblin")]
    ChaosGoblin,
    #[serde(rename = "Narrative Romantic")]
    NarrativeRomantic,
    #[serde(rename = "Brand Worshipper")]
    BrandWorshipper,
    #[serde(rename = "Spreadsheet Liar")]
    SpreadsheetLiar,
    #[serde(rename = "Quiet Assassin")]
    QuietAssassin,
    #[serde(rename = "Social Copycat")]
    SocialCopycat,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::ChaosGoblin,
        Archetype::NarrativeRomantic,
        Archetype::BrandWorshipper,
        Archetype::SpreadsheetLiar,
        Archetype::QuietAssassin,
        Archetype::SocialCopycat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::ChaosGoblin => "Chaos Goblin",
            Archetype::NarrativeRomantic => "Narrative Romantic",
            Archetype::BrandWorshipper => "Brand Worshipper",
            Archetype::SpreadsheetLiar => "Spreadsheet Liar",
            Archetype::QuietAssassin => "Quiet Assassin",
            Archetype::SocialCopycat => "Social Copycat",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cutoffs used by the ordered rules. Absolute for a single bracket,
/// percentile-derived for a pool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Chaos Goblin floor
    pub chaos: f64,
    /// Narrative Romantic floor
    pub narrative: f64,
    /// Brand Worshipper floor
    pub brand: f64,
    /// Spreadsheet Liar overconfidence floor
    pub overconfidence: f64,
    /// Spreadsheet Liar chaos ceiling
    pub spreadsheet_chaos: f64,
    /// Quiet Assassin collapse ceiling
    pub collapse: f64,
}

impl Thresholds {
    pub const ABSOLUTE: Thresholds = Thresholds {
        chaos: 0.62,
        narrative: 0.72,
        brand: 0.78,
        overconfidence: 0.74,
        spreadsheet_chaos: 0.20,
        collapse: 0.38,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::ABSOLUTE
    }
}

type Rule = fn(&Scores, &Thresholds) -> bool;

/// Evaluated in order; first match wins.
const RULES: [(Archetype, Rule); 5] = [
    (Archetype::ChaosGoblin, |s, t| s.chaos_addiction >= t.chaos),
    (Archetype::NarrativeRomantic, |s, t| s.narrative_bias >= t.narrative),
    (Archetype::BrandWorshipper, |s, t| s.brand_bias >= t.brand),
    // safe-but-wrong energy, collapse deliberately not required
    (Archetype::SpreadsheetLiar, |s, t| {
        s.overconfidence >= t.overconfidence && s.chaos_addiction <= t.spreadsheet_chaos
    }),
    (Archetype::QuietAssassin, |s, t| s.collapse_risk <= t.collapse),
];

/// Classify a score vector. Total: anything unmatched is a Social Copycat.
pub fn classify(scores: &Scores, thresholds: &Thresholds) -> Archetype {
    RULES
        .iter()
        .find(|(_, rule)| rule(scores, thresholds))
        .map(|(archetype, _)| *archetype)
        .unwrap_or(Archetype::SocialCopycat)
}

pub const MAX_REASONS: usize = 6;

/// High/low band lines per signal, then tag bonuses, capped at six.
pub fn reasons(scores: &Scores, signals: &BehaviorSignals) -> Vec<String> {
    let bands: [(f64, f64, f64, &str, &str); 5] = [
        (
            scores.chaos_addiction,
            0.75,
            0.40,
            "You picked upsets like you were speedrunning regret.",
            "You avoided upsets like they were a malware attachment.",
        ),
        (
            scores.overconfidence,
            0.75,
            0.45,
            "Your confidence is louder than your math.",
            "You hedge emotionally, even when the bracket begs for a stance.",
        ),
        (
            scores.brand_bias,
            0.75,
            0.40,
            "You bowed to legacy aura. The brand owns you.",
            "You rejected brand names on principle. Respectfully: that's suspicious.",
        ),
        (
            scores.narrative_bias,
            0.70,
            0.45,
            "You fell for hype. You're drafting storylines, not winners.",
            "You ignored the storyline and followed the signal. Cold-blooded.",
        ),
        (
            scores.collapse_risk,
            0.70,
            0.45,
            "This bracket has early-collapse energy. Beautiful, tragic, inevitable.",
            "This bracket is annoyingly stable. You will be insufferable about it.",
        ),
    ];

    let mut lines: Vec<String> = Vec::new();
    for (value, high, low, high_line, low_line) in bands {
        if value > high {
            lines.push(high_line.to_string());
        } else if value < low {
            lines.push(low_line.to_string());
        }
    }

    if signals.tag_count(OutcomeTag::BigUpset) >= 4 {
        lines.push("You didn't just pick chaos-you hosted it.".to_string());
    }
    if signals.tag_count(OutcomeTag::Choke) >= 3 {
        lines.push("You love a collapse narrative. Therapy would be cheaper.".to_string());
    }

    lines.truncate(MAX_REASONS);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn scores(oc: f64, chaos: f64, brand: f64, narrative: f64, collapse: f64) -> Scores {
        Scores {
            overconfidence: oc,
            chaos_addiction: chaos,
            brand_bias: brand,
            narrative_bias: narrative,
            collapse_risk: collapse,
        }
    }

    fn signals(big_upsets: usize, chokes: usize) -> BehaviorSignals {
        let mut tag_counts = BTreeMap::new();
        tag_counts.insert(OutcomeTag::BigUpset, big_upsets);
        tag_counts.insert(OutcomeTag::Choke, chokes);
        BehaviorSignals {
            chaos_addiction: 0.0,
            brand_bias: 0.0,
            narrative_bias: 0.0,
            overconfidence: 0.0,
            tag_counts,
        }
    }

    #[test]
    fn test_rule_order() {
        let t = Thresholds::ABSOLUTE;
        // every axis high: chaos wins
        assert_eq!(classify(&scores(0.9, 0.9, 0.9, 0.9, 0.1), &t), Archetype::ChaosGoblin);
        assert_eq!(
            classify(&scores(0.9, 0.5, 0.9, 0.9, 0.1), &t),
            Archetype::NarrativeRomantic
        );
        assert_eq!(
            classify(&scores(0.9, 0.5, 0.9, 0.5, 0.1), &t),
            Archetype::BrandWorshipper
        );
        assert_eq!(
            classify(&scores(0.8, 0.1, 0.5, 0.5, 0.9), &t),
            Archetype::SpreadsheetLiar
        );
        assert_eq!(
            classify(&scores(0.8, 0.3, 0.5, 0.5, 0.3), &t),
            Archetype::QuietAssassin
        );
        assert_eq!(
            classify(&scores(0.5, 0.3, 0.5, 0.5, 0.6), &t),
            Archetype::SocialCopycat
        );
    }

    #[test]
    fn test_threshold_edges_inclusive() {
        let t = Thresholds::ABSOLUTE;
        assert_eq!(classify(&scores(0.0, 0.62, 0.0, 0.0, 1.0), &t), Archetype::ChaosGoblin);
        assert_eq!(
            classify(&scores(0.74, 0.20, 0.0, 0.0, 1.0), &t),
            Archetype::SpreadsheetLiar
        );
        assert_eq!(classify(&scores(0.0, 0.0, 0.0, 0.0, 0.38), &t), Archetype::QuietAssassin);
    }

    #[test]
    fn test_relative_thresholds_change_label() {
        let s = scores(0.5, 0.3, 0.5, 0.5, 0.6);
        let pool = Thresholds {
            chaos: 0.25,
            ..Thresholds::ABSOLUTE
        };
        assert_eq!(classify(&s, &Thresholds::ABSOLUTE), Archetype::SocialCopycat);
        assert_eq!(classify(&s, &pool), Archetype::ChaosGoblin);
    }

    #[test]
    fn test_reasons_bands() {
        let s = scores(0.8, 0.8, 0.5, 0.3, 0.5);
        let lines = reasons(&s, &signals(0, 0));
        assert_eq!(
            lines,
            vec![
                "You picked upsets like you were speedrunning regret.",
                "Your confidence is louder than your math.",
                "You ignored the storyline and followed the signal. Cold-blooded.",
            ]
        );
    }

    #[test]
    fn test_reasons_capped_at_six() {
        let s = scores(0.9, 0.9, 0.9, 0.9, 0.9);
        let lines = reasons(&s, &signals(4, 3));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "You didn't just pick chaos-you hosted it.");
    }

    #[test]
    fn test_tag_bonus_thresholds() {
        let neutral = scores(0.6, 0.5, 0.5, 0.5, 0.5);
        assert!(reasons(&neutral, &signals(3, 2)).is_empty());
        assert_eq!(reasons(&neutral, &signals(0, 3)).len(), 1);
    }

    #[test]
    fn test_scores_iter_and_serde() {
        let s = scores(0.1, 0.2, 0.3, 0.4, 0.5);
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs[0], ("overconfidence", 0.1));
        assert_eq!(pairs[4], ("collapse_risk", 0.5));
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["brand_bias"], 0.3);
        assert_eq!(
            serde_json::to_string(&Archetype::SpreadsheetLiar).unwrap(),
            "\"Spreadsheet Liar\""
        );
    }
}
