//! Office-pool mode: many brackets, classified relative to each other.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::archetype::{classify, Archetype, Scores, Thresholds};
use crate::duel::{featured_duel, Duel};
use crate::error::{MadnessError, Result};
use crate::profile::{profile_bracket, BracketProfile, ProfileOptions};
use crate::share::ShareBreakdown;
use crate::team::Team;

/// One participant's row in the pool leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub seed: u64,
    pub archetype: Archetype,
    pub headline: String,
    pub shareability_score: f64,
    pub breakdown: ShareBreakdown,
    pub scores: Scores,
}

impl From<&BracketProfile> for PoolEntry {
    fn from(profile: &BracketProfile) -> Self {
        PoolEntry {
            seed: profile.seed,
            archetype: profile.report.archetype,
            headline: profile.headline.clone(),
            shareability_score: profile.shareability.score,
            breakdown: profile.shareability.breakdown,
            scores: profile.report.scores,
        }
    }
}

/// Population percentiles of the five signals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolThresholds {
    pub oc_p75: f64,
    pub chaos_p75: f64,
    pub narr_p75: f64,
    pub brand_p75: f64,
    pub collapse_p25: f64,
    pub collapse_p75: f64,
    pub chaos_p25: f64,
}

impl PoolThresholds {
    pub fn from_scores<'a>(scores: impl IntoIterator<Item = &'a Scores>) -> Self {
        let scores: Vec<&Scores> = scores.into_iter().collect();
        let column = |f: fn(&Scores) -> f64| scores.iter().map(|s| f(s)).collect::<Vec<_>>();

        let oc = column(|s| s.overconfidence);
        let chaos = column(|s| s.chaos_addiction);
        let narrative = column(|s| s.narrative_bias);
        let brand = column(|s| s.brand_bias);
        let collapse = column(|s| s.collapse_risk);

        PoolThresholds {
            oc_p75: percentile(&oc, 0.75),
            chaos_p75: percentile(&chaos, 0.75),
            narr_p75: percentile(&narrative, 0.75),
            brand_p75: percentile(&brand, 0.75),
            collapse_p25: percentile(&collapse, 0.25),
            collapse_p75: percentile(&collapse, 0.75),
            chaos_p25: percentile(&chaos, 0.25),
        }
    }

    /// Cutoffs for the pool-relative classifier.
    ///
    /// The Spreadsheet Liar chaos ceiling is the pool's 25th chaos percentile,
    /// which is not the same policy as the absolute 0.20 ceiling.
    pub fn classifier(&self) -> Thresholds {
        Thresholds {
            chaos: self.chaos_p75,
            narrative: self.narr_p75,
            brand: self.brand_p75,
            overconfidence: self.oc_p75,
            spreadsheet_chaos: self.chaos_p25,
            collapse: self.collapse_p25,
        }
    }
}

/// Linear-interpolated percentile, `p` in [0, 1]. Empty input gives 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut xs = values.to_vec();
    xs.sort_by(f64::total_cmp);
    if xs.len() == 1 {
        return xs[0];
    }
    let k = (xs.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(xs.len() - 1);
    if f == c {
        return xs[f];
    }
    xs[f] + (xs[c] - xs[f]) * (k - f as f64)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeShare {
    pub archetype: Archetype,
    pub count: usize,
    pub pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Superlative {
    pub seed: u64,
    pub archetype: Archetype,
    pub value: f64,
}

impl Superlative {
    fn of(entry: &PoolEntry, value: f64) -> Self {
        Superlative {
            seed: entry.seed,
            archetype: entry.archetype,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Superlatives {
    pub most_chaos: Superlative,
    pub most_narrative: Superlative,
    pub most_brand: Superlative,
    pub most_overconfident: Superlative,
    pub quiet_assassin: Superlative,
    pub safest_but_dead: Superlative,
}

/// Played it safe and still collapsed.
pub fn safe_but_dead_index(scores: &Scores) -> f64 {
    scores.overconfidence * 0.6 + (1.0 - scores.chaos_addiction) * 0.4 + scores.collapse_risk * 0.6
}

/// First entry with the largest `key`; earlier entries win ties.
fn best_by<'a>(
    entries: &'a [PoolEntry],
    key: impl Fn(&PoolEntry) -> f64,
) -> Option<(&'a PoolEntry, f64)> {
    let mut best: Option<(&'a PoolEntry, f64)> = None;
    for entry in entries {
        let value = key(entry);
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((entry, value));
        }
    }
    best
}

/// Pool awards: the extreme entry on each signal plus the safe-but-dead index.
///
/// # Arguments
/// * `entries` - Pool entries in leaderboard order; earlier entries win ties
///
/// # Returns
/// One `Superlative` per award, or `EmptyPool` when `entries` is empty
pub fn superlatives(entries: &[PoolEntry]) -> Result<Superlatives> {
    let pick = |key: fn(&PoolEntry) -> f64| {
        best_by(entries, key)
            .map(|(entry, value)| Superlative::of(entry, value))
            .ok_or(MadnessError::EmptyPool)
    };

    let quiet = best_by(entries, |e| -e.scores.collapse_risk)
        .map(|(entry, _)| Superlative::of(entry, entry.scores.collapse_risk))
        .ok_or(MadnessError::EmptyPool)?;

    Ok(Superlatives {
        most_chaos: pick(|e| e.scores.chaos_addiction)?,
        most_narrative: pick(|e| e.scores.narrative_bias)?,
        most_brand: pick(|e| e.scores.brand_bias)?,
        most_overconfident: pick(|e| e.scores.overconfidence)?,
        quiet_assassin: quiet,
        safest_but_dead: pick(|e| safe_but_dead_index(&e.scores))?,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub n: usize,
    pub distribution: Vec<ArchetypeShare>,
    pub avg_scores: Scores,
    pub top3: Vec<PoolEntry>,
    pub thresholds: PoolThresholds,
    pub superlatives: Superlatives,
}

fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

/// Archetype counts, most common first; ties keep first-seen order.
pub fn distribution(entries: &[PoolEntry]) -> Vec<ArchetypeShare> {
    let mut counts: Vec<(Archetype, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(a, _)| *a == entry.archetype) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.archetype, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let n = entries.len().max(1) as f64;
    counts
        .into_iter()
        .map(|(archetype, count)| ArchetypeShare {
            archetype,
            count,
            pct: round_to(count as f64 / n * 100.0, 1),
        })
        .collect()
}

/// Summarise a pool of profiled brackets.
///
/// # Arguments
/// * `entries` - Pool entries, already classified
///
/// # Returns
/// Archetype distribution, averages (3 decimals), top three by shareability,
/// percentile thresholds and superlatives. `EmptyPool` when `entries` is empty.
pub fn summarize_pool(entries: &[PoolEntry]) -> Result<PoolSummary> {
    if entries.is_empty() {
        return Err(MadnessError::EmptyPool);
    }
    let n = entries.len() as f64;
    let avg = |f: fn(&Scores) -> f64| round_to(entries.iter().map(|e| f(&e.scores)).sum::<f64>() / n, 3);

    let avg_scores = Scores {
        overconfidence: avg(|s| s.overconfidence),
        chaos_addiction: avg(|s| s.chaos_addiction),
        brand_bias: avg(|s| s.brand_bias),
        narrative_bias: avg(|s| s.narrative_bias),
        collapse_risk: avg(|s| s.collapse_risk),
    };

    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.shareability_score.total_cmp(&a.shareability_score));
    ranked.truncate(3);

    let summary = PoolSummary {
        n: entries.len(),
        distribution: distribution(entries),
        avg_scores,
        top3: ranked,
        thresholds: PoolThresholds::from_scores(entries.iter().map(|e| &e.scores)),
        superlatives: superlatives(entries)?,
    };
    log::info!(
        "pool of {}: avg collapse {:.2}, avg chaos {:.2}",
        summary.n,
        summary.avg_scores.collapse_risk,
        summary.avg_scores.chaos_addiction
    );
    Ok(summary)
}

/// Re-label every entry against the pool's own percentiles.
pub fn reclassify_pool(entries: &mut [PoolEntry]) -> PoolThresholds {
    let thresholds = PoolThresholds::from_scores(entries.iter().map(|e| &e.scores));
    let cutoffs = thresholds.classifier();
    for entry in entries.iter_mut() {
        entry.archetype = classify(&entry.scores, &cutoffs);
    }
    thresholds
}

/// Result of a pool run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolRun {
    /// Leaderboard, most shareable first
    pub entries: Vec<PoolEntry>,
    pub summary: PoolSummary,
    pub duel: Duel,
}

/// Profile `count` brackets (seeds `first_seed..`) and summarise them as a pool.
pub fn run_pool(
    teams: &[Team],
    first_seed: u64,
    count: usize,
    options: &ProfileOptions,
) -> Result<PoolRun> {
    let count = count.max(1) as u64;
    let profiles: Vec<BracketProfile> = (0..count)
        .into_par_iter()
        .map(|i| profile_bracket(teams, first_seed.wrapping_add(i), options))
        .collect::<Result<Vec<_>>>()?;

    let mut entries: Vec<PoolEntry> = profiles.iter().map(PoolEntry::from).collect();
    entries.sort_by(|a, b| b.shareability_score.total_cmp(&a.shareability_score));

    reclassify_pool(&mut entries);
    let summary = summarize_pool(&entries)?;
    let duel = featured_duel(&entries, &summary.superlatives)?;

    Ok(PoolRun {
        entries,
        summary,
        duel,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::share::score_shareability;

    pub fn entry(seed: u64, scores: Scores) -> PoolEntry {
        let archetype = classify(&scores, &Thresholds::ABSOLUTE);
        let share = score_shareability(archetype, &scores, "", &[]);
        PoolEntry {
            seed,
            archetype,
            headline: String::new(),
            shareability_score: share.score,
            breakdown: share.breakdown,
            scores,
        }
    }

    fn uniform(v: f64) -> Scores {
        Scores {
            overconfidence: v,
            chaos_addiction: v,
            brand_bias: v,
            narrative_bias: v,
            collapse_risk: v,
        }
    }

    #[test]
    fn test_percentile_linear() {
        let xs = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&xs, 0.0), 1.0);
        assert_eq!(percentile(&xs, 1.0), 4.0);
        assert!((percentile(&xs, 0.75) - 3.25).abs() < 1e-12);
        assert!((percentile(&xs, 0.25) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&[0.3], 0.75), 0.3);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[test]
    fn test_distribution_order() {
        let entries = vec![
            entry(1, uniform(0.5)),
            entry(2, Scores { chaos_addiction: 0.9, ..uniform(0.5) }),
            entry(3, uniform(0.5)),
        ];
        let dist = distribution(&entries);
        assert_eq!(dist[0].archetype, entries[0].archetype);
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].pct, 66.7);
        assert_eq!(dist[1].archetype, Archetype::ChaosGoblin);
    }

    #[test]
    fn test_superlatives_first_wins_ties() {
        let entries = vec![entry(10, uniform(0.4)), entry(11, uniform(0.4)), entry(12, uniform(0.2))];
        let s = superlatives(&entries).unwrap();
        assert_eq!(s.most_chaos.seed, 10);
        assert_eq!(s.quiet_assassin.seed, 12);
        assert_eq!(s.quiet_assassin.value, 0.2);
        // 0.24 + 0.24 + 0.24 beats 0.12 + 0.32 + 0.12
        assert_eq!(s.safest_but_dead.seed, 10);
    }

    #[test]
    fn test_empty_pool() {
        assert!(matches!(summarize_pool(&[]), Err(MadnessError::EmptyPool)));
    }

    #[test]
    fn test_reclassify_uses_percentiles() {
        let mut entries: Vec<PoolEntry> = (0..8)
            .map(|i| {
                let v = 0.05 + i as f64 * 0.05;
                entry(i, Scores { chaos_addiction: v, ..uniform(0.3) })
            })
            .collect();
        // nobody clears the absolute 0.62 chaos floor
        assert!(entries.iter().all(|e| e.archetype != Archetype::ChaosGoblin));
        let t = reclassify_pool(&mut entries);
        assert!(t.chaos_p75 < 0.62);
        let goblins = entries.iter().filter(|e| e.archetype == Archetype::ChaosGoblin).count();
        assert_eq!(goblins, 2);
    }

    #[test]
    fn test_summary_fields() {
        let entries: Vec<PoolEntry> = (0..5).map(|i| entry(i, uniform(i as f64 / 5.0))).collect();
        let summary = summarize_pool(&entries).unwrap();
        assert_eq!(summary.n, 5);
        assert_eq!(summary.avg_scores.collapse_risk, 0.4);
        assert_eq!(summary.top3.len(), 3);
        assert!(summary.top3[0].shareability_score >= summary.top3[1].shareability_score);
        let total: usize = summary.distribution.iter().map(|d| d.count).sum();
        assert_eq!(total, 5);
    }
}
