/// Number of entrants in a full field
pub const FIELD_SIZE: usize = 64;

/// Entrants sharing each seed value (one per region)
pub const TEAMS_PER_SEED: usize = 4;

/// Lowest and highest seed numbers
pub const MIN_SEED: u8 = 1;
pub const MAX_SEED: u8 = 16;

/// Rounds in a 64-entrant single-elimination tournament
pub const ROUNDS: u8 = 6;

/// Games in round 1
pub const FIRST_ROUND_GAMES: usize = 32;

/// Canonical first-round seed matchups, applied once per region
pub const SEED_MATCHUPS: [(u8, u8); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];

/// Latent strength weights
pub const MOMENTUM_WEIGHT: f64 = 0.45;
pub const HYPE_WEIGHT: f64 = 0.20;
pub const PRESSURE_WEIGHT: f64 = 0.20;
pub const BRAND_WEIGHT: f64 = 0.15;
pub const SEED_ADVANTAGE_WEIGHT: f64 = 0.10;

/// Seed gap divisor for the seed-advantage tilt
pub const SEED_TILT_SCALE: f64 = 30.0;

/// Logistic steepness applied to the strength difference
pub const LOGISTIC_STEEPNESS: f64 = 4.2;

/// Chaos noise amplitude on the win probability
pub const CHAOS_NOISE_SCALE: f64 = 0.18;

/// Reality samples are calmer than human picking
pub const REALITY_CHAOS_DAMPING: f64 = 0.55;

/// Chaos multiplier per round (rounds 1..=6); deeper rounds punish chaos
pub const ROUND_CHAOS_MULT: [f64; 6] = [1.15, 1.05, 0.95, 0.85, 0.75, 0.65];

/// Persona nudges (log-odds units per unit of trait offset from 0.5)
pub const RISK_PUSH_SCALE: f64 = 1.25;
pub const RISK_PUSH_LAST_ROUND: u8 = 2;
pub const CONTRARIAN_SCALE: f64 = 0.30;
pub const NARRATIVE_SCALE: f64 = 0.70;
pub const BRAND_LOYALTY_SCALE: f64 = 0.70;

/// Round-1 hype nudge toward underdogs in pick mode
pub const HYPE_UNDERDOG_THRESHOLD: f64 = 0.70;
pub const HYPE_UNDERDOG_NUDGE: f64 = 0.04;

/// Tagging thresholds
pub const CHOKE_PRESSURE: f64 = 0.75;
pub const CHOKE_MIN_ROUND: u8 = 2;
pub const BIG_UPSET_GAP: u8 = 6;

/// Persona Beta shapes (alpha, beta)
pub const RISK_TOLERANCE_SHAPE: (f64, f64) = (2.0, 2.6);
pub const NARRATIVE_CHASING_SHAPE: (f64, f64) = (2.2, 2.2);
pub const BRAND_LOYALTY_SHAPE: (f64, f64) = (2.6, 2.0);
pub const CONTRARIAN_SHAPE: (f64, f64) = (1.8, 3.0);

/// Collapse-risk Monte Carlo
pub const MIN_SIMULATIONS: usize = 80;
pub const DEFAULT_SIMULATIONS: usize = 400;
pub const DEFAULT_MONTE_CARLO_SEED: u64 = 1337;

/// Per-round credit is `ROUND_WEIGHT_BASE + round * ROUND_WEIGHT_STEP`
pub const ROUND_WEIGHT_BASE: f64 = 0.7;
pub const ROUND_WEIGHT_STEP: f64 = 0.25;

/// Chaos multiplier for a round; rounds outside 1..=6 are unscaled
pub fn round_chaos_mult(round: u8) -> f64 {
    match round {
        1..=6 => ROUND_CHAOS_MULT[(round - 1) as usize],
        _ => 1.0,
    }
}

/// Agreement credit for one resolved slot in `round`
pub fn round_weight(round: u8) -> f64 {
    ROUND_WEIGHT_BASE + f64::from(round) * ROUND_WEIGHT_STEP
}

/// Clamp to the unit interval
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
