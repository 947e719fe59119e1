//! Era/status classifier for leader records.
//!
//! Pure and order-sensitive: rules are evaluated top to bottom and the
//! first match wins. The full rule table is documented in the test module
//! so a reordering shows up as a test failure, not a silent label change.

pub const ALL_TIME_RECORD: &str = "All-Time Record";
pub const MODERN_ERA: &str = "Modern Era";

/// Specific player/value combinations that carry a label of their own,
/// checked before the generic era ranges.
const NAMED_OVERRIDES: &[(&str, f64, &str)] = &[
    ("Barry Bonds", 73.0, "Single-Season Record"),
    ("Mark McGwire", 70.0, "Steroid Era Record"),
    ("Roger Maris", 61.0, "Expansion Era Record"),
    ("Babe Ruth", 60.0, "Live Ball Era Record"),
    ("Hack Wilson", 191.0, "Live Ball Era Record"),
    ("Ichiro Suzuki", 262.0, "Single-Season Record"),
    ("Rickey Henderson", 130.0, "Expansion Era Record"),
    ("Nolan Ryan", 383.0, "Single-Season Record"),
];

/// Season ranges, inclusive, in priority order.
const ERA_RANGES: &[(i32, i32, &str)] = &[
    (0, 1919, "Dead Ball Era"),
    (1920, 1946, "Live Ball Era"),
    (1947, 1960, "Integration Era"),
    (1961, 1993, "Expansion Era"),
    (1994, 2005, "Steroid Era"),
];

/// Classify one record. Rank 0 is reserved for the all-time record holder
/// in the fallback datasets and always wins.
pub fn classify(rank: u32, player_name: &str, value: f64, season: i32) -> &'static str {
    if rank == 0 {
        return ALL_TIME_RECORD;
    }

    for &(name, v, label) in NAMED_OVERRIDES {
        if player_name == name && (value - v).abs() < f64::EPSILON {
            return label;
        }
    }

    for &(from, to, label) in ERA_RANGES {
        if (from..=to).contains(&season) {
            return label;
        }
    }

    MODERN_ERA
}
