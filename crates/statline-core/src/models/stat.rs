//! The registry of trackable statistics.
//!
//! One `StatDescriptor` per statistic, defined once as a `const` slice and
//! shared by reference. The descriptor carries everything the rest of the
//! crate needs to fetch, parse, sanity-check, and display a statistic.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory {
    Batting,
    Pitching,
}

impl StatCategory {
    /// The `statGroup` query parameter the remote API expects.
    pub fn remote_group(&self) -> &'static str {
        match self {
            StatCategory::Batting => "hitting",
            StatCategory::Pitching => "pitching",
        }
    }
}

/// How raw leader values are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Whole-number accumulations (home runs, hits, strikeouts)
    Count,
    /// Ratio statistics parsed at full float precision (AVG, ERA)
    Rate,
}

#[derive(Debug)]
pub struct StatDescriptor {
    /// Stable identifier used in cache keys and fallback lookups
    pub key: &'static str,
    pub label: &'static str,
    pub abbreviation: &'static str,
    /// Parameter name the remote API uses for this statistic
    pub remote_param: &'static str,
    pub category: StatCategory,
    /// Chart/series color for the UI layer
    pub display_color: &'static str,
    pub kind: StatKind,
    pub format: fn(f64) -> String,
    pub lower_is_better: bool,
    /// Highest value plausible for a single season. A remote value above
    /// this almost certainly means the source substituted a career total.
    pub season_ceiling: Option<f64>,
}

impl StatDescriptor {
    /// Parse a raw leader value according to this statistic's kind.
    pub fn parse_value(&self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        match self.kind {
            StatKind::Count => trimmed
                .replace(',', "")
                .parse::<i64>()
                .ok()
                .map(|v| v as f64),
            StatKind::Rate => trimmed.parse::<f64>().ok(),
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        (self.format)(value)
    }
}

fn format_count(value: f64) -> String {
    format!("{}", value as i64)
}

/// Batting averages display without the leading zero: .306, not 0.306.
fn format_average(value: f64) -> String {
    let s = format!("{:.3}", value);
    s.strip_prefix('0').map(str::to_string).unwrap_or(s)
}

fn format_era(value: f64) -> String {
    format!("{:.2}", value)
}

pub const REGISTRY: &[StatDescriptor] = &[
    StatDescriptor {
        key: "homeRuns",
        label: "Home Runs",
        abbreviation: "HR",
        remote_param: "homeRuns",
        category: StatCategory::Batting,
        display_color: "#d32f2f",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        // Single-season record is 73
        season_ceiling: Some(75.0),
    },
    StatDescriptor {
        key: "rbi",
        label: "Runs Batted In",
        abbreviation: "RBI",
        remote_param: "rbi",
        category: StatCategory::Batting,
        display_color: "#1976d2",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        // Single-season record is 191
        season_ceiling: Some(200.0),
    },
    StatDescriptor {
        key: "hits",
        label: "Hits",
        abbreviation: "H",
        remote_param: "hits",
        category: StatCategory::Batting,
        display_color: "#388e3c",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        // Single-season record is 262
        season_ceiling: Some(270.0),
    },
    StatDescriptor {
        key: "stolenBases",
        label: "Stolen Bases",
        abbreviation: "SB",
        remote_param: "stolenBases",
        category: StatCategory::Batting,
        display_color: "#f57c00",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        season_ceiling: Some(150.0),
    },
    StatDescriptor {
        key: "battingAverage",
        label: "Batting Average",
        abbreviation: "AVG",
        remote_param: "battingAverage",
        category: StatCategory::Batting,
        display_color: "#7b1fa2",
        kind: StatKind::Rate,
        format: format_average,
        lower_is_better: false,
        season_ceiling: Some(0.5),
    },
    StatDescriptor {
        key: "strikeouts",
        label: "Strikeouts",
        abbreviation: "SO",
        remote_param: "strikeOuts",
        category: StatCategory::Pitching,
        display_color: "#c2185b",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        season_ceiling: Some(450.0),
    },
    StatDescriptor {
        key: "wins",
        label: "Wins",
        abbreviation: "W",
        remote_param: "wins",
        category: StatCategory::Pitching,
        display_color: "#00796b",
        kind: StatKind::Count,
        format: format_count,
        lower_is_better: false,
        season_ceiling: Some(45.0),
    },
    StatDescriptor {
        key: "era",
        label: "Earned Run Average",
        abbreviation: "ERA",
        remote_param: "earnedRunAverage",
        category: StatCategory::Pitching,
        display_color: "#5d4037",
        kind: StatKind::Rate,
        format: format_era,
        lower_is_better: true,
        season_ceiling: None,
    },
];

pub fn registry() -> &'static [StatDescriptor] {
    REGISTRY
}

pub fn find_stat(key: &str) -> Option<&'static StatDescriptor> {
    REGISTRY.iter().find(|s| s.key == key)
}
