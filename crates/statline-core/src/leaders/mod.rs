//! Leader aggregation: season fan-out, normalization, merge, and ranking.
//!
//! The [`LeaderboardService`] is the public face of this crate. It issues
//! cache-wrapped fetches per season, normalizes raw responses into
//! `LeaderRecord`s, and folds them into cross-season `PlayerTotals`. No
//! error ever crosses its leader-facing boundary; failures degrade to
//! fallback or empty data, flagged by `DataSource`.

pub mod era;
pub mod merge;
pub mod season;
pub mod service;

pub use merge::FallbackReason;
pub use service::{LeaderboardService, TopPlayers};
