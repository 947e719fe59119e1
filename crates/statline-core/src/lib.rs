//! statline-core - core library for the statline dashboard.
//!
//! Queries the public MLB Stats API for leader lists and player stats,
//! caches responses in a small local key-value store with TTL expiry, and
//! aggregates per-season leader lists into cross-season rankings for the
//! UI layer.
//!
//! The public entry point is [`LeaderboardService`]. Its leader-facing
//! operations never return errors: remote failures, malformed responses,
//! and implausible values all degrade to cached, fallback, or empty data,
//! with each record's [`DataSource`] flag telling callers which they got.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod fallback;
pub mod leaders;
pub mod models;
pub mod store;

pub use api::{ApiError, LeaderSource, StatsApiClient};
pub use cache::{ExpiringCache, DEFAULT_TTL, HISTORICAL_TTL};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use leaders::{FallbackReason, LeaderboardService, TopPlayers};
pub use models::{
    find_stat, registry, DataSource, LeaderRecord, PlayerTotals, SeasonStat, StatCategory,
    StatDescriptor, StatKind,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
