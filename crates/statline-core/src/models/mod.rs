//! Data models for stat-leader data.
//!
//! This module contains:
//!
//! - `StatDescriptor` and the immutable stat registry
//! - Domain types handed to the UI layer: `LeaderRecord`, `PlayerTotals`,
//!   `SeasonStat`
//! - Raw wire types mirroring the MLB Stats API response shapes

pub mod leader;
pub mod response;
pub mod stat;

pub use leader::{DataSource, LeaderRecord, PlayerTotals, SeasonStat};
pub use response::{
    LeaderCategory, LeadersResponse, PeopleResponse, RawLeader, RawLeague, RawPerson, RawPlayer,
    RawSplit, RawStatBlock, RawTeam,
};
pub use stat::{find_stat, registry, StatCategory, StatDescriptor, StatKind};
