//! Expiring cache over the local key-value store.
//!
//! This module provides [`ExpiringCache`], a namespaced TTL cache for
//! serialized API data, plus the two fetch wrappers built on it:
//!
//! - `cached_fetch`: cache-aside; a hit never touches the network
//! - `stale_while_revalidate`: returns the cached value immediately and
//!   refreshes in the background, notifying only on change
//!
//! Default TTL is one hour; completed seasons use a 24 hour TTL since the
//! data no longer changes.

pub mod expiring;
pub mod fetch;

pub use expiring::{ExpiringCache, DEFAULT_TTL, HISTORICAL_TTL};
