//! HTTP client module for the MLB Stats API.
//!
//! This module provides the `StatsApiClient` for fetching leader lists and
//! player year-by-year stats. The API is public and unauthenticated; all
//! requests are plain GETs with query parameters.

pub mod client;
pub mod error;

pub use client::{LeaderSource, StatsApiClient};
pub use error::ApiError;
