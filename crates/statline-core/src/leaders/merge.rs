//! Normalization of raw leader responses and the cross-season merge.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{DataSource, LeaderRecord, LeadersResponse, PlayerTotals, StatDescriptor};

use super::era;

/// Why a season's live data was rejected in favor of fallback data.
/// Collapsed to plain records at the public boundary, but kept distinct
/// here so tests can tell the causes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FallbackReason {
    /// The remote call failed outright (network, HTTP, malformed JSON)
    #[error("remote request failed")]
    RemoteError,
    /// Valid JSON, but the expected leader container was missing or empty
    #[error("response missing expected leader data")]
    ShapeMismatch,
    /// A value exceeded the statistic's single-season plausibility
    /// ceiling; the source likely substituted career totals
    #[error("value exceeds single-season plausibility ceiling")]
    Implausible,
}

/// Map one raw response into ranked `LeaderRecord`s for one season.
///
/// Entries with no player name are dropped; unparseable values are
/// dropped; a value above the statistic's ceiling rejects the whole
/// response as implausible.
pub fn leaders_from_response(
    stat: &StatDescriptor,
    season: i32,
    resp: &LeadersResponse,
) -> Result<Vec<LeaderRecord>, FallbackReason> {
    let category = resp
        .league_leaders
        .first()
        .ok_or(FallbackReason::ShapeMismatch)?;
    if category.leaders.is_empty() {
        return Err(FallbackReason::ShapeMismatch);
    }

    let mut records = Vec::with_capacity(category.leaders.len());
    for (idx, raw) in category.leaders.iter().enumerate() {
        let Some(name) = raw
            .person
            .as_ref()
            .and_then(|p| p.full_name.as_deref())
            .filter(|n| !n.is_empty())
        else {
            debug!(stat = stat.key, season, "Dropping leader with no name");
            continue;
        };

        let Some(value) = raw.value.as_deref().and_then(|v| stat.parse_value(v)) else {
            debug!(stat = stat.key, season, name, "Dropping unparseable value");
            continue;
        };

        if !crate::fallback::plausible(stat, value) {
            debug!(
                stat = stat.key,
                season, name, value, "Implausible single-season value"
            );
            return Err(FallbackReason::Implausible);
        }

        let rank = (idx + 1) as u32;
        records.push(LeaderRecord {
            player_name: name.to_string(),
            player_id: raw.person.as_ref().and_then(|p| p.id),
            team_id: raw.team.as_ref().and_then(|t| t.id),
            team_name: raw.team.as_ref().and_then(|t| t.name.clone()),
            league: raw.league.as_ref().and_then(|l| l.abbreviation.clone()),
            value,
            stat_key: stat.key.to_string(),
            season,
            rank,
            status: era::classify(rank, name, value, season).to_string(),
            source: DataSource::Live,
        });
    }

    if records.is_empty() {
        return Err(FallbackReason::ShapeMismatch);
    }
    Ok(records)
}

/// Fold per-season leader lists into cross-season totals, ranked by
/// accumulated value.
///
/// The fold is order-independent across seasons: totals sum, appearances
/// count, and the seasons list is sorted ascending afterwards. The one
/// order-sensitive rule is that the first id seen for a player is kept; we
/// feed seasons in via a BTreeMap so "first" is well-defined regardless of
/// fetch completion order.
///
/// Players that never appeared with an id are excluded from the ranked
/// output even though their values participated in the merge. Ties on the
/// total break by player name ascending so output is deterministic.
pub fn accumulate(by_season: &BTreeMap<i32, Vec<LeaderRecord>>, limit: usize) -> Vec<PlayerTotals> {
    let mut totals: BTreeMap<String, PlayerTotals> = BTreeMap::new();

    for records in by_season.values() {
        for record in records {
            let entry = totals
                .entry(record.player_name.clone())
                .or_insert_with(|| PlayerTotals {
                    player_name: record.player_name.clone(),
                    player_id: None,
                    total: 0.0,
                    appearances: 0,
                    seasons: Vec::new(),
                });
            entry.total += record.value;
            entry.appearances += 1;
            entry.seasons.push(record.season);
            if entry.player_id.is_none() {
                entry.player_id = record.player_id;
            }
        }
    }

    let mut ranked: Vec<PlayerTotals> = totals
        .into_values()
        .filter(|t| t.player_id.is_some())
        .collect();

    for t in &mut ranked {
        t.seasons.sort_unstable();
    }

    ranked.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    ranked.truncate(limit);
    ranked
}
