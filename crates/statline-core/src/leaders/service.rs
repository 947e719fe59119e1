//! The leaderboard service: cache-wrapped fetches, season fan-out, and
//! the operations exposed to the UI layer.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::{LeaderSource, StatsApiClient};
use crate::cache::{ExpiringCache, DEFAULT_TTL, HISTORICAL_TTL};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::fallback;
use crate::models::{find_stat, LeaderRecord, PlayerTotals, SeasonStat, StatDescriptor};
use crate::store::FileStore;

use super::{merge, season};

/// Batch size for per-player trajectory fetches. Processing in fixed
/// batches bounds peak in-flight requests against the remote source.
const MAX_CONCURRENT: usize = 5;

/// Cross-season aggregation result: each season's ranked leader list plus
/// the merged ranking by accumulated total.
#[derive(Debug, Clone)]
pub struct TopPlayers {
    pub seasons: BTreeMap<i32, Vec<LeaderRecord>>,
    pub ranked: Vec<PlayerTotals>,
}

/// Public face of the crate, generic over the fetch seam so tests can
/// inject a stub source.
#[derive(Clone)]
pub struct LeaderboardService<S: LeaderSource = StatsApiClient> {
    source: S,
    cache: ExpiringCache,
    clock: Arc<dyn Clock>,
    /// TTL applied to current-season entries; completed seasons always use
    /// [`HISTORICAL_TTL`].
    default_ttl: Duration,
}

impl LeaderboardService<StatsApiClient> {
    /// Wire up the default production stack: file-backed store under the
    /// user cache dir, system clock, public API endpoint (or the
    /// configured override).
    pub fn open_default() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let store = Arc::new(FileStore::new(config.cache_dir()?)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let source = match config.base_url.as_deref() {
            Some(url) => StatsApiClient::with_base_url(url)?,
            None => StatsApiClient::new()?,
        };
        let cache = ExpiringCache::new(store, clock.clone());
        // Startup is a natural point to reclaim space from expired entries
        cache.sweep_expired();
        info!("Leaderboard service ready");
        let mut svc = Self::new(source, cache, clock);
        if let Some(secs) = config.cache_ttl_secs {
            svc.default_ttl = Duration::from_secs(secs);
        }
        Ok(svc)
    }
}

impl<S: LeaderSource> LeaderboardService<S> {
    pub fn new(source: S, cache: ExpiringCache, clock: Arc<dyn Clock>) -> Self {
        Self { source, cache, clock, default_ttl: DEFAULT_TTL }
    }

    /// The season leader boards currently refer to. January through April
    /// map to the previous calendar year.
    pub fn current_season(&self) -> i32 {
        season::current_season(self.clock.as_ref())
    }

    /// The last `n` seasons, current first.
    pub fn last_seasons(&self, n: usize) -> Vec<i32> {
        season::last_seasons(self.clock.as_ref(), n)
    }

    fn ttl_for(&self, season: i32) -> Duration {
        // Completed seasons never change
        if season < self.current_season() {
            HISTORICAL_TTL
        } else {
            self.default_ttl
        }
    }

    /// Fetch and normalize one season's leader list, cache-aside wrapped.
    /// Rejections surface as `FallbackReason` so callers choose how to
    /// degrade; nothing is cached on rejection.
    async fn fetch_season(
        &self,
        stat: &'static StatDescriptor,
        season: i32,
        limit: usize,
    ) -> Result<Vec<LeaderRecord>, merge::FallbackReason> {
        let key = format!("leaders:{}:{}:{}", stat.key, season, limit);
        let source = &self.source;

        self.cache
            .cached_fetch(&key, self.ttl_for(season), || async move {
                let resp = source
                    .leaders(stat.remote_param, stat.category.remote_group(), season, limit)
                    .await?;
                Ok(merge::leaders_from_response(stat, season, &resp)?)
            })
            .await
            .map_err(|e| {
                warn!(stat = stat.key, season, error = %e, "Season leaders unavailable");
                // Normalization rejections keep their cause; anything else
                // was a remote failure
                e.downcast_ref::<merge::FallbackReason>()
                    .copied()
                    .unwrap_or(merge::FallbackReason::RemoteError)
            })
    }

    /// Ranked leader list for one statistic in one season. On any failure
    /// the literal all-time dataset is returned instead, flagged
    /// `DataSource::Fallback`; callers never see an error.
    pub async fn season_leaders(
        &self,
        stat_key: &str,
        season: i32,
        limit: usize,
    ) -> Vec<LeaderRecord> {
        let Some(stat) = find_stat(stat_key) else {
            warn!(stat_key, "Unknown statistic");
            return Vec::new();
        };
        match self.fetch_season(stat, season, limit).await {
            Ok(records) => records,
            Err(reason) => {
                debug!(stat = stat.key, season, ?reason, "Serving fallback dataset");
                fallback::all_time_records(stat)
            }
        }
    }

    /// Stale-while-revalidate variant of [`season_leaders`]: returns the
    /// cached list immediately (possibly `None`), refreshes in the
    /// background, and calls `on_fresh` only if the refreshed list
    /// differs from what was returned.
    ///
    /// [`season_leaders`]: Self::season_leaders
    pub fn season_leaders_swr(
        &self,
        stat_key: &str,
        season: i32,
        limit: usize,
        on_fresh: impl FnOnce(Vec<LeaderRecord>) + Send + 'static,
    ) -> Option<Vec<LeaderRecord>> {
        let stat = find_stat(stat_key)?;
        let key = format!("leaders:{}:{}:{}", stat.key, season, limit);
        let source = self.source.clone();

        self.cache.stale_while_revalidate(
            &key,
            self.ttl_for(season),
            move || async move {
                let resp = source
                    .leaders(stat.remote_param, stat.category.remote_group(), season, limit)
                    .await?;
                Ok(merge::leaders_from_response(stat, season, &resp)?)
            },
            on_fresh,
        )
    }

    /// Top players by accumulated total over the last `n_seasons`.
    ///
    /// All season fetches run concurrently and every one settles before
    /// merging; a failed season contributes zero records rather than
    /// aborting its siblings or injecting cross-era fallback values into
    /// the totals.
    pub async fn top_players(&self, stat_key: &str, n_seasons: usize, limit: usize) -> TopPlayers {
        let Some(stat) = find_stat(stat_key) else {
            warn!(stat_key, "Unknown statistic");
            return TopPlayers { seasons: BTreeMap::new(), ranked: Vec::new() };
        };

        let season_list = self.last_seasons(n_seasons);
        let fetches = season_list
            .iter()
            .map(|&s| async move { (s, self.fetch_season(stat, s, limit).await) });
        let results = join_all(fetches).await;

        let mut seasons = BTreeMap::new();
        for (s, result) in results {
            match result {
                Ok(records) => {
                    seasons.insert(s, records);
                }
                Err(reason) => {
                    debug!(stat = stat.key, season = s, ?reason, "Season contributes no records");
                    seasons.insert(s, Vec::new());
                }
            }
        }

        let ranked = merge::accumulate(&seasons, limit);
        TopPlayers { seasons, ranked }
    }

    /// One player's year-by-year values for a statistic, season ascending.
    /// Failures degrade to an empty trajectory.
    pub async fn player_trajectory(&self, player_id: i64, stat_key: &str) -> Vec<SeasonStat> {
        let Some(stat) = find_stat(stat_key) else {
            warn!(stat_key, "Unknown statistic");
            return Vec::new();
        };

        let key = format!("trajectory:{}:{}", player_id, stat.key);
        let source = &self.source;
        let result = self
            .cache
            .cached_fetch(&key, HISTORICAL_TTL, || async move {
                let resp = source
                    .player_season_stats(player_id, stat.category.remote_group())
                    .await?;

                let mut points: Vec<SeasonStat> = resp
                    .people
                    .first()
                    .map(|p| p.stats.as_slice())
                    .unwrap_or_default()
                    .iter()
                    .flat_map(|block| &block.splits)
                    .filter_map(|split| {
                        let season = split.season.as_deref()?.parse::<i32>().ok()?;
                        let value = split.stat_value(stat.remote_param)?;
                        Some(SeasonStat { season, value })
                    })
                    .collect();
                points.sort_unstable_by_key(|p| p.season);
                Ok(points)
            })
            .await;

        match result {
            Ok(points) => points,
            Err(e) => {
                warn!(player_id, stat = stat.key, error = %e, "Trajectory unavailable");
                Vec::new()
            }
        }
    }

    /// Trajectories for many players, fetched in fixed-size batches so
    /// fan-out stays bounded. Players whose fetch fails are omitted.
    pub async fn trajectories(
        &self,
        stat_key: &str,
        player_ids: &[i64],
    ) -> HashMap<i64, Vec<SeasonStat>> {
        let mut out = HashMap::with_capacity(player_ids.len());
        for chunk in player_ids.chunks(MAX_CONCURRENT) {
            let fetches = chunk
                .iter()
                .map(|&id| async move { (id, self.player_trajectory(id, stat_key).await) });
            for (id, points) in join_all(fetches).await {
                if !points.is_empty() {
                    out.insert(id, points);
                }
            }
        }
        out
    }

    /// The current season's rank-1 leader, if any.
    pub async fn top_active_player(&self, stat_key: &str) -> Option<LeaderRecord> {
        let season = self.current_season();
        self.season_leaders(stat_key, season, 1).await.into_iter().next()
    }

    /// The literal all-time dataset for a statistic.
    pub fn all_time_records(&self, stat_key: &str) -> Vec<LeaderRecord> {
        match find_stat(stat_key) {
            Some(stat) => fallback::all_time_records(stat),
            None => Vec::new(),
        }
    }

    /// Drop every cached entry, forcing the next calls to refetch.
    pub fn clear_cache(&self) {
        self.cache.clear_all();
    }
}
