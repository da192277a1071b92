use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::api::{IdentityResolver, LookupError, StatsFetcher};
use crate::data::player_stats::{aggregate, PlayerStats};

pub const FRESHNESS: Duration = Duration::from_secs(180);

struct CacheEntry {
    stats: PlayerStats,
    fetched_at: Instant,
}

/// Aggregated stats by display name, exactly as typed.
///
/// Two lookups racing on the same cold name both go upstream; the later write wins.
pub struct ResponseCache {
    identity: Arc<dyn IdentityResolver>,
    fetcher: Arc<dyn StatsFetcher>,
    freshness: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        fetcher: Arc<dyn StatsFetcher>,
        freshness: Duration,
    ) -> Self {
        Self {
            identity,
            fetcher,
            freshness,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_fetch(&self, display_name: &str) -> Result<PlayerStats, LookupError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(display_name) {
                if entry.fetched_at.elapsed() <= self.freshness {
                    tracing::debug!(player = display_name, "cache hit");
                    return Ok(entry.stats.clone());
                }
            }
        }

        let uuid = self.identity.resolve(display_name).await?;
        let raw = self.fetcher.fetch(&uuid).await?;
        let stats = aggregate(&raw);

        tracing::debug!(player = display_name, uuid = %uuid, "fetched upstream stats");
        self.entries.write().await.insert(
            display_name.to_string(),
            CacheEntry {
                stats: stats.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(stats)
    }

    #[cfg(test)]
    pub async fn fetched_at(&self, display_name: &str) -> Option<Instant> {
        self.entries.read().await.get(display_name).map(|e| e.fetched_at)
    }
}
