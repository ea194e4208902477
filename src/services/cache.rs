use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::GroupingResponse;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache of generated groupings
///
/// L1 is an in-process moka cache, L2 is Redis shared by every instance.
/// Entries are serialized once and stored as the same JSON in both tiers.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Arc<str>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Connect to Redis and build the in-process tier
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Cached groupings for a schedule, `None` on a miss in both tiers
    pub async fn get_groupings(&self, schedule_id: &str) -> Result<Option<GroupingResponse>, CacheError> {
        let key = CacheKey::groupings(schedule_id);

        if let Some(json) = self.l1_cache.get(&key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let stored: Option<String> = {
            let mut conn = self.redis.lock().await;
            let value: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut *conn).await?;
            value
        };

        match stored {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let response = serde_json::from_str(&json)?;
                self.l1_cache.insert(key, Arc::from(json)).await;
                Ok(Some(response))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Store freshly generated groupings in both tiers
    pub async fn put_groupings(&self, schedule_id: &str, response: &GroupingResponse) -> Result<(), CacheError> {
        let key = CacheKey::groupings(schedule_id);
        let json = serde_json::to_string(response)?;

        self.l1_cache.insert(key.clone(), Arc::from(json.as_str())).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async(&mut *conn)
            .await?;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a schedule's groupings from both tiers
    pub async fn evict_groupings(&self, schedule_id: &str) -> Result<(), CacheError> {
        let key = CacheKey::groupings(schedule_id);
        self.l1_cache.invalidate(&key).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("DEL")
            .arg(&key)
            .query_async(&mut *conn)
            .await?;

        tracing::debug!("Evicted cached groupings for schedule {}", schedule_id);
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a schedule's generated groupings
    pub fn groupings(schedule_id: &str) -> String {
        format!("groupings:{}", schedule_id)
    }
}
