use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client as RedisClient, RedisResult};
use tracing::info;

use crate::cache::Cache;

/// Redis-backed cache sharing one multiplexed connection across requests.
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
}

impl RedisCache {
    pub async fn connect(client: &RedisClient) -> RedisResult<Self> {
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis connection established");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> RedisResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, ttl_secs).await
    }

    async fn delete(&self, keys: &[String]) -> RedisResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let _: u64 = conn.del(keys).await?;
        Ok(())
    }

    async fn hincr(&self, key: &str, field: &str, delta: i64) -> RedisResult<i64> {
        let mut conn = self.conn.clone();
        conn.hincr(key, field, delta).await
    }
}
