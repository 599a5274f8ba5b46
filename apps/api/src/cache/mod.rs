//! Cache access, key naming and the two cache middlewares.
//!
//! Handlers never delete keys themselves. They attach a [`CacheInvalidation`]
//! to the response and `middleware::invalidate_cache` removes the keys once the
//! handler has finished.

use async_trait::async_trait;
use redis::RedisResult;

pub mod middleware;
pub mod redis_cache;

#[cfg(test)]
pub mod memory;

/// Hash holding the service-wide counters.
pub const STATS_HASH: &str = "resume";
pub const DOWNLOAD_FIELD: &str = "download";

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> RedisResult<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> RedisResult<()>;

    async fn delete(&self, keys: &[String]) -> RedisResult<()>;

    /// Adds `delta` to `field` of hash `key`, returning the new value.
    async fn hincr(&self, key: &str, field: &str, delta: i64) -> RedisResult<i64>;
}

/// Builds namespaced cache keys.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    namespace: String,
}

impl CacheKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}:{name}", self.namespace)
    }

    /// Key of the cached public resume body for `resume_hash`.
    pub fn public_resume(&self, resume_hash: &str) -> String {
        self.key(&format!("resume.{resume_hash}"))
    }

    pub fn session(&self, sid: &str) -> String {
        self.key(&format!("session:{sid}"))
    }
}

/// Response extension listing keys to drop after the handler ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheInvalidation(pub Vec<String>);

/// Response extension marking a body as safe to store under `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cacheable {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let keys = CacheKeys::new("app");
        assert_eq!(keys.public_resume("abc"), "app:resume.abc");
        assert_eq!(keys.session("s1"), "app:session:s1");
    }
}
