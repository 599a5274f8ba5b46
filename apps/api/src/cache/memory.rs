use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use redis::{ErrorKind, RedisError, RedisResult};

use crate::cache::Cache;

#[derive(Default)]
pub struct MemoryCache {
    values: Mutex<HashMap<String, String>>,
    hashes: Mutex<HashMap<(String, String), i64>>,
    deleted: Mutex<Vec<String>>,
    counters_down: AtomicBool,
}

impl MemoryCache {
    pub fn put(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().unwrap().contains_key(key)
    }

    pub fn counter(&self, key: &str, field: &str) -> i64 {
        self.hashes
            .lock()
            .unwrap()
            .get(&(key.to_string(), field.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Makes every later `hincr` fail.
    pub fn fail_counters(&self) {
        self.counters_down.store(true, Ordering::SeqCst);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set_ex(&self, key: &str, value: &str, _ttl_secs: u64) -> RedisResult<()> {
        self.put(key, value);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> RedisResult<()> {
        let mut values = self.values.lock().unwrap();
        let mut deleted = self.deleted.lock().unwrap();
        for key in keys {
            values.remove(key);
            deleted.push(key.clone());
        }
        Ok(())
    }

    async fn hincr(&self, key: &str, field: &str, delta: i64) -> RedisResult<i64> {
        if self.counters_down.load(Ordering::SeqCst) {
            return Err(RedisError::from((ErrorKind::IoError, "counter unavailable")));
        }
        let mut hashes = self.hashes.lock().unwrap();
        let counter = hashes
            .entry((key.to_string(), field.to_string()))
            .or_insert(0);
        *counter += delta;
        Ok(*counter)
    }
}
