//! Expiring-map trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Key-value store whose entries disappear once their TTL elapses
///
/// This trait uses strings internally to be dyn-compatible. Use the
/// [`CacheExt`] helpers for typed get/set operations.
///
/// A missing or expired key is `Ok(None)`. Connectivity failures are errors,
/// never misses.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw value from the cache. Reading never extends the TTL.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw value in the cache with a TTL, replacing any previous value
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Verifies the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;

    /// Short backend name for logs and health checks
    fn backend_name(&self) -> &'static str;
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache(format!("Failed to deserialize cache value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache with a TTL
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for testing, driven by a manual clock
    #[derive(Debug, Default)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, (String, Duration)>>,
        now: Mutex<Duration>,
        get_error: Mutex<Option<String>>,
        set_error: Mutex<Option<String>>,
        writes: Mutex<usize>,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry<V: Serialize>(self, key: &str, value: &V, ttl: Duration) -> Self {
            let json = serde_json::to_string(value).unwrap();
            self.with_raw_entry(key, &json, ttl)
        }

        pub fn with_raw_entry(self, key: &str, value: &str, ttl: Duration) -> Self {
            let expires_at = *self.now.lock().unwrap() + ttl;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), expires_at));
            self
        }

        /// Fails every read with the given message
        pub fn with_get_error(self, error: impl Into<String>) -> Self {
            *self.get_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fails every write with the given message
        pub fn with_set_error(self, error: impl Into<String>) -> Self {
            *self.set_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Moves the manual clock forward
        pub fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }

        /// Number of successful writes
        pub fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        /// TTL left on a key at the current manual time
        pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
            let now = *self.now.lock().unwrap();
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .and_then(|(_, expires_at)| expires_at.checked_sub(now))
                .filter(|remaining| !remaining.is_zero())
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            if let Some(error) = self.get_error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }

            let now = *self.now.lock().unwrap();
            let mut entries = self.entries.lock().unwrap();

            let expired =
                matches!(entries.get(key), Some((_, expires_at)) if *expires_at <= now);

            if expired {
                entries.remove(key);
                return Ok(None);
            }

            Ok(entries.get(key).map(|(value, _)| value.clone()))
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
            if let Some(error) = self.set_error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }

            let expires_at = *self.now.lock().unwrap() + ttl;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), expires_at));
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            match self.get_error.lock().unwrap().clone() {
                Some(error) => Err(DomainError::cache(error)),
                None => Ok(()),
            }
        }

        fn backend_name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_cache_set_get() {
            let cache = MockCache::new();
            cache
                .set("key1", &"value1", Duration::from_secs(60))
                .await
                .unwrap();

            let result: Option<String> = cache.get("key1").await.unwrap();
            assert_eq!(result, Some("value1".to_string()));
            assert_eq!(cache.writes(), 1);
        }

        #[tokio::test]
        async fn test_mock_cache_get_missing() {
            let cache = MockCache::new();

            let result: Option<String> = cache.get("missing").await.unwrap();
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_expires_on_clock() {
            let cache = MockCache::new().with_entry("key", &"value", Duration::from_secs(10));

            cache.advance(Duration::from_secs(9));
            assert!(cache.get_raw("key").await.unwrap().is_some());
            assert_eq!(cache.remaining_ttl("key"), Some(Duration::from_secs(1)));

            cache.advance(Duration::from_secs(1));
            assert!(cache.get_raw("key").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_with_errors() {
            let cache = MockCache::new().with_get_error("connection refused");
            assert!(cache.get_raw("key").await.is_err());
            assert!(cache.ping().await.is_err());

            let cache = MockCache::new().with_set_error("read only replica");
            assert!(cache.set_raw("key", "v", Duration::from_secs(1)).await.is_err());
            assert_eq!(cache.writes(), 0);
        }

        #[tokio::test]
        async fn test_typed_get_rejects_garbage() {
            let cache =
                MockCache::new().with_raw_entry("key", "not json", Duration::from_secs(60));

            let result: Result<Option<Vec<String>>, _> = cache.get("key").await;
            assert!(matches!(result, Err(DomainError::Cache { .. })));
        }
    }
}
