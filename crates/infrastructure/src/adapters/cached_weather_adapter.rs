//! Cached weather history adapter - Decorator that adds caching to any `WeatherHistoryPort`
//!
//! Archive history for a past range does not change, so repeated predictions
//! for the same location reuse one fetch. Current conditions always pass
//! through.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherHistoryPort;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::WeatherObservation;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::CacheConfig;

/// Caching decorator for weather history ports
pub struct CachedWeatherHistoryAdapter<W: WeatherHistoryPort> {
    /// The underlying weather source
    inner: W,
    /// History keyed by location and range
    cache: Cache<String, Arc<Vec<WeatherObservation>>>,
    /// Whether caching is enabled
    enabled: bool,
}

impl<W: WeatherHistoryPort + std::fmt::Debug> std::fmt::Debug for CachedWeatherHistoryAdapter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedWeatherHistoryAdapter")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl<W: WeatherHistoryPort> CachedWeatherHistoryAdapter<W> {
    /// Wrap a weather source with the configured TTL and capacity
    #[must_use]
    pub fn new(inner: W, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.history_ttl())
            .build();
        Self {
            inner,
            cache,
            enabled: config.enabled,
        }
    }

    /// Disable caching (useful for debugging)
    #[must_use]
    pub const fn with_caching_disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Build a cache key from location and range
    fn cache_key(location: &GeoLocation, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{:.4},{:.4}:{start}:{end}",
            location.latitude(),
            location.longitude()
        )
    }
}

#[async_trait]
impl<W: WeatherHistoryPort> WeatherHistoryPort for CachedWeatherHistoryAdapter<W> {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_daily_history(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherObservation>, ApplicationError> {
        if !self.enabled {
            return self.inner.get_daily_history(location, start, end).await;
        }

        let key = Self::cache_key(location, start, end);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit for weather history");
            return Ok(cached.as_ref().clone());
        }

        debug!(key = %key, "Cache miss for weather history");
        let history = self.inner.get_daily_history(location, start, end).await?;
        // Empty ranges are not cached; the archive may still be catching up
        if !history.is_empty() {
            self.cache.insert(key, Arc::new(history.clone())).await;
        }
        Ok(history)
    }

    async fn get_current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherObservation, ApplicationError> {
        self.inner.get_current_conditions(location).await
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};

    use super::*;

    #[derive(Debug, Default)]
    struct CountingWeather {
        history_calls: AtomicUsize,
        current_calls: AtomicUsize,
        fail: bool,
        empty: bool,
    }

    fn observation() -> WeatherObservation {
        WeatherObservation::complete(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            22.0,
            70.0,
            5.0,
            10.0,
            851.0,
        )
    }

    #[async_trait]
    impl WeatherHistoryPort for CountingWeather {
        async fn get_daily_history(
            &self,
            _location: &GeoLocation,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<WeatherObservation>, ApplicationError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApplicationError::DataUnavailable("down".into()));
            }
            if self.empty {
                return Ok(Vec::new());
            }
            Ok(vec![observation()])
        }

        async fn get_current_conditions(
            &self,
            _location: &GeoLocation,
        ) -> Result<WeatherObservation, ApplicationError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            Ok(observation())
        }

        async fn is_available(&self) -> bool {
            !self.fail
        }
    }

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn second_fetch_hits_cache() {
        let adapter = CachedWeatherHistoryAdapter::new(CountingWeather::default(), &CacheConfig::default());
        let (start, end) = range();
        let harare = GeoLocation::harare();

        let first = adapter.get_daily_history(&harare, start, end).await.unwrap();
        let second = adapter.get_daily_history(&harare, start, end).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(adapter.inner.history_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_location_misses_cache() {
        let adapter = CachedWeatherHistoryAdapter::new(CountingWeather::default(), &CacheConfig::default());
        let (start, end) = range();

        adapter.get_daily_history(&GeoLocation::harare(), start, end).await.unwrap();
        adapter.get_daily_history(&GeoLocation::bulawayo(), start, end).await.unwrap();

        assert_eq!(adapter.inner.history_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let inner = CountingWeather {
            fail: true,
            ..Default::default()
        };
        let adapter = CachedWeatherHistoryAdapter::new(inner, &CacheConfig::default());
        let (start, end) = range();
        let harare = GeoLocation::harare();

        assert!(adapter.get_daily_history(&harare, start, end).await.is_err());
        assert!(adapter.get_daily_history(&harare, start, end).await.is_err());
        assert_eq!(adapter.inner.history_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_history_is_not_cached() {
        let inner = CountingWeather {
            empty: true,
            ..Default::default()
        };
        let adapter = CachedWeatherHistoryAdapter::new(inner, &CacheConfig::default());
        let (start, end) = range();
        let harare = GeoLocation::harare();

        adapter.get_daily_history(&harare, start, end).await.unwrap();
        adapter.get_daily_history(&harare, start, end).await.unwrap();
        assert_eq!(adapter.inner.history_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_delegates() {
        let config = CacheConfig {
            enabled: false,
            ..Default::default()
        };
        let adapter = CachedWeatherHistoryAdapter::new(CountingWeather::default(), &config);
        let (start, end) = range();
        let harare = GeoLocation::harare();

        adapter.get_daily_history(&harare, start, end).await.unwrap();
        adapter.get_daily_history(&harare, start, end).await.unwrap();
        assert_eq!(adapter.inner.history_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn current_conditions_pass_through() {
        let adapter = CachedWeatherHistoryAdapter::new(CountingWeather::default(), &CacheConfig::default());
        let harare = GeoLocation::harare();

        adapter.get_current_conditions(&harare).await.unwrap();
        adapter.get_current_conditions(&harare).await.unwrap();
        assert_eq!(adapter.inner.current_calls.load(Ordering::SeqCst), 2);
        assert!(adapter.is_available().await);
    }

    #[test]
    fn cache_key_rounds_coordinates() {
        let (start, end) = range();
        let key = CachedWeatherHistoryAdapter::<CountingWeather>::cache_key(
            &GeoLocation::new_unchecked(-17.829_21, 31.052_19),
            start,
            end,
        );
        assert_eq!(key, "-17.8292,31.0522:2024-01-01:2024-01-31");
    }
}
