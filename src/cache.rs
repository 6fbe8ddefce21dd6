//! In-memory caching using moka
//!
//! Weather observations change slowly relative to how often the planner
//! page is rendered, so successful lookups are kept for a few minutes.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::weather::WeatherObservation;

/// Application cache holding external lookups
#[derive(Clone)]
pub struct AppCache {
    /// Weather observations (normalized city -> observation)
    pub weather: Cache<String, Arc<WeatherObservation>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Weather: 200 cities, 10 min TTL
            weather: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            weather_size: self.weather.entry_count(),
        }
    }

    /// Generate cache key for a city's weather
    pub fn weather_key(city: &str) -> String {
        city.trim().to_lowercase()
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub weather_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_key_normalizes_city() {
        assert_eq!(AppCache::weather_key("  New Delhi "), "new delhi");
        assert_eq!(AppCache::weather_key("GOA"), "goa");
    }
}
