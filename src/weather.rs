//! Weather lookups against OpenWeatherMap.
//!
//! Lookups are best effort: every failure (transport error, timeout,
//! non-success status, unexpected body) collapses into
//! `WeatherLookup::Unavailable` and is never surfaced to callers.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::AppCache;

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub temperature_celsius: f64,
    pub description: String,
}

/// Outcome of a weather lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherLookup {
    Observed(WeatherObservation),
    Unavailable,
}

impl WeatherLookup {
    pub fn observation(&self) -> Option<&WeatherObservation> {
        match self {
            WeatherLookup::Observed(observation) => Some(observation),
            WeatherLookup::Unavailable => None,
        }
    }
}

/// Source of current weather for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> WeatherLookup;
}

/// Provider used when no API key is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledWeather;

#[async_trait]
impl WeatherProvider for DisabledWeather {
    async fn current(&self, _city: &str) -> WeatherLookup {
        WeatherLookup::Unavailable
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

/// HTTP client for the OpenWeatherMap current-weather endpoint
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn fetch(&self, city: &str) -> Result<WeatherObservation, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let parsed: CurrentWeatherResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| FetchError::Malformed("empty weather list".to_string()))?;

        Ok(WeatherObservation {
            temperature_celsius: parsed.main.temp,
            description,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> WeatherLookup {
        match self.fetch(city).await {
            Ok(observation) => WeatherLookup::Observed(observation),
            Err(FetchError::Status(status)) => {
                debug!("Weather lookup for {} returned {}", city, status);
                WeatherLookup::Unavailable
            }
            Err(e) => {
                warn!("Weather lookup for {} failed: {}", city, e);
                WeatherLookup::Unavailable
            }
        }
    }
}

/// Wraps a provider with the observation cache. Misses are not cached.
#[derive(Clone)]
pub struct CachedWeather {
    inner: Arc<dyn WeatherProvider>,
    cache: AppCache,
}

impl CachedWeather {
    pub fn new(inner: Arc<dyn WeatherProvider>, cache: AppCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl WeatherProvider for CachedWeather {
    async fn current(&self, city: &str) -> WeatherLookup {
        let key = AppCache::weather_key(city);
        if let Some(cached) = self.cache.weather.get(&key).await {
            debug!("Cache HIT for weather: {}", key);
            return WeatherLookup::Observed((*cached).clone());
        }

        debug!("Cache MISS for weather: {}", key);
        let lookup = self.inner.current(city).await;
        if let WeatherLookup::Observed(observation) = &lookup {
            self.cache
                .weather
                .insert(key, Arc::new(observation.clone()))
                .await;
        }
        lookup
    }
}
