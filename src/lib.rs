//! Trip planner: cost estimation, itinerary display and expense tracking
//! over a static destination rate dataset.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod planner;
pub mod routes;
pub mod session;
pub mod weather;

use axum::Router;
use std::sync::Arc;
use tracing::warn;

use crate::cache::AppCache;
use crate::config::{Config, Currency};
use crate::dataset::RateTable;
use crate::session::SessionStore;
use crate::weather::{CachedWeather, DisabledWeather, OpenWeatherClient, WeatherProvider};

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateTable>,
    pub cache: AppCache,
    pub sessions: SessionStore,
    pub weather: Arc<dyn WeatherProvider>,
    pub currency: Currency,
}

impl AppState {
    pub fn new(
        rates: RateTable,
        weather: Arc<dyn WeatherProvider>,
        cache: AppCache,
        sessions: SessionStore,
        currency: Currency,
    ) -> Self {
        Self {
            rates: Arc::new(rates),
            cache,
            sessions,
            weather,
            currency,
        }
    }

    /// Build state from configuration and an already loaded dataset
    pub fn from_config(config: &Config, rates: RateTable) -> Result<Self, reqwest::Error> {
        let cache = AppCache::new();

        let weather: Arc<dyn WeatherProvider> = match &config.openweather_api_key {
            Some(key) => {
                let client = OpenWeatherClient::new(
                    &config.openweather_base_url,
                    key,
                    config.weather_timeout,
                )?;
                Arc::new(CachedWeather::new(Arc::new(client), cache.clone()))
            }
            None => {
                warn!("OPENWEATHER_API_KEY not set; weather advisories disabled");
                Arc::new(DisabledWeather)
            }
        };

        Ok(Self::new(
            rates,
            weather,
            cache,
            SessionStore::new(config.session_idle),
            config.currency.clone(),
        ))
    }
}

/// The full application router
pub fn app(state: AppState) -> Router {
    routes::router(state)
}
