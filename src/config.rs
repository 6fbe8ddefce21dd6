//! Runtime configuration from environment variables

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::planner::calculators::format_money;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Currency label used for display. There is no conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn format(&self, amount: Decimal) -> String {
        format_money(amount, &self.symbol)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    /// Weather lookups are disabled without a key
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub weather_timeout: Duration,
    pub currency: Currency,
    pub session_idle: Duration,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let default = Currency::default();

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            dataset_path: get("TRIP_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("india_tour_data.csv")),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            openweather_base_url: get("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| "https://api.openweathermap.org".to_string()),
            weather_timeout: Duration::from_secs(parse_u64(
                "WEATHER_TIMEOUT_SECS",
                get("WEATHER_TIMEOUT_SECS"),
                5,
            )?),
            currency: Currency {
                code: get("CURRENCY_CODE").unwrap_or(default.code),
                symbol: get("CURRENCY_SYMBOL").unwrap_or(default.symbol),
            },
            session_idle: parse_idle_hours(get("SESSION_IDLE_HOURS"))?,
        })
    }
}

/// Upper bound for `SESSION_IDLE_HOURS`, one year
const MAX_SESSION_IDLE_HOURS: u64 = 24 * 365;

fn parse_idle_hours(value: Option<String>) -> Result<Duration, ConfigError> {
    const KEY: &str = "SESSION_IDLE_HOURS";
    let hours = parse_u64(KEY, value, 24)?;
    hours
        .checked_mul(60 * 60)
        .filter(|_| hours <= MAX_SESSION_IDLE_HOURS)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            key: KEY,
            value: hours.to_string(),
        })
}

fn parse_u64(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.dataset_path, PathBuf::from("india_tour_data.csv"));
        assert_eq!(config.openweather_api_key, None);
        assert_eq!(config.weather_timeout, Duration::from_secs(5));
        assert_eq!(config.currency, Currency::default());
        assert_eq!(config.session_idle, Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_overrides_and_blank_key() {
        let config = config(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("OPENWEATHER_API_KEY", "   "),
            ("WEATHER_TIMEOUT_SECS", "2"),
            ("CURRENCY_CODE", "USD"),
            ("CURRENCY_SYMBOL", "$"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.openweather_api_key, None);
        assert_eq!(config.weather_timeout, Duration::from_secs(2));
        assert_eq!(config.currency.format(dec!(1500)), "$1,500");
    }

    #[test]
    fn test_invalid_number() {
        let err = config(&[("WEATHER_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("WEATHER_TIMEOUT_SECS"));

        assert!(config(&[("SESSION_IDLE_HOURS", "0")]).is_err());
    }

    #[test]
    fn test_session_idle_bounds() {
        let config_for = |hours: &str| config(&[("SESSION_IDLE_HOURS", hours)]);

        assert_eq!(
            config_for("8760").unwrap().session_idle,
            Duration::from_secs(8760 * 60 * 60)
        );
        assert!(config_for("8761").is_err());

        let err = config_for(&u64::MAX.to_string()).unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_HOURS"));
    }
}
