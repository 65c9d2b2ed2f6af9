use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "https://smmbackend-hayt.onrender.com";

/// Mock gateway and polling knobs for [`crate::app::payment::PaymentFlow`].
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentSettings {
    pub poll_interval: Duration,
    /// Post a fake gateway callback after `gateway_delay`.
    pub simulate_gateway: bool,
    pub gateway_delay: Duration,
    /// Probability that the fake callback reports `SUCCESS`.
    pub gateway_success_rate: f64,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            simulate_gateway: true,
            gateway_delay: Duration::from_secs(3),
            gateway_success_rate: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub http_timeout: Duration,
    pub page_limit: u32,
    pub payment: PaymentSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            page_limit: 10,
            payment: PaymentSettings::default(),
        }
    }
}

impl Config {
    /// Read `DASHBOARD_*` variables from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let api_url = lookup("DASHBOARD_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let http_timeout = parse_var(&lookup, "DASHBOARD_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let page_limit = parse_var(&lookup, "DASHBOARD_PAGE_LIMIT")?.unwrap_or(defaults.page_limit);

        let payment = PaymentSettings {
            poll_interval: parse_var(&lookup, "DASHBOARD_POLL_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.payment.poll_interval),
            simulate_gateway: parse_var(&lookup, "DASHBOARD_SIMULATE_GATEWAY")?
                .unwrap_or(defaults.payment.simulate_gateway),
            gateway_delay: parse_var(&lookup, "DASHBOARD_GATEWAY_DELAY_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.payment.gateway_delay),
            gateway_success_rate: parse_var(&lookup, "DASHBOARD_GATEWAY_SUCCESS_RATE")?
                .unwrap_or(defaults.payment.gateway_success_rate),
        };

        Ok(Self {
            api_url,
            http_timeout,
            page_limit,
            payment,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(
                "DASHBOARD_API_URL must start with http:// or https://".to_string(),
            ));
        }

        if self.http_timeout.is_zero() {
            return Err(AppError::Config(
                "DASHBOARD_HTTP_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        if self.page_limit == 0 || self.page_limit > 100 {
            return Err(AppError::Config(
                "DASHBOARD_PAGE_LIMIT must be between 1 and 100".to_string(),
            ));
        }

        if self.payment.poll_interval.is_zero() {
            return Err(AppError::Config(
                "DASHBOARD_POLL_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.payment.gateway_success_rate) {
            return Err(AppError::Config(
                "DASHBOARD_GATEWAY_SUCCESS_RATE must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw}"))),
    }
}
