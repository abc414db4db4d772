//! Runtime configuration loaded from the environment (and `.env`).

use anyhow::{Context, Result, anyhow};
use std::time::Duration;

use crate::analyzers::aggregate::DEFAULT_RADIUS_METERS;
use crate::infra::google::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub places_base_url: String,
    pub radius_meters: f64,
    pub http_timeout: Duration,
    pub http_connect_timeout: Duration,
}

impl AppConfig {
    /// Reads the process environment. `.env` is loaded once by `main`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("GOOGLE_API_KEY must be set"))?;

        let places_base_url =
            lookup("PLACES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let radius_meters = match lookup("SEARCH_RADIUS_METERS") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("SEARCH_RADIUS_METERS is not a number: '{raw}'"))?,
            None => DEFAULT_RADIUS_METERS,
        };
        if !(radius_meters.is_finite() && radius_meters > 0.0) {
            return Err(anyhow!(
                "SEARCH_RADIUS_METERS must be greater than zero, got {radius_meters}"
            ));
        }

        let http_timeout = secs(&lookup, "HTTP_TIMEOUT_SECS", 30)?;
        let http_connect_timeout = secs(&lookup, "HTTP_CONNECT_TIMEOUT_SECS", 10)?;

        Ok(Self {
            api_key,
            places_base_url,
            radius_meters,
            http_timeout,
            http_connect_timeout,
        })
    }
}

fn secs<F>(lookup: &F, name: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{name} must be a whole number of seconds, got '{raw}'"))?,
        None => default,
    };
    Ok(Duration::from_secs(value))
}
