//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use screener_client::FilterType;
use screener_view::Messages;

use crate::error::CoreError;
use crate::Result;

pub const BASE_URL_ENV: &str = "SCREENER_BASE_URL";
pub const TIMEOUT_ENV: &str = "SCREENER_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the filter endpoint is served from
    pub base_url: String,
    /// Whole-request timeout. The backend throttles itself per ticker, so
    /// a full screen takes tens of seconds.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Filters offered as tabs, in display order
    pub filters: Vec<FilterType>,
    pub messages: Messages,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            let base_url = base_url.trim();
            if base_url.is_empty() {
                return Err(CoreError::Config(format!("{BASE_URL_ENV} is empty")));
            }
            self.base_url = base_url.to_string();
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                CoreError::Config(format!("{TIMEOUT_ENV} must be whole seconds, got {timeout:?}"))
            })?;
            if secs == 0 {
                return Err(CoreError::Config(format!("{TIMEOUT_ENV} must be positive")));
            }
            self.request_timeout_secs = secs;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            user_agent: format!("screener/{}", env!("CARGO_PKG_VERSION")),
            filters: FilterType::PRESETS.to_vec(),
            messages: Messages::default(),
        }
    }
}
