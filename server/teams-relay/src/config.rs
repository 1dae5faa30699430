//! Webhook configuration, resolved once from the environment.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const WEBHOOK_URL_VAR: &str = "TEAMS_WEBHOOK_URL";
pub const TIMEOUT_VAR: &str = "TEAMS_WEBHOOK_TIMEOUT_SECS";

/// Upper bound on a single POST when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where cards are delivered and how long one delivery may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
  pub url: Url,
  pub timeout: Duration,
}

impl WebhookConfig {
  /// Validate `raw` as an absolute http(s) URL.
  pub fn new(raw: &str) -> Result<Self, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
      return Err(ConfigError::missing(WEBHOOK_URL_VAR));
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(WEBHOOK_URL_VAR, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
      return Err(ConfigError::invalid(
        WEBHOOK_URL_VAR,
        format!("unsupported scheme `{}`", url.scheme()),
      ));
    }
    if url.host_str().map_or(true, str::is_empty) {
      return Err(ConfigError::invalid(WEBHOOK_URL_VAR, "missing host"));
    }
    Ok(Self {
      url,
      timeout: DEFAULT_TIMEOUT,
    })
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Resolve settings through `lookup` instead of the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let raw = lookup(WEBHOOK_URL_VAR).ok_or_else(|| ConfigError::missing(WEBHOOK_URL_VAR))?;
    let config = Self::new(&raw)?;

    match lookup(TIMEOUT_VAR) {
      None => Ok(config),
      Some(secs) => {
        let secs: u64 = secs
          .trim()
          .parse()
          .map_err(|_| ConfigError::invalid(TIMEOUT_VAR, format!("`{}` is not a whole number of seconds", secs)))?;
        if secs == 0 {
          return Err(ConfigError::invalid(TIMEOUT_VAR, "must be greater than zero"));
        }
        Ok(config.with_timeout(Duration::from_secs(secs)))
      }
    }
  }
}
