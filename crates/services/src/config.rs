use std::env;
use std::time::Duration;

use guess_core::game::AUTO_ADVANCE_DELAY;
use url::Url;

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "GUESS_API_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "GUESS_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8888/api";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the quiz, oracle and hint services live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary key lookup. Unset or blank
    /// values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = normalize_optional(lookup(API_URL_ENV)) {
            config.base_url = parse_base_url(&raw)?;
        }
        if let Some(raw) = normalize_optional(lookup(REQUEST_TIMEOUT_ENV)) {
            let seconds: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { raw: raw.clone() })?;
            if seconds == 0 {
                return Err(ConfigError::InvalidTimeout { raw });
            }
            config.request_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Pacing knobs for a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Delay between a correct guess and the next round.
    pub advance_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            advance_delay: AUTO_ADVANCE_DELAY,
        }
    }
}

fn default_base_url() -> Url {
    match Url::parse(DEFAULT_API_URL) {
        Ok(url) => url,
        Err(err) => unreachable!("default API URL must parse: {err}"),
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        raw: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".into()));
    }
    Ok(url)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn falls_back_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8888/api");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn blank_values_fall_back() {
        let config =
            ServiceConfig::from_lookup(lookup(&[(API_URL_ENV, "  "), (REQUEST_TIMEOUT_ENV, "")]))
                .unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://guess.example.com/api/"),
            (REQUEST_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("guess.example.com"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(API_URL_ENV, "localhost:8888")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(API_URL_ENV, "ftp://example.com")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn default_game_pacing_is_two_and_a_half_seconds() {
        assert_eq!(GameConfig::default().advance_delay, Duration::from_millis(2500));
    }
}
