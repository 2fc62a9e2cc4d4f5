//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use reqwest::Url;
use sketch_relay::PollConfig;
use std::{ops::RangeInclusive, str::FromStr, time::Duration};

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Allowed cadence for either poller.
const POLL_INTERVAL_RANGE_MS: RangeInclusive<u64> = 250..=60_000;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game authority
    pub server_url: String,
    /// How often the player's phase is polled
    pub phase_poll_interval: Duration,
    /// How often the room summary is polled
    pub summary_poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How often the screen checks for a changed view
    pub render_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            phase_poll_interval: Duration::from_millis(2000),
            summary_poll_interval: Duration::from_millis(3000),
            request_timeout: Duration::from_secs(10),
            render_interval: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `server_url_override` - Optional server URL override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(server_url_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(server_url_override, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        server_url_override: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_url = server_url_override
            .or_else(|| lookup("SERVER_URL"))
            .unwrap_or(defaults.server_url);

        Ok(Self {
            server_url,
            phase_poll_interval: Duration::from_millis(parse_var_or(
                &lookup,
                "PHASE_POLL_INTERVAL_MS",
                2000,
            )?),
            summary_poll_interval: Duration::from_millis(parse_var_or(
                &lookup,
                "SUMMARY_POLL_INTERVAL_MS",
                3000,
            )?),
            request_timeout: Duration::from_secs(parse_var_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                10,
            )?),
            render_interval: Duration::from_millis(parse_var_or(
                &lookup,
                "RENDER_INTERVAL_MS",
                500,
            )?),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.server_url).map_err(|e| ConfigError::Invalid {
            var: "SERVER_URL".to_string(),
            reason: format!("'{}' is not a valid URL: {e}", self.server_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: "SERVER_URL".to_string(),
                reason: format!("Must be an http or https URL, got '{}'", url.scheme()),
            });
        }

        check_poll_interval("PHASE_POLL_INTERVAL_MS", self.phase_poll_interval)?;
        check_poll_interval("SUMMARY_POLL_INTERVAL_MS", self.summary_poll_interval)?;

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.render_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "RENDER_INTERVAL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            phase_interval: self.phase_poll_interval,
            summary_interval: self.summary_poll_interval,
        }
    }
}

fn check_poll_interval(var: &str, interval: Duration) -> Result<(), ConfigError> {
    let ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    if POLL_INTERVAL_RANGE_MS.contains(&ms) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: format!(
                "Must be between {} and {} ms, got {ms}",
                POLL_INTERVAL_RANGE_MS.start(),
                POLL_INTERVAL_RANGE_MS.end()
            ),
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback. A variable that is set
/// but unparsable is an error rather than silently defaulted.
fn parse_var_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{raw}' is not a valid number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(None, lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server_url, "http://localhost:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_variables() {
        let config = ClientConfig::from_lookup(
            None,
            lookup_from(&[
                ("SERVER_URL", "https://relay.example.com"),
                ("PHASE_POLL_INTERVAL_MS", "1500"),
                ("SUMMARY_POLL_INTERVAL_MS", "4000"),
                ("REQUEST_TIMEOUT_SECS", "5"),
                ("RENDER_INTERVAL_MS", "250"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server_url, "https://relay.example.com");
        assert_eq!(config.phase_poll_interval, Duration::from_millis(1500));
        assert_eq!(config.summary_poll_interval, Duration::from_millis(4000));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.render_interval, Duration::from_millis(250));
        assert_eq!(
            config.poll_config(),
            PollConfig {
                phase_interval: Duration::from_millis(1500),
                summary_interval: Duration::from_millis(4000),
            }
        );
    }

    #[test]
    fn test_override_beats_variable() {
        let config = ClientConfig::from_lookup(
            Some("http://10.0.0.2:5000".to_string()),
            lookup_from(&[("SERVER_URL", "http://ignored")]),
        )
        .unwrap();
        assert_eq!(config.server_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_unparsable_variable() {
        let err = ClientConfig::from_lookup(
            None,
            lookup_from(&[("PHASE_POLL_INTERVAL_MS", "fast")]),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PHASE_POLL_INTERVAL_MS"));
        assert!(msg.contains("fast"));
    }

    #[test]
    fn test_validation_poll_interval_range() {
        let config = ClientConfig {
            phase_poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { var, .. } if var == "PHASE_POLL_INTERVAL_MS"
        ));

        let config = ClientConfig {
            summary_poll_interval: Duration::from_secs(61),
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { var, .. } if var == "SUMMARY_POLL_INTERVAL_MS"
        ));

        let config = ClientConfig {
            phase_poll_interval: Duration::from_millis(250),
            summary_poll_interval: Duration::from_secs(60),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_server_url() {
        let config = ClientConfig {
            server_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            server_url: "ftp://localhost".to_string(),
            ..Default::default()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("SERVER_URL"));
        assert!(msg.contains("ftp"));
    }

    #[test]
    fn test_validation_zero_timeouts() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            render_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
