use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_CHANNEL_BUFFER: usize = 32;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime settings, read from `ORDERDESK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Mailbox size of each table actor.
    pub channel_buffer: usize,
    /// Snapshot loaded into the stores at startup.
    pub seed_file: Option<PathBuf>,
    /// Where the demo binary dumps the stores on shutdown.
    pub snapshot_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            seed_file: None,
            snapshot_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let channel_buffer = match non_empty("ORDERDESK_CHANNEL_BUFFER") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "ORDERDESK_CHANNEL_BUFFER",
                        value: raw,
                    })
                }
            },
            None => defaults.channel_buffer,
        };

        Ok(Self {
            log_filter: non_empty("ORDERDESK_LOG").unwrap_or(defaults.log_filter),
            channel_buffer,
            seed_file: non_empty("ORDERDESK_SEED_FILE").map(PathBuf::from),
            snapshot_file: non_empty("ORDERDESK_SNAPSHOT_FILE").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn values_are_read_and_blank_ones_ignored() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ORDERDESK_LOG", "debug"),
            ("ORDERDESK_CHANNEL_BUFFER", "8"),
            ("ORDERDESK_SEED_FILE", "seed.json"),
            ("ORDERDESK_SNAPSHOT_FILE", "  "),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
        assert_eq!(config.snapshot_file, None);
    }

    #[test]
    fn zero_or_garbage_buffer_is_rejected() {
        for raw in ["0", "lots"] {
            let err = AppConfig::from_lookup(lookup(&[("ORDERDESK_CHANNEL_BUFFER", raw)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidNumber {
                    key: "ORDERDESK_CHANNEL_BUFFER",
                    value: raw.to_string()
                }
            );
        }
    }
}
