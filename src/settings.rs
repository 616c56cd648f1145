//! Process settings read from the environment (and `.env` when present)

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONFIG_PATH: &str = "data/pricing.json";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub pricing_config_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let pricing_config_path = lookup("PRICING_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let log_filter = lookup("RUST_LOG")
            .or_else(|| lookup("LOG_LEVEL"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr,
            pricing_config_path,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(settings.pricing_config_path, PathBuf::from("data/pricing.json"));
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("PRICING_CONFIG_PATH", "/etc/print/pricing.json"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr.port(), 9000);
        assert_eq!(
            settings.pricing_config_path,
            PathBuf::from("/etc/print/pricing.json")
        );
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn test_rust_log_wins_over_log_level() {
        let settings = Settings::from_lookup(lookup(&[
            ("RUST_LOG", "print_estimator=trace"),
            ("LOG_LEVEL", "warn"),
        ]))
        .unwrap();
        assert_eq!(settings.log_filter, "print_estimator=trace");
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = Settings::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }
}
