//! Environment-driven console configuration.

use std::path::PathBuf;

use item_admin_core::{DEFAULT_PAGE_SIZE, TOKEN_KEY};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("ITEM_ADMIN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_file = lookup("ITEM_ADMIN_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_default()
                    .join(".item-admin")
                    .join(TOKEN_KEY)
            });

        let page_size = match lookup("ITEM_ADMIN_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "ITEM_ADMIN_PAGE_SIZE",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_url,
            token_file,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[("HOME", "/home/ops")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token_file, PathBuf::from("/home/ops/.item-admin/token"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ITEM_ADMIN_API_URL", "https://api.example.com"),
            ("ITEM_ADMIN_TOKEN_FILE", "/tmp/t"),
            ("ITEM_ADMIN_PAGE_SIZE", "20"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.token_file, PathBuf::from("/tmp/t"));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[("ITEM_ADMIN_PAGE_SIZE", "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "ITEM_ADMIN_PAGE_SIZE",
                value: "0".to_string()
            }
        );
        assert!(Config::from_lookup(lookup(&[("ITEM_ADMIN_PAGE_SIZE", "many")])).is_err());
    }
}
