//! Configuration constants and environment loading for bptree.
//!
//! # Environment Variables
//!
//! - `BPTREE_ORDER`: tree order used by the demo binary (default: `4`)
//! - `BPTREE_LOG_LEVEL`: minimum log level, one of debug/info/warn/error/fatal
//!   (default: `debug`)
//! - `BPTREE_LOG_COLOR`: `true`/`false`, `1`/`0`, `on`/`off` (default: `true`)

use std::env;

use crate::common::{Error, Result};
use crate::logging::{LogSettings, Severity};

/// Smallest order a tree accepts.
///
/// Below 3 a leaf split could leave an empty sibling, and an internal split
/// could produce a node with no separator.
pub const MIN_ORDER: usize = 3;

/// Order used when none is configured.
pub const DEFAULT_ORDER: usize = 4;

/// Default width of the `[LEVEL]` column (fits "DEBUG", "ERROR", "FATAL").
pub const DEFAULT_LEVEL_WIDTH: usize = 5;

/// Default width of the `file:line` column.
pub const DEFAULT_CALLER_WIDTH: usize = 25;

pub const ORDER_VAR: &str = "BPTREE_ORDER";
pub const LOG_LEVEL_VAR: &str = "BPTREE_LOG_LEVEL";
pub const LOG_COLOR_VAR: &str = "BPTREE_LOG_COLOR";

/// Settings for a tree plus the logger that observes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Requested order. Clamped to [`MIN_ORDER`] by `BPlusTree::new`.
    pub order: usize,
    /// Console logger settings.
    pub log: LogSettings,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            log: LogSettings::default(),
        }
    }
}

impl TreeConfig {
    /// Load configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Split out of [`TreeConfig::from_env`] so tests don't have to mutate
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ORDER_VAR) {
            config.order = raw.trim().parse().map_err(|_| Error::InvalidConfig {
                name: ORDER_VAR.to_string(),
                message: format!("expected a non-negative integer, got {raw:?}"),
            })?;
        }

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            config.log.level = raw
                .parse::<Severity>()
                .map_err(|e| Error::InvalidConfig {
                    name: LOG_LEVEL_VAR.to_string(),
                    message: e.to_string(),
                })?;
        }

        if let Some(raw) = lookup(LOG_COLOR_VAR) {
            config.log.color = parse_flag(&raw).ok_or_else(|| Error::InvalidConfig {
                name: LOG_COLOR_VAR.to_string(),
                message: format!("expected a boolean, got {raw:?}"),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TreeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TreeConfig::default());
        assert_eq!(config.order, DEFAULT_ORDER);
        assert_eq!(config.log.level, Severity::Debug);
        assert!(config.log.color);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = TreeConfig::from_lookup(lookup_from(&[
            (ORDER_VAR, "16"),
            (LOG_LEVEL_VAR, "WARN"),
            (LOG_COLOR_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.order, 16);
        assert_eq!(config.log.level, Severity::Warn);
        assert!(!config.log.color);
    }

    #[test]
    fn test_malformed_order() {
        let err = TreeConfig::from_lookup(lookup_from(&[(ORDER_VAR, "four")])).unwrap_err();
        match err {
            Error::InvalidConfig { name, .. } => assert_eq!(name, ORDER_VAR),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_small_order_is_accepted_and_left_to_clamping() {
        let config = TreeConfig::from_lookup(lookup_from(&[(ORDER_VAR, "0")])).unwrap();
        assert_eq!(config.order, 0);

        let err = TreeConfig::from_lookup(lookup_from(&[(ORDER_VAR, "-1")])).unwrap_err();
        match err {
            Error::InvalidConfig { message, .. } => {
                assert!(message.contains("non-negative integer"), "got {message:?}")
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_level_and_color() {
        assert!(TreeConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).is_err());
        assert!(TreeConfig::from_lookup(lookup_from(&[(LOG_COLOR_VAR, "maybe")])).is_err());
    }
}
