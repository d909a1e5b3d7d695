use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Env variable read first for the log filter
pub const LOG_ENV: &str = "LAYERED_DI_LOG";
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `info,layered_di=debug`
    pub filter: String,
    pub ansi: bool,
}
impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: DEFAULT_FILTER.to_string(),
            ansi: true,
        }
    }
}
impl LogConfig {
    /// Reads `LAYERED_DI_LOG`, then `RUST_LOG`, falling back to `info`
    ///
    /// Colors are disabled if `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = [LOG_ENV, "RUST_LOG"]
            .into_iter()
            .filter_map(&lookup)
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        LogConfig {
            filter,
            ansi: lookup("NO_COLOR").is_none(),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("Failed to install the log subscriber: {0}")]
    Install(String),
}

/// Installs the global fmt subscriber
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| LoggingError::InvalidFilter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::debug!("Logging initialized with filter '{}'", config.filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn own_variable_wins_over_rust_log() {
        let config = LogConfig::from_lookup(lookup(&[(LOG_ENV, "debug"), ("RUST_LOG", "warn")]));
        assert_eq!(config.filter, "debug");
    }

    #[test]
    fn falls_back_to_default() {
        let config = LogConfig::from_lookup(lookup(&[(LOG_ENV, " ")]));
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn no_color_disables_ansi() {
        let config = LogConfig::from_lookup(lookup(&[("NO_COLOR", "1")]));
        assert!(!config.ansi);
    }

    #[test]
    fn invalid_filter_is_reported() {
        let config = LogConfig {
            filter: "layered_di=notalevel".to_string(),
            ansi: false,
        };
        assert!(matches!(
            init(&config),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }
}
