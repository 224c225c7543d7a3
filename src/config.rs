use serde::{Deserialize, Serialize};

/// Main configuration for a subtrack instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// ISO currency code used for display (the tracker itself stores raw numbers).
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    /// Symbol prefixed to formatted amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// When true, an empty subscription list is padded with demo rows so the
    /// dashboard never renders an empty table.
    #[serde(default)]
    pub demo_rows_when_empty: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            demo_rows_when_empty: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_currency_code() -> String {
    "ZAR".to_string()
}

fn default_currency_symbol() -> String {
    "R".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Builder for [`TrackerConfig`].
#[must_use = "builder does nothing until you call build()"]
pub struct TrackerConfigBuilder {
    config: TrackerConfig,
}

impl TrackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }

    pub fn with_currency(mut self, code: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.config.currency_code = code.into();
        self.config.currency_symbol = symbol.into();
        self
    }

    pub fn with_demo_rows(mut self, enabled: bool) -> Self {
        self.config.demo_rows_when_empty = enabled;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.config.logging.json = json;
        self
    }

    pub fn build(self) -> TrackerConfig {
        self.config
    }
}

impl Default for TrackerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.currency_code, "ZAR");
        assert_eq!(config.currency_symbol, "R");
        assert!(!config.demo_rows_when_empty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_builder() {
        let config = TrackerConfigBuilder::new()
            .with_currency("USD", "$")
            .with_demo_rows(true)
            .with_log_level("debug")
            .build();

        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.currency_symbol, "$");
        assert!(config.demo_rows_when_empty);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"logging": {}}"#).unwrap();
        assert_eq!(config.currency_code, "ZAR");
        assert!(!config.logging.json);
    }
}
