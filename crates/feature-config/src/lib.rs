//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, PipelineConfig, YahooSettings};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix, e.g. `STOCK_FEATURES__PIPELINE__FAIL_FAST=true`.
pub const ENV_PREFIX: &str = "STOCK_FEATURES";

/// Load configuration from an optional file and the environment.
///
/// Missing sections and keys fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("pipeline.tickers")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Render the default configuration as TOML.
pub fn default_toml() -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.pipeline.tickers.len(), 24);
        assert_eq!(config.pipeline.lookback_days, 365);
    }

    #[test]
    fn test_default_toml_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, default_toml().unwrap()).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.yahoo, YahooSettings::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[pipeline]
tickers = ["IBM", "ORCL"]
training_start = "2010-01-04"
fail_fast = true

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.pipeline.tickers, vec!["IBM", "ORCL"]);
        assert!(config.pipeline.fail_fast);
        assert_eq!(config.pipeline.lookback_days, 365);
        assert_eq!(
            config.pipeline.training_start,
            chrono::NaiveDate::from_ymd_opt(2010, 1, 4).unwrap()
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_config(Some(Path::new("/no/such/config.toml"))).is_err());
    }
}
