//! Configuration loading: TOML file with environment variable overrides.
//!
//! The file path is the first command-line argument, else `HOMETRAY_CONFIG`,
//! else `hometray.toml` in the working directory. Every field has a default
//! so the file may be partial or absent; environment variables take
//! precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use hometray_adapter_assets_fs::AssetsConfig;
use hometray_adapter_hass_http::HassConfig;
use hometray_app::monitor::MonitorSettings;
use hometray_app::selection::EntitySelection;
use hometray_domain::id::EntityId;

const DEFAULT_PATH: &str = "hometray.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hub connection and entity selection.
    pub hass: HassSection,
    /// Refresh timing.
    pub polling: PollingConfig,
    /// Icon asset location.
    pub assets: AssetsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// `[hass]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HassSection {
    #[serde(flatten)]
    pub connection: HassConfig,
    /// Entity ids to monitor.
    pub entities: Vec<String>,
    /// Domains whose every entity is monitored.
    pub domains: Vec<String>,
    /// Entity ids left out of domain discovery.
    pub domain_entities_ignore: Vec<String>,
}

/// `[polling]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between two refreshes of the same entity.
    pub interval_secs: u64,
    /// Milliseconds to wait after a toggle before reading the state back.
    pub settle_delay_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting configuration is incomplete.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMETRAY_TOKEN") {
            self.hass.connection.token = val;
        }
        if let Some(val) = var("HOMETRAY_API_URL") {
            self.hass.connection.api_url = val;
        }
        if let Some(val) = var("HOMETRAY_ENTITIES") {
            self.hass.entities = split_list(&val);
        }
        if let Some(val) = var("HOMETRAY_DOMAINS") {
            self.hass.domains = split_list(&val);
        }
        if let Some(val) = var("HOMETRAY_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hass.connection.token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hass.token must be set (or HOMETRAY_TOKEN)".to_string(),
            ));
        }
        if self.hass.connection.api_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hass.api_url must not be empty".to_string(),
            ));
        }
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "polling.interval_secs must be non-zero".to_string(),
            ));
        }
        if self.hass.entities.is_empty() && self.hass.domains.is_empty() {
            return Err(ConfigError::Validation(
                "nothing to monitor: set hass.entities or hass.domains".to_string(),
            ));
        }
        self.selection().map(|_| ())
    }

    /// The entities requested by `[hass]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if an id is malformed.
    pub fn selection(&self) -> Result<EntitySelection, ConfigError> {
        Ok(EntitySelection {
            entity_ids: parse_ids("hass.entities", &self.hass.entities)?,
            domains: self.hass.domains.clone(),
            domain_entities_ignore: parse_ids(
                "hass.domain_entities_ignore",
                &self.hass.domain_entities_ignore,
            )?,
        })
    }

    /// Timing shared by every monitor.
    #[must_use]
    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            interval: Duration::from_secs(self.polling.interval_secs),
            settle_delay: Duration::from_millis(self.polling.settle_delay_ms),
        }
    }
}

/// Where to read the configuration from.
#[must_use]
pub fn config_path(cli_arg: Option<String>, env_var: Option<String>) -> PathBuf {
    cli_arg
        .or(env_var)
        .filter(|path| !path.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_PATH), PathBuf::from)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_ids(field: &str, raw: &[String]) -> Result<Vec<EntityId>, ConfigError> {
    raw.iter()
        .map(|id| {
            EntityId::parse(id.as_str())
                .map_err(|err| ConfigError::Validation(format!("{field}: {err}")))
        })
        .collect()
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            settle_delay_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hometrayd=info,hometray=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.hass.connection.token = "token".to_string();
        config.hass.entities = vec!["light.kitchen".to_string()];
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.hass.connection.api_url, "http://localhost:8123/api");
        assert_eq!(config.hass.connection.timeout_secs, 10);
        assert_eq!(config.polling.interval_secs, 5);
        assert_eq!(config.polling.settle_delay_ms, 100);
        assert_eq!(config.assets.extension, "svg");
        assert_eq!(config.logging.filter, "hometrayd=info,hometray=info");
        assert_eq!(config.monitor_settings(), MonitorSettings::default());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [hass]
            token = 'abc'
            api_url = 'http://192.168.0.125:8123/api'
            entities = ['light.kitchen']
            domains = ['switch']
            domain_entities_ignore = ['switch.printer']
            timeout_secs = 3

            [polling]
            interval_secs = 30
            settle_delay_ms = 250

            [assets]
            dir = '/usr/share/hometray/icons'
            extension = 'png'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hass.connection.token, "abc");
        assert_eq!(config.hass.connection.api_url, "http://192.168.0.125:8123/api");
        assert_eq!(config.hass.connection.timeout_secs, 3);
        assert_eq!(config.hass.entities, vec!["light.kitchen"]);
        assert_eq!(config.hass.domains, vec!["switch"]);
        assert_eq!(config.hass.domain_entities_ignore, vec!["switch.printer"]);
        assert_eq!(
            config.monitor_settings(),
            MonitorSettings {
                interval: Duration::from_secs(30),
                settle_delay: Duration::from_millis(250),
            }
        );
        assert_eq!(config.assets.dir, PathBuf::from("/usr/share/hometray/icons"));
        assert_eq!(config.assets.extension, "png");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [hass]
            token = 'abc'
            domains = ['light']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hass.connection.api_url, "http://localhost:8123/api");
        assert_eq!(config.polling.interval_secs, 5);
        assert!(config.hass.entities.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert_eq!(config.polling.interval_secs, 5);
    }

    #[test]
    fn should_read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hometray.toml");
        std::fs::write(&path, "[hass]\ntoken = 'from-file'\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.hass.connection.token, "from-file");
    }

    #[test]
    fn should_override_from_environment() {
        let mut config = valid();
        config.apply_overrides(env(&[
            ("HOMETRAY_TOKEN", "env-token"),
            ("HOMETRAY_API_URL", "http://hub:8123/api"),
            ("HOMETRAY_ENTITIES", "light.a, ,switch.b,"),
            ("HOMETRAY_DOMAINS", "cover"),
            ("HOMETRAY_LOG", "trace"),
        ]));

        assert_eq!(config.hass.connection.token, "env-token");
        assert_eq!(config.hass.connection.api_url, "http://hub:8123/api");
        assert_eq!(config.hass.entities, vec!["light.a", "switch.b"]);
        assert_eq!(config.hass.domains, vec!["cover"]);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_hometray_log() {
        let mut config = valid();
        config.apply_overrides(env(&[("HOMETRAY_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_keep_file_values_without_environment() {
        let mut config = valid();
        config.apply_overrides(env(&[]));
        assert_eq!(config.hass.connection.token, "token");
        assert_eq!(config.hass.entities, vec!["light.kitchen"]);
    }

    #[test]
    fn should_reject_missing_token() {
        let mut config = valid();
        config.hass.connection.token = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_api_url() {
        let mut config = valid();
        config.hass.connection.api_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = valid();
        config.polling.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_selection() {
        let mut config = valid();
        config.hass.entities.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_malformed_entity_id() {
        let mut config = valid();
        config.hass.entities.push("kitchen".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hass.entities"));
    }

    #[test]
    fn should_build_selection_from_hass_section() {
        let mut config = valid();
        config.hass.domains = vec!["switch".to_string()];
        config.hass.domain_entities_ignore = vec!["switch.printer".to_string()];

        let selection = config.selection().unwrap();

        assert_eq!(
            selection.entity_ids,
            vec![EntityId::parse("light.kitchen").unwrap()]
        );
        assert_eq!(selection.domains, vec!["switch"]);
        assert_eq!(
            selection.domain_entities_ignore,
            vec![EntityId::parse("switch.printer").unwrap()]
        );
    }

    #[test]
    fn should_pick_config_path_from_cli_then_env_then_default() {
        assert_eq!(
            config_path(Some("a.toml".to_string()), Some("b.toml".to_string())),
            PathBuf::from("a.toml")
        );
        assert_eq!(
            config_path(None, Some("b.toml".to_string())),
            PathBuf::from("b.toml")
        );
        assert_eq!(config_path(None, None), PathBuf::from("hometray.toml"));
    }
}
