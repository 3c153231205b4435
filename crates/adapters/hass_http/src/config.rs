//! Home Assistant connection settings.

use serde::Deserialize;

/// How to reach the hub.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HassConfig {
    /// Base API URL, e.g. `http://192.168.0.125:8123/api`.
    pub api_url: String,
    /// Long-lived access token.
    pub token: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for HassConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8123/api".to_string(),
            token: String::new(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = HassConfig::default();
        assert_eq!(config.api_url, "http://localhost:8123/api");
        assert!(config.token.is_empty());
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"token = "abc""#;
        let config: HassConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.timeout_secs, 10);
    }
}
