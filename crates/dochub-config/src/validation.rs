// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL shapes, non-empty paths, and positive timeouts.

use crate::diagnostic::ConfigError;
use crate::model::DocHubConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DocHubConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.app.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.base_url must not be empty".to_string(),
        });
    } else if !has_http_scheme(base_url) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.base_url `{base_url}` must be an absolute http:// or https:// URL"
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.plugins.manifest_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.manifest_path must not be empty".to_string(),
        });
    }

    if config.plugins.load_timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "plugins.load_timeout_secs must be greater than 0 when set".to_string(),
        });
    }

    if config.plugins.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "plugins.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when `url` starts with an http(s) scheme followed by a host.
fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&DocHubConfig::default()).is_ok());
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let mut config = DocHubConfig::default();
        config.app.base_url = "/docs/".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("app.base_url"));
    }

    #[test]
    fn partial_plugins_section_keeps_defaults() {
        let toml_str = r#"
[plugins]
mode = "plugin"
load_timeout_secs = 15
"#;
        let config: DocHubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plugins.mode, crate::model::PluginMode::Plugin);
        assert_eq!(config.plugins.load_timeout_secs, Some(15));
        assert_eq!(config.plugins.manifest_path, "/manifest.json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_load_timeout_from_toml_is_rejected() {
        let toml_str = r#"
[plugins]
load_timeout_secs = 0
"#;
        let config: DocHubConfig = toml::from_str(toml_str).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collects_every_error() {
        let mut config = DocHubConfig::default();
        config.app.base_url = String::new();
        config.app.log_level = "loud".to_string();
        config.plugins.manifest_path = " ".to_string();
        config.plugins.load_timeout_secs = Some(0);
        config.plugins.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn scheme_check() {
        assert!(has_http_scheme("https://docs.example.com/"));
        assert!(has_http_scheme("http://localhost:8080"));
        assert!(!has_http_scheme("https://"));
        assert!(!has_http_scheme("file:///tmp"));
        assert!(!has_http_scheme("http:///path"));
    }
}
