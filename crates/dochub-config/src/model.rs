// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the DocHub plugin loader.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level DocHub configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocHubConfig {
    /// Application location and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Plugin manifest and script loading.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Application-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Root location of the application. The manifest and relative plugin
    /// URLs resolve against the root of this URL, not its path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How the application is hosted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PluginMode {
    /// Regular application; external plugins are loaded from the manifest.
    #[default]
    Standalone,
    /// The application is itself embedded as a plugin; no plugins are loaded.
    Plugin,
}

/// Plugin loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Location of the manifest, resolved against the application root.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Hosting mode.
    #[serde(default)]
    pub mode: PluginMode,

    /// Seconds after which an unsettled plugin load counts as failed.
    /// Unset means wait indefinitely.
    #[serde(default)]
    pub load_timeout_secs: Option<u64>,

    /// HTTP timeout for the manifest and script downloads, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            mode: PluginMode::default(),
            load_timeout_secs: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_manifest_path() -> String {
    "/manifest.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn plugin_mode_round_trips_through_strings() {
        assert_eq!(PluginMode::Standalone.to_string(), "standalone");
        assert_eq!(PluginMode::from_str("plugin").unwrap(), PluginMode::Plugin);
        assert!(PluginMode::from_str("embedded").is_err());
    }

    #[test]
    fn defaults_point_at_root_manifest() {
        let config = DocHubConfig::default();
        assert_eq!(config.plugins.manifest_path, "/manifest.json");
        assert_eq!(config.plugins.mode, PluginMode::Standalone);
        assert!(config.plugins.load_timeout_secs.is_none());
    }
}
