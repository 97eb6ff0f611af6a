// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dochub.toml` > `~/.config/dochub/dochub.toml` > `/etc/dochub/dochub.toml`
//! with environment variable overrides via `DOCHUB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DocHubConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dochub/dochub.toml` (system-wide)
/// 3. `~/.config/dochub/dochub.toml` (user XDG config)
/// 4. `./dochub.toml` (local directory)
/// 5. `DOCHUB_*` environment variables
pub fn load_config() -> Result<DocHubConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DocHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocHubConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DocHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DocHubConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DocHubConfig::default()))
        .merge(Toml::file("/etc/dochub/dochub.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dochub/dochub.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dochub.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `DOCHUB_PLUGINS_LOAD_TIMEOUT_SECS` must map to
/// `plugins.load_timeout_secs`.
fn env_provider() -> Env {
    Env::prefixed("DOCHUB_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("plugins_", "plugins.", 1);
        mapped.into()
    })
}
