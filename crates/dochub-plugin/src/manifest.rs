// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing.
//!
//! The manifest is a JSON object served from the application root. Only its
//! `plugins` field matters: a list of script URLs, absolute or relative.
//! Parsing is lenient. A missing or non-list `plugins` field reads as an
//! empty list and non-string entries are skipped.

use dochub_core::DocHubError;
use serde::Serialize;
use tracing::debug;

/// Parsed plugin manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginManifest {
    /// Script URLs in listing order.
    pub plugins: Vec<String>,
}

impl PluginManifest {
    /// Read the plugin list out of a decoded manifest body.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(entries) = value.get("plugins").and_then(|p| p.as_array()) else {
            debug!("manifest has no plugin list, treating as empty");
            return Self::default();
        };

        let plugins = entries
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(url) => Some(url.to_string()),
                None => {
                    debug!(entry = %entry, "skipping non-string manifest entry");
                    None
                }
            })
            .collect();

        Self { plugins }
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }
}

/// Parse manifest text.
///
/// Text that is not JSON at all is an error; any JSON value is accepted with
/// the lenient rules of [`PluginManifest::from_value`].
pub fn parse_manifest(json: &str) -> Result<PluginManifest, DocHubError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| DocHubError::Manifest {
            message: format!("manifest is not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(PluginManifest::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_plugins_in_order() {
        let manifest = PluginManifest::from_value(&json!({
            "plugins": ["https://a/p1.js", "/plugins/p2.js"]
        }));
        assert_eq!(manifest.plugins, vec!["https://a/p1.js", "/plugins/p2.js"]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn missing_plugins_is_empty() {
        let manifest = PluginManifest::from_value(&json!({ "name": "DocHub" }));
        assert!(manifest.is_empty());
    }

    #[test]
    fn non_list_plugins_is_empty() {
        assert!(PluginManifest::from_value(&json!({ "plugins": "p1.js" })).is_empty());
        assert!(PluginManifest::from_value(&json!({ "plugins": null })).is_empty());
        assert!(PluginManifest::from_value(&json!({ "plugins": { "a": 1 } })).is_empty());
    }

    #[test]
    fn non_object_body_is_empty() {
        assert!(PluginManifest::from_value(&json!(["p1.js"])).is_empty());
        assert!(PluginManifest::from_value(&json!("text")).is_empty());
    }

    #[test]
    fn non_string_entries_are_skipped() {
        let manifest = PluginManifest::from_value(&json!({
            "plugins": ["p1.js", 42, null, {"src": "x"}, "p2.js"]
        }));
        assert_eq!(manifest.plugins, vec!["p1.js", "p2.js"]);
    }

    #[test]
    fn parse_manifest_rejects_invalid_json() {
        let err = parse_manifest("{ plugins: [").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn parse_manifest_accepts_text() {
        let manifest = parse_manifest(r#"{"plugins": ["p1.js"]}"#).unwrap();
        assert_eq!(manifest.plugins, vec!["p1.js"]);
    }
}
