// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registration bridge and the loader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which kind of document a renderer knows how to display
/// (e.g. "markdown", "plantuml", "swagger").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentType(pub String);

impl DocumentType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A composition mixin attached to a renderer component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mixin(pub String);

/// A renderer component supplied by a plugin.
///
/// The loader treats the component as opaque apart from its mixin list, which
/// the host guarantees to exist (possibly empty) before handing the component
/// to the UI layer. Everything else the plugin defines is carried in
/// `options` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RendererComponent {
    /// Optional display name declared by the plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Composition mixins. `None` means the plugin did not declare the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixins: Option<Vec<Mixin>>,

    /// Remaining plugin-defined fields.
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl RendererComponent {
    /// Create an empty component with the given display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Ensure the mixin list exists and return it for extension.
    ///
    /// An existing list is kept as is.
    pub fn ensure_mixins(&mut self) -> &mut Vec<Mixin> {
        self.mixins.get_or_insert_with(Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_mixins_creates_empty_list() {
        let mut component = RendererComponent::named("md");
        assert!(component.mixins.is_none());
        assert!(component.ensure_mixins().is_empty());
        assert_eq!(component.mixins, Some(vec![]));
    }

    #[test]
    fn ensure_mixins_keeps_existing_list() {
        let mut component = RendererComponent {
            mixins: Some(vec![Mixin("theme".into())]),
            ..RendererComponent::default()
        };
        component.ensure_mixins().push(Mixin("host".into()));
        assert_eq!(
            component.mixins,
            Some(vec![Mixin("theme".into()), Mixin("host".into())])
        );
    }

    #[test]
    fn component_keeps_unknown_fields() {
        let json = serde_json::json!({
            "name": "swagger-viewer",
            "props": ["url"],
            "template": "<div/>"
        });
        let component: RendererComponent = serde_json::from_value(json).expect("should parse");
        assert_eq!(component.name.as_deref(), Some("swagger-viewer"));
        assert!(component.mixins.is_none());
        assert_eq!(component.options.len(), 2);
        assert!(component.options.contains_key("template"));
    }

    #[test]
    fn document_type_display_and_from() {
        let t: DocumentType = "markdown".into();
        assert_eq!(t.to_string(), "markdown");
        assert_eq!(t.as_str(), "markdown");
        assert_eq!(DocumentType::from(String::from("markdown")), t);
    }
}
