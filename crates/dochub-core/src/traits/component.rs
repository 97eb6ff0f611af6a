// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI component registration capability.

use crate::types::RendererComponent;

/// Receives renderer components for the rendering layer.
///
/// Treated as an opaque sink: installing a component under a name that is
/// already taken replaces the previous one.
pub trait ComponentSink: Send + Sync {
    /// Make `component` available to the rendering layer under `name`.
    fn install(&self, name: &str, component: &RendererComponent);
}
