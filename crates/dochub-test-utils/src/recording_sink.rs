// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component sink that captures installations for assertions.

use std::sync::{Mutex, PoisonError};

use dochub_core::{ComponentSink, RendererComponent};

/// Records every `(name, component)` pair passed to [`ComponentSink::install`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    installed: Mutex<Vec<(String, RendererComponent)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installations in call order.
    pub fn installed(&self) -> Vec<(String, RendererComponent)> {
        self.installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installed names in call order.
    pub fn installed_names(&self) -> Vec<String> {
        self.installed().into_iter().map(|(name, _)| name).collect()
    }
}

impl ComponentSink for RecordingSink {
    fn install(&self, name: &str, component: &RendererComponent) {
        self.installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), component.clone()));
    }
}
