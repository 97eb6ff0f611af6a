// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-side capabilities used by the command line front end.

use std::sync::{Mutex, PoisonError};

use dochub_config::PluginMode;
use dochub_core::{ComponentSink, Environment, RendererComponent};
use tracing::info;

/// Environment answering from the configured plugin mode.
#[derive(Debug, Clone, Copy)]
pub struct ConfigEnvironment {
    mode: PluginMode,
}

impl ConfigEnvironment {
    pub fn new(mode: PluginMode) -> Self {
        Self { mode }
    }
}

impl Environment for ConfigEnvironment {
    fn is_plugin(&self) -> bool {
        self.mode == PluginMode::Plugin
    }
}

/// Component sink that logs every installation and remembers the names.
#[derive(Debug, Default)]
pub struct LoggingComponentSink {
    installed: Mutex<Vec<String>>,
}

impl LoggingComponentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names installed so far, in installation order.
    pub fn installed(&self) -> Vec<String> {
        self.installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ComponentSink for LoggingComponentSink {
    fn install(&self, name: &str, component: &RendererComponent) {
        info!(
            component = name,
            display_name = component.name.as_deref().unwrap_or("-"),
            "installed renderer component"
        );
        self.installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.to_string());
    }
}
