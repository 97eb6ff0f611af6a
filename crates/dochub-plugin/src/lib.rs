// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registration and loading for DocHub.
//!
//! Plugins announce document renderers through the [`RegistrationBridge`],
//! which buffers announcements until the host initializes. The
//! [`PluginLoader`] then upgrades the bridge, reads the manifest, loads every
//! listed plugin script, and flips the [`PluginState`] readiness flag once all
//! loads have settled, whether they succeeded or not.

pub mod bridge;
pub mod host;
pub mod http;
pub mod loader;
pub mod manifest;
pub mod state;

pub use bridge::{
    BridgePhase, DocumentRegistrar, PendingRegistration, Registrar, RegistrationBridge,
    component_name,
};
pub use host::{ConfigEnvironment, LoggingComponentSink};
pub use http::{HttpManifestSource, HttpScriptHost, ScriptElement, resolve_from_root};
pub use loader::{
    LoadReport, LoaderCapabilities, OutcomeStatus, PluginLoader, PluginOutcome, ReadyTrigger,
};
pub use manifest::{PluginManifest, parse_manifest};
pub use state::PluginState;
