// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for DocHub plugin loader tests.
//!
//! Provides mock capabilities for fast, deterministic tests without a
//! network or a rendering layer.
//!
//! # Components
//!
//! - [`MockManifestSource`] - Manifest source with a canned response
//! - [`MockScriptHost`] - Script host whose loads settle on demand
//! - [`RecordingSink`] - Component sink that captures installations

pub mod mock_manifest;
pub mod mock_scripts;
pub mod recording_sink;

pub use mock_manifest::MockManifestSource;
pub use mock_scripts::{MockScriptHost, ScriptBehavior};
pub use recording_sink::RecordingSink;
