// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the plugin loader.
//!
//! The loader owns none of these concerns. Each one is injected at process
//! start so the coordination logic can run against real HTTP backends or
//! deterministic mocks alike.

pub mod component;
pub mod environment;
pub mod manifest;
pub mod script;

pub use component::ComponentSink;
pub use environment::Environment;
pub use manifest::ManifestSource;
pub use script::{ScriptHost, ScriptLoad};
