// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the DocHub plugin loader.
//!
//! This crate provides the error type, the document/renderer types, and the
//! capability traits through which the loader talks to its collaborators
//! (manifest fetching, environment detection, script insertion, and the UI
//! component registry). Concrete implementations live in `dochub-plugin`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DocHubError;
pub use types::{DocumentType, Mixin, RendererComponent};

pub use traits::{ComponentSink, Environment, ManifestSource, ScriptHost, ScriptLoad};
