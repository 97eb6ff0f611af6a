// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the DocHub plugin loader.

use thiserror::Error;

/// The primary error type used across the capability traits and loader.
///
/// The loader itself never returns these for manifest or script problems;
/// they are folded into the load report and logged. They do surface from the
/// capability implementations and from configuration handling.
#[derive(Debug, Error)]
pub enum DocHubError {
    /// Configuration errors (invalid base URL, bad mode string, and so on).
    #[error("configuration error: {0}")]
    Config(String),

    /// The manifest could not be interpreted.
    #[error("manifest error: {message}")]
    Manifest {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A plugin script fired its error event (or could not be inserted).
    #[error("failed to load plugin script {url}: {message}")]
    ScriptLoad {
        url: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport-level failures (connection refused, non-success status).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
