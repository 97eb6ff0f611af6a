// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest retrieval capability.

use async_trait::async_trait;

use crate::error::DocHubError;

/// Fetches a JSON resource relative to a base location.
///
/// The loader calls this exactly once per process, for the plugin manifest.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Request `path` resolved against `base_url` and return the decoded body.
    ///
    /// Any transport failure, non-success status, or undecodable body is an
    /// error.
    async fn request(&self, path: &str, base_url: &str) -> Result<serde_json::Value, DocHubError>;
}
