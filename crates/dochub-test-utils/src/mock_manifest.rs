// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock manifest source for deterministic testing.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dochub_core::{DocHubError, ManifestSource};

#[derive(Debug, Clone)]
enum Response {
    Manifest(serde_json::Value),
    Failure(String),
    Never,
}

/// A manifest source returning a pre-configured response.
///
/// Every call is recorded as `(path, base_url)` for later assertions.
#[derive(Debug)]
pub struct MockManifestSource {
    response: Response,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockManifestSource {
    fn with_response(response: Response) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Resolve every request with `manifest`.
    pub fn with_manifest(manifest: serde_json::Value) -> Self {
        Self::with_response(Response::Manifest(manifest))
    }

    /// Fail every request with an HTTP error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_response(Response::Failure(message.into()))
    }

    /// Never resolve.
    pub fn never() -> Self {
        Self::with_response(Response::Never)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl ManifestSource for MockManifestSource {
    async fn request(&self, path: &str, base_url: &str) -> Result<serde_json::Value, DocHubError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.to_string(), base_url.to_string()));

        match &self.response {
            Response::Manifest(value) => Ok(value.clone()),
            Response::Failure(message) => Err(DocHubError::Http {
                message: message.clone(),
                source: None,
            }),
            Response::Never => futures::future::pending().await,
        }
    }
}
