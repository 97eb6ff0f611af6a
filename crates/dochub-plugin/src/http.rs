// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-backed manifest source and script host.
//!
//! Both resolve locations against the root of the application URL, so the
//! loader behaves the same whichever page the application was opened on.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use dochub_core::{DocHubError, ManifestSource, ScriptHost, ScriptLoad};
use reqwest::Url;
use tracing::debug;

/// Resolve `location` against the root of `base_url`.
///
/// Absolute URLs are returned unchanged; paths (with or without a leading
/// slash) are taken from the origin root, ignoring the path of `base_url`.
pub fn resolve_from_root(base_url: &str, location: &str) -> Result<Url, DocHubError> {
    let base = Url::parse(base_url)
        .map_err(|e| DocHubError::Config(format!("invalid application URL `{base_url}`: {e}")))?;
    let root = base
        .join("/")
        .map_err(|e| DocHubError::Config(format!("cannot derive root of `{base_url}`: {e}")))?;
    root.join(location).map_err(|e| DocHubError::Http {
        message: format!("cannot resolve `{location}` against `{root}`: {e}"),
        source: Some(Box::new(e)),
    })
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, DocHubError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DocHubError::Http {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Fetches the manifest over HTTP.
#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    client: reqwest::Client,
}

impl HttpManifestSource {
    /// Create a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, DocHubError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    async fn request(&self, path: &str, base_url: &str) -> Result<serde_json::Value, DocHubError> {
        let url = resolve_from_root(base_url, path)?;
        debug!(url = %url, "fetching plugin manifest");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DocHubError::Http {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocHubError::Http {
                message: format!("{url} returned {status}"),
                source: None,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DocHubError::Manifest {
                message: format!("manifest at {url} is not valid JSON: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

/// A script element inserted into the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    /// Resolved script location, or the raw value when it could not be resolved.
    pub src: String,
}

/// Script host that downloads plugin scripts over HTTP.
///
/// Every insertion is recorded in the document head, in insertion order. A
/// script counts as loaded once its body has been downloaded with a success
/// status; executing it is up to whoever owns the head.
#[derive(Debug, Clone)]
pub struct HttpScriptHost {
    client: reqwest::Client,
    base_url: String,
    head: Arc<Mutex<Vec<ScriptElement>>>,
}

impl HttpScriptHost {
    /// Create a host that resolves relative script URLs against the root of
    /// `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DocHubError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
            head: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Scripts inserted so far.
    pub fn head(&self) -> Vec<ScriptElement> {
        self.head
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn append(&self, src: String) {
        self.head
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScriptElement { src });
    }
}

impl ScriptHost for HttpScriptHost {
    fn insert_script(&self, url: &str) -> ScriptLoad {
        let resolved = match resolve_from_root(&self.base_url, url) {
            Ok(resolved) => resolved,
            Err(e) => {
                self.append(url.to_string());
                let url = url.to_string();
                return Box::pin(async move {
                    Err::<(), _>(DocHubError::ScriptLoad {
                        url,
                        message: e.to_string(),
                        source: Some(Box::new(e)),
                    })
                });
            }
        };

        self.append(resolved.to_string());
        let client = self.client.clone();
        Box::pin(async move {
            let url = resolved.to_string();
            let response = client
                .get(resolved)
                .send()
                .await
                .map_err(|e| DocHubError::ScriptLoad {
                    url: url.clone(),
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(DocHubError::ScriptLoad {
                    url,
                    message: format!("server returned {status}"),
                    source: None,
                });
            }

            let body = response.text().await.map_err(|e| DocHubError::ScriptLoad {
                url: url.clone(),
                message: format!("failed to read script body: {e}"),
                source: Some(Box::new(e)),
            })?;
            debug!(url = %url, bytes = body.len(), "plugin script downloaded");
            Ok::<(), DocHubError>(())
        })
    }
}
