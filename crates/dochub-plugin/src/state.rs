// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observable plugin state: the readiness flag and the document registry.
//!
//! `PluginState` is a cheap handle (`Clone` shares the same state). The rest
//! of the application reads it to decide whether plugin renderers may be used
//! and to look a renderer up by document type.

use std::sync::Arc;

use dashmap::DashMap;
use dochub_core::{DocumentType, RendererComponent};
use tokio::sync::watch;

#[derive(Debug)]
struct Inner {
    ready: watch::Sender<bool>,
    documents: DashMap<DocumentType, RendererComponent>,
}

/// Process-wide plugin state shared between the loader and its readers.
#[derive(Debug, Clone)]
pub struct PluginState {
    inner: Arc<Inner>,
}

impl PluginState {
    /// Create a not-ready state with an empty registry.
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                ready,
                documents: DashMap::new(),
            }),
        }
    }

    /// Whether the plugin loading phase has finished.
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.borrow()
    }

    /// Mark the loading phase finished.
    ///
    /// Returns `true` only for the call that performed the transition. The
    /// flag is never reset.
    pub fn set_ready(&self) -> bool {
        self.inner.ready.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    /// Subscribe to readiness changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.ready.subscribe()
    }

    /// Wait until the loading phase has finished.
    pub async fn wait_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Insert or overwrite the renderer for a document type.
    pub fn insert_document(&self, document_type: DocumentType, component: RendererComponent) {
        self.inner.documents.insert(document_type, component);
    }

    /// Look up the renderer for a document type.
    pub fn document(&self, document_type: &str) -> Option<RendererComponent> {
        self.inner
            .documents
            .get(&DocumentType::from(document_type))
            .map(|entry| entry.value().clone())
    }

    /// Snapshot of the registry, sorted by document type.
    pub fn documents(&self) -> Vec<(DocumentType, RendererComponent)> {
        let mut entries: Vec<_> = self
            .inner
            .documents
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of registered document types.
    pub fn document_count(&self) -> usize {
        self.inner.documents.len()
    }
}

impl Default for PluginState {
    fn default() -> Self {
        Self::new()
    }
}
