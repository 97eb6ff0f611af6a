// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration bridge through which plugin code announces renderers.
//!
//! Plugins may call [`RegistrationBridge::register`] before the host has
//! initialized. Until then the bridge is in the buffering phase and queues
//! every call. [`RegistrationBridge::upgrade`] switches it to the forwarding
//! phase and replays the queue, in call order, through the same
//! [`Registrar`] that handles late registrations.
//!
//! The replay runs without the phase lock held, so a registrar may itself
//! register further renderers. Those calls queue behind the batch being
//! replayed and are forwarded before the bridge reports forwarding.

use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use dochub_core::{ComponentSink, DocumentType, RendererComponent};
use strum::Display;
use tracing::debug;

use crate::state::PluginState;

/// Prefix of the name under which renderers are installed in the UI layer.
const COMPONENT_PREFIX: &str = "plugin-doc-";

static GLOBAL_BRIDGE: LazyLock<Arc<RegistrationBridge>> =
    LazyLock::new(|| Arc::new(RegistrationBridge::new()));

/// Name under which the renderer for `document_type` is installed.
pub fn component_name(document_type: &DocumentType) -> String {
    format!("{COMPONENT_PREFIX}{document_type}")
}

/// A registration received before the bridge was upgraded.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRegistration {
    pub document_type: DocumentType,
    pub component: RendererComponent,
}

/// Receives registrations once the host is initialized.
pub trait Registrar: Send + Sync {
    fn register(&self, document_type: DocumentType, component: RendererComponent);
}

/// Externally visible phase of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BridgePhase {
    Buffering,
    /// Upgraded, with buffered registrations still being replayed.
    Draining,
    Forwarding,
}

enum Phase {
    Buffering(Vec<PendingRegistration>),
    Draining(Vec<PendingRegistration>),
    Forwarding(Arc<dyn Registrar>),
}

/// Process-scoped registration entry point.
///
/// Safe to call from any thread at any time. The host injects a shared
/// instance into whatever loads plugin code; code with no other handle can
/// reach the process-wide instance through [`RegistrationBridge::global`].
pub struct RegistrationBridge {
    phase: Mutex<Phase>,
}

impl RegistrationBridge {
    /// Create a bridge in the buffering phase.
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Buffering(Vec::new())),
        }
    }

    /// The process-wide bridge.
    pub fn global() -> Arc<RegistrationBridge> {
        Arc::clone(&GLOBAL_BRIDGE)
    }

    /// Announce a renderer for a document type.
    ///
    /// Buffered while the bridge has not been upgraded, forwarded to the
    /// installed [`Registrar`] afterwards. Never fails.
    pub fn register(&self, document_type: impl Into<DocumentType>, component: RendererComponent) {
        let document_type = document_type.into();
        let registrar = {
            let mut phase = self.lock();
            match &mut *phase {
                Phase::Buffering(pending) | Phase::Draining(pending) => {
                    debug!(document_type = %document_type, "buffering plugin registration");
                    pending.push(PendingRegistration {
                        document_type,
                        component,
                    });
                    return;
                }
                Phase::Forwarding(registrar) => Arc::clone(registrar),
            }
        };
        registrar.register(document_type, component);
    }

    /// Switch to forwarding through `registrar` and replay buffered calls.
    ///
    /// Returns the number of registrations replayed, including any made while
    /// the replay was running. Those keep queueing until the queue is empty,
    /// so a registration made after the upgrade always lands after every
    /// buffered one. Upgrading a bridge that has already been upgraded does
    /// nothing and returns 0.
    pub fn upgrade(&self, registrar: Arc<dyn Registrar>) -> usize {
        let mut batch = {
            let mut phase = self.lock();
            match &mut *phase {
                Phase::Buffering(pending) => {
                    let batch = std::mem::take(pending);
                    *phase = Phase::Draining(Vec::new());
                    batch
                }
                Phase::Draining(_) | Phase::Forwarding(_) => {
                    debug!("registration bridge already upgraded");
                    return 0;
                }
            }
        };

        let mut drained = 0;
        loop {
            drained += batch.len();
            for PendingRegistration {
                document_type,
                component,
            } in batch
            {
                registrar.register(document_type, component);
            }

            let mut phase = self.lock();
            match &mut *phase {
                Phase::Draining(pending) if !pending.is_empty() => {
                    batch = std::mem::take(pending);
                }
                _ => {
                    *phase = Phase::Forwarding(Arc::clone(&registrar));
                    break;
                }
            }
        }
        drained
    }

    /// Current phase.
    pub fn phase(&self) -> BridgePhase {
        match &*self.lock() {
            Phase::Buffering(_) => BridgePhase::Buffering,
            Phase::Draining(_) => BridgePhase::Draining,
            Phase::Forwarding(_) => BridgePhase::Forwarding,
        }
    }

    /// Number of registrations waiting for the upgrade.
    pub fn pending_len(&self) -> usize {
        match &*self.lock() {
            Phase::Buffering(pending) | Phase::Draining(pending) => pending.len(),
            Phase::Forwarding(_) => 0,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Phase> {
        // A panicking registrar must not wedge every later registration.
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RegistrationBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistrationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationBridge")
            .field("phase", &self.phase())
            .field("pending", &self.pending_len())
            .finish()
    }
}

/// The forwarding-phase registrar installed by the loader.
///
/// Installs the component in the UI layer as `plugin-doc-{type}` after
/// making sure it has a mixin list, then records it in the document registry.
pub struct DocumentRegistrar {
    sink: Arc<dyn ComponentSink>,
    state: PluginState,
}

impl DocumentRegistrar {
    pub fn new(sink: Arc<dyn ComponentSink>, state: PluginState) -> Self {
        Self { sink, state }
    }
}

impl Registrar for DocumentRegistrar {
    fn register(&self, document_type: DocumentType, mut component: RendererComponent) {
        component.ensure_mixins();
        let name = component_name(&document_type);
        self.sink.install(&name, &component);
        debug!(document_type = %document_type, component = %name, "registered document renderer");
        self.state.insert_document(document_type, component);
    }
}
