// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock script host for deterministic testing.
//!
//! `MockScriptHost` records every inserted script and lets a test decide how
//! and when each load settles: immediately, never, or on an explicit
//! [`MockScriptHost::settle`] call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use dochub_core::{DocHubError, ScriptHost, ScriptLoad};
use futures::FutureExt;
use tokio::sync::oneshot;

/// How a script inserted into the mock host settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptBehavior {
    /// Fires the load event immediately.
    Load,
    /// Fires the error event immediately with the given reason.
    Fail(String),
    /// Fires neither event.
    Hang,
    /// Waits for [`MockScriptHost::settle`].
    Manual,
}

#[derive(Debug)]
struct HostState {
    default: ScriptBehavior,
    scripted: HashMap<String, ScriptBehavior>,
    inserted: Vec<String>,
    waiting: VecDeque<(String, oneshot::Sender<Result<(), String>>)>,
}

/// A script host whose loads settle the way the test says.
#[derive(Debug)]
pub struct MockScriptHost {
    state: Mutex<HostState>,
}

impl MockScriptHost {
    /// Create a host where every script waits for [`MockScriptHost::settle`].
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HostState {
                default: ScriptBehavior::Manual,
                scripted: HashMap::new(),
                inserted: Vec::new(),
                waiting: VecDeque::new(),
            }),
        }
    }

    /// Behavior for scripts without a specific one.
    pub fn set_default(&self, behavior: ScriptBehavior) {
        self.lock().default = behavior;
    }

    /// Behavior for the script at `url`.
    pub fn script(&self, url: impl Into<String>, behavior: ScriptBehavior) {
        self.lock().scripted.insert(url.into(), behavior);
    }

    /// Inserted script URLs, in insertion order.
    pub fn inserted(&self) -> Vec<String> {
        self.lock().inserted.clone()
    }

    /// URLs of manual loads that have not settled yet.
    pub fn waiting(&self) -> Vec<String> {
        self.lock().waiting.iter().map(|(url, _)| url.clone()).collect()
    }

    /// Settle the oldest waiting load for `url`. `Err` fires the error event.
    ///
    /// Returns `false` when no load for `url` is waiting.
    pub fn settle(&self, url: &str, result: Result<(), String>) -> bool {
        let sender = {
            let mut state = self.lock();
            match state.waiting.iter().position(|(u, _)| u == url) {
                Some(index) => state.waiting.remove(index).map(|(_, tx)| tx),
                None => None,
            }
        };
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

fn load_error(url: &str, message: impl Into<String>) -> DocHubError {
    DocHubError::ScriptLoad {
        url: url.to_string(),
        message: message.into(),
        source: None,
    }
}

impl ScriptHost for MockScriptHost {
    fn insert_script(&self, url: &str) -> ScriptLoad {
        let mut state = self.lock();
        state.inserted.push(url.to_string());
        let behavior = state
            .scripted
            .get(url)
            .cloned()
            .unwrap_or_else(|| state.default.clone());

        match behavior {
            ScriptBehavior::Load => futures::future::ready(Ok(())).boxed(),
            ScriptBehavior::Fail(reason) => {
                futures::future::ready(Err(load_error(url, reason))).boxed()
            }
            ScriptBehavior::Hang => futures::future::pending().boxed(),
            ScriptBehavior::Manual => {
                let (tx, rx) = oneshot::channel();
                state.waiting.push_back((url.to_string(), tx));
                let url = url.to_string();
                async move {
                    match rx.await {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(reason)) => Err(load_error(&url, reason)),
                        Err(_) => Err(load_error(&url, "mock script host dropped")),
                    }
                }
                .boxed()
            }
        }
    }
}
