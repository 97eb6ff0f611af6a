// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script insertion capability.

use futures::future::BoxFuture;

use crate::error::DocHubError;

/// Future returned by [`ScriptHost::insert_script`].
///
/// Resolves with `Ok(())` when the script fires its load event and with an
/// error when it fires its error event. It may never resolve if the script
/// fires neither.
pub type ScriptLoad = BoxFuture<'static, Result<(), DocHubError>>;

/// Inserts executable script resources into the document.
pub trait ScriptHost: Send + Sync {
    /// Insert a script element with `src = url`.
    ///
    /// The insertion itself happens synchronously, before this returns, so
    /// callers control dispatch order. The returned future reports how the
    /// load settled.
    fn insert_script(&self, url: &str) -> ScriptLoad;
}
