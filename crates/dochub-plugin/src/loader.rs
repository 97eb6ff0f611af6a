// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest loader and completion tracker.
//!
//! [`PluginLoader::init`] upgrades the registration bridge, fetches the
//! manifest, inserts one script per listed plugin, and marks the plugin state
//! ready once every load has settled. Each load is wrapped in a future that
//! always resolves to an outcome, so a failed plugin counts toward completion
//! exactly like a loaded one. Completions are consumed in whatever order they
//! arrive.
//!
//! Every path ends with the state ready: plugin loading not applicable, an
//! empty manifest, all loads settled, or the manifest unavailable. The one
//! exception is a script that never settles while no load timeout is set.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use dochub_config::DocHubConfig;
use dochub_core::{ComponentSink, DocHubError, Environment, ManifestSource, ScriptHost};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::Serialize;
use strum::Display;
use tracing::{debug, error, info, warn};

use crate::bridge::{DocumentRegistrar, RegistrationBridge};
use crate::manifest::PluginManifest;
use crate::state::PluginState;

/// Default manifest location relative to the application root.
pub const DEFAULT_MANIFEST_PATH: &str = "/manifest.json";

/// Collaborators the loader depends on.
#[derive(Clone)]
pub struct LoaderCapabilities {
    pub source: Arc<dyn ManifestSource>,
    pub environment: Arc<dyn Environment>,
    pub scripts: Arc<dyn ScriptHost>,
    pub sink: Arc<dyn ComponentSink>,
}

/// What moved the plugin state to ready.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ReadyTrigger {
    /// The application runs as a plugin itself; nothing was loaded.
    PluginMode,
    /// The manifest listed no plugins.
    EmptyManifest,
    /// Every dispatched load settled.
    AllSettled,
    /// The manifest could not be fetched or read.
    ManifestUnavailable { reason: String },
    /// `init` had already run on this loader; nothing happened.
    AlreadyInitialized,
}

/// How a single plugin load settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeStatus {
    Loaded,
    Failed(String),
}

/// Diagnostic record for one plugin script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginOutcome {
    pub url: String,
    pub status: OutcomeStatus,
}

impl PluginOutcome {
    pub fn is_loaded(&self) -> bool {
        self.status == OutcomeStatus::Loaded
    }
}

/// Summary returned by [`PluginLoader::init`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Registrations replayed from the bridge buffer.
    pub drained: usize,
    pub trigger: ReadyTrigger,
    /// One record per dispatched script, in completion order.
    pub outcomes: Vec<PluginOutcome>,
}

impl LoadReport {
    fn new(drained: usize, trigger: ReadyTrigger) -> Self {
        Self {
            drained,
            trigger,
            outcomes: Vec::new(),
        }
    }

    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.loaded()
    }
}

/// Coordinates the one-shot plugin loading phase.
pub struct PluginLoader {
    bridge: Arc<RegistrationBridge>,
    state: PluginState,
    capabilities: LoaderCapabilities,
    base_url: String,
    manifest_path: String,
    load_timeout: Option<Duration>,
    in_flight: AtomicUsize,
    initialized: AtomicBool,
}

impl PluginLoader {
    /// Create a loader for the application rooted at `base_url`.
    pub fn new(
        bridge: Arc<RegistrationBridge>,
        state: PluginState,
        capabilities: LoaderCapabilities,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            bridge,
            state,
            capabilities,
            base_url: base_url.into(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            load_timeout: None,
            in_flight: AtomicUsize::new(0),
            initialized: AtomicBool::new(false),
        }
    }

    /// Create a loader with location and timeouts taken from configuration.
    pub fn from_config(
        config: &DocHubConfig,
        bridge: Arc<RegistrationBridge>,
        state: PluginState,
        capabilities: LoaderCapabilities,
    ) -> Self {
        let loader = Self::new(bridge, state, capabilities, config.app.base_url.clone())
            .with_manifest_path(config.plugins.manifest_path.clone());
        match config.plugins.load_timeout_secs {
            Some(secs) => loader.with_load_timeout(Duration::from_secs(secs)),
            None => loader,
        }
    }

    /// Fetch the manifest from `path` instead of [`DEFAULT_MANIFEST_PATH`].
    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Count a load that has not settled after `timeout` as failed.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Shared plugin state this loader publishes to.
    pub fn state(&self) -> &PluginState {
        &self.state
    }

    /// Number of dispatched loads that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run the plugin loading phase.
    ///
    /// The bridge upgrade and the plugin-mode check happen before the first
    /// suspension point. Only the first call does anything; later calls
    /// return a report with [`ReadyTrigger::AlreadyInitialized`].
    pub async fn init(&self) -> LoadReport {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("plugin loader already initialized, ignoring");
            return LoadReport::new(0, ReadyTrigger::AlreadyInitialized);
        }

        let registrar = Arc::new(DocumentRegistrar::new(
            Arc::clone(&self.capabilities.sink),
            self.state.clone(),
        ));
        let drained = self.bridge.upgrade(registrar);
        debug!(drained, "registration bridge forwarding");

        if self.capabilities.environment.is_plugin() {
            info!("running as a plugin, skipping plugin manifest");
            return self.finish(LoadReport::new(drained, ReadyTrigger::PluginMode));
        }

        let manifest = match self.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(e) => {
                error!(error = %e, "failed to load application manifest");
                return self.finish(LoadReport::new(
                    drained,
                    ReadyTrigger::ManifestUnavailable {
                        reason: e.to_string(),
                    },
                ));
            }
        };

        if manifest.is_empty() {
            debug!("manifest lists no plugins");
            return self.finish(LoadReport::new(drained, ReadyTrigger::EmptyManifest));
        }

        let mut report = LoadReport::new(drained, ReadyTrigger::AllSettled);
        let mut pending = FuturesUnordered::new();
        for url in manifest.plugins {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            pending.push(self.dispatch(url));
        }

        while let Some(outcome) = pending.next().await {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            match &outcome.status {
                OutcomeStatus::Loaded => {
                    info!(url = %outcome.url, remaining, "plugin loaded");
                }
                OutcomeStatus::Failed(reason) => {
                    error!(url = %outcome.url, reason = %reason, remaining, "plugin failed to load");
                }
            }
            report.outcomes.push(outcome);
        }

        info!(
            loaded = report.loaded(),
            failed = report.failed(),
            "plugin loading finished"
        );
        self.finish(report)
    }

    async fn fetch_manifest(&self) -> Result<PluginManifest, DocHubError> {
        let value = self
            .capabilities
            .source
            .request(&self.manifest_path, &self.base_url)
            .await?;
        Ok(PluginManifest::from_value(&value))
    }

    /// Insert the script now and return a future that always resolves to an
    /// outcome.
    fn dispatch(&self, url: String) -> impl Future<Output = PluginOutcome> + Send + 'static {
        debug!(url = %url, "inserting plugin script");
        let load = self.capabilities.scripts.insert_script(&url);
        let timeout = self.load_timeout;

        async move {
            let result = match timeout {
                Some(duration) => tokio::time::timeout(duration, load)
                    .await
                    .unwrap_or(Err(DocHubError::Timeout { duration })),
                None => load.await,
            };
            let status = match result {
                Ok(()) => OutcomeStatus::Loaded,
                Err(e) => OutcomeStatus::Failed(e.to_string()),
            };
            PluginOutcome { url, status }
        }
    }

    fn finish(&self, report: LoadReport) -> LoadReport {
        if self.state.set_ready() {
            debug!(trigger = %report.trigger, "plugins ready");
        }
        report
    }
}

impl std::fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLoader")
            .field("base_url", &self.base_url)
            .field("manifest_path", &self.manifest_path)
            .field("load_timeout", &self.load_timeout)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::RendererComponent;
    use dochub_test_utils::{MockManifestSource, MockScriptHost, RecordingSink, ScriptBehavior};
    use futures::FutureExt;
    use serde_json::json;
    use tracing_test::traced_test;

    struct Fixture {
        bridge: Arc<RegistrationBridge>,
        state: PluginState,
        source: Arc<MockManifestSource>,
        scripts: Arc<MockScriptHost>,
        sink: Arc<RecordingSink>,
    }

    impl Fixture {
        fn new(source: MockManifestSource) -> Self {
            Self {
                bridge: Arc::new(RegistrationBridge::new()),
                state: PluginState::new(),
                source: Arc::new(source),
                scripts: Arc::new(MockScriptHost::new()),
                sink: Arc::new(RecordingSink::new()),
            }
        }

        fn loader(&self, is_plugin: bool) -> PluginLoader {
            PluginLoader::new(
                Arc::clone(&self.bridge),
                self.state.clone(),
                LoaderCapabilities {
                    source: self.source.clone(),
                    environment: Arc::new(is_plugin),
                    scripts: self.scripts.clone(),
                    sink: self.sink.clone(),
                },
                "https://docs.example.com/app/index.html",
            )
        }
    }

    #[test]
    fn plugin_mode_is_ready_without_suspending() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({"plugins": ["p1.js"]})));
        let loader = fx.loader(true);

        let report = loader
            .init()
            .now_or_never()
            .expect("plugin mode must not suspend");

        assert_eq!(report.trigger, ReadyTrigger::PluginMode);
        assert!(fx.state.is_ready());
        assert_eq!(fx.source.request_count(), 0);
        assert!(fx.scripts.inserted().is_empty());
    }

    #[test]
    fn bridge_is_upgraded_before_any_fetch() {
        let fx = Fixture::new(MockManifestSource::never());
        fx.bridge.register("markdown", RendererComponent::named("md"));
        let loader = fx.loader(false);

        // The manifest never arrives, so init stays pending after one poll.
        assert!(loader.init().now_or_never().is_none());

        assert_eq!(fx.sink.installed_names(), vec!["plugin-doc-markdown"]);
        assert!(fx.state.document("markdown").is_some());
        assert!(!fx.state.is_ready());
    }

    #[tokio::test]
    async fn manifest_is_requested_from_configured_path() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({})));
        let loader = fx.loader(false).with_manifest_path("/plugins.json");

        loader.init().await;

        assert_eq!(
            fx.source.requests(),
            vec![(
                "/plugins.json".to_string(),
                "https://docs.example.com/app/index.html".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn empty_manifest_is_ready_without_insertions() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({"plugins": []})));
        let report = fx.loader(false).init().await;

        assert_eq!(report.trigger, ReadyTrigger::EmptyManifest);
        assert!(fx.state.is_ready());
        assert!(fx.scripts.inserted().is_empty());
    }

    #[tokio::test]
    async fn absent_plugin_list_is_ready_without_insertions() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({"title": "DocHub"})));
        let report = fx.loader(false).init().await;

        assert_eq!(report.trigger, ReadyTrigger::EmptyManifest);
        assert!(fx.state.is_ready());
        assert!(fx.scripts.inserted().is_empty());
    }

    #[tokio::test]
    async fn manifest_failure_is_ready_without_insertions() {
        let fx = Fixture::new(MockManifestSource::failing("connection refused"));
        let report = fx.loader(false).init().await;

        match report.trigger {
            ReadyTrigger::ManifestUnavailable { reason } => {
                assert!(reason.contains("connection refused"));
            }
            other => panic!("unexpected trigger {other:?}"),
        }
        assert!(fx.state.is_ready());
        assert!(fx.scripts.inserted().is_empty());
    }

    #[tokio::test]
    async fn scripts_are_inserted_in_manifest_order() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({
            "plugins": ["c.js", "a.js", "b.js"]
        })));
        fx.scripts.set_default(ScriptBehavior::Load);

        let report = fx.loader(false).init().await;

        assert_eq!(fx.scripts.inserted(), vec!["c.js", "a.js", "b.js"]);
        assert_eq!(report.loaded(), 3);
    }

    #[tokio::test]
    async fn mixed_outcomes_converge_on_ready() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({
            "plugins": ["https://a/p1.js", "https://a/p2.js"]
        })));
        fx.scripts.script("https://a/p1.js", ScriptBehavior::Load);
        fx.scripts
            .script("https://a/p2.js", ScriptBehavior::Fail("404 Not Found".into()));
        let loader = fx.loader(false);

        let report = loader.init().await;

        assert_eq!(report.trigger, ReadyTrigger::AllSettled);
        assert!(fx.state.is_ready());
        assert_eq!(loader.in_flight(), 0);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.loaded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(fx.state.document_count(), 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn every_outcome_is_logged_with_its_url() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({
            "plugins": ["https://a/p1.js", "https://a/p2.js"]
        })));
        fx.scripts.script("https://a/p1.js", ScriptBehavior::Load);
        fx.scripts
            .script("https://a/p2.js", ScriptBehavior::Fail("blocked".into()));

        fx.loader(false).init().await;

        assert!(logs_contain("plugin loaded"));
        assert!(logs_contain("plugin failed to load"));
        assert!(logs_contain("https://a/p2.js"));
    }

    #[tokio::test]
    #[traced_test]
    async fn manifest_failure_is_logged() {
        let fx = Fixture::new(MockManifestSource::failing("offline"));
        fx.loader(false).init().await;
        assert!(logs_contain("failed to load application manifest"));
    }

    #[tokio::test(start_paused = true)]
    async fn load_timeout_counts_as_failure() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({
            "plugins": ["fast.js", "stuck.js"]
        })));
        fx.scripts.script("fast.js", ScriptBehavior::Load);
        fx.scripts.script("stuck.js", ScriptBehavior::Hang);
        let loader = fx.loader(false).with_load_timeout(Duration::from_secs(10));

        let report = loader.init().await;

        assert!(fx.state.is_ready());
        let stuck = report
            .outcomes
            .iter()
            .find(|o| o.url == "stuck.js")
            .expect("stuck.js should have an outcome");
        assert!(matches!(&stuck.status, OutcomeStatus::Failed(r) if r.contains("timed out")));
    }

    #[tokio::test]
    async fn second_init_does_nothing() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({"plugins": []})));
        let loader = fx.loader(false);

        loader.init().await;
        let again = loader.init().await;

        assert_eq!(again.trigger, ReadyTrigger::AlreadyInitialized);
        assert_eq!(fx.source.request_count(), 1);
    }

    #[test]
    fn from_config_applies_plugin_settings() {
        let fx = Fixture::new(MockManifestSource::with_manifest(json!({})));
        let mut config = DocHubConfig::default();
        config.app.base_url = "https://docs.example.com/".to_string();
        config.plugins.manifest_path = "/custom.json".to_string();
        config.plugins.load_timeout_secs = Some(7);

        let loader = PluginLoader::from_config(
            &config,
            Arc::clone(&fx.bridge),
            fx.state.clone(),
            LoaderCapabilities {
                source: fx.source.clone(),
                environment: Arc::new(false),
                scripts: fx.scripts.clone(),
                sink: fx.sink.clone(),
            },
        );

        assert_eq!(loader.base_url, "https://docs.example.com/");
        assert_eq!(loader.manifest_path, "/custom.json");
        assert_eq!(loader.load_timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn report_serializes_outcomes() {
        let report = LoadReport {
            drained: 0,
            trigger: ReadyTrigger::AllSettled,
            outcomes: vec![
                PluginOutcome {
                    url: "p1.js".into(),
                    status: OutcomeStatus::Loaded,
                },
                PluginOutcome {
                    url: "p2.js".into(),
                    status: OutcomeStatus::Failed("boom".into()),
                },
            ],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["trigger"]["kind"], "all-settled");
        assert_eq!(value["outcomes"][0]["status"], "loaded");
        assert_eq!(value["outcomes"][1]["status"]["failed"], "boom");
    }
}
