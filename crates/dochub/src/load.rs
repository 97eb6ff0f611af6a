// SPDX-FileCopyrightText: 2026 DocHub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dochub load` and `dochub manifest` subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dochub_config::DocHubConfig;
use dochub_core::DocHubError;
use dochub_plugin::{
    ConfigEnvironment, HttpManifestSource, HttpScriptHost, LoadReport, LoaderCapabilities,
    LoggingComponentSink, OutcomeStatus, PluginLoader, PluginState, RegistrationBridge,
    parse_manifest,
};
use tracing::info;

/// Run the plugin loading phase with HTTP-backed capabilities.
pub async fn run_load(config: &DocHubConfig, json: bool) -> Result<(), DocHubError> {
    let timeout = Duration::from_secs(config.plugins.request_timeout_secs);
    let capabilities = LoaderCapabilities {
        source: Arc::new(HttpManifestSource::new(timeout)?),
        environment: Arc::new(ConfigEnvironment::new(config.plugins.mode)),
        scripts: Arc::new(HttpScriptHost::new(config.app.base_url.clone(), timeout)?),
        sink: Arc::new(LoggingComponentSink::new()),
    };

    let state = PluginState::new();
    let loader = PluginLoader::from_config(
        config,
        RegistrationBridge::global(),
        state.clone(),
        capabilities,
    );

    info!(base_url = %config.app.base_url, "starting plugin loading");
    let report = loader.init().await;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| DocHubError::Internal(format!("cannot render report: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&report, state.document_count()));
    }
    Ok(())
}

/// List the plugins of a local manifest file.
pub fn run_manifest(file: &Path) -> Result<(), DocHubError> {
    let text = std::fs::read_to_string(file).map_err(|e| DocHubError::Manifest {
        message: format!("cannot read {}: {e}", file.display()),
        source: Some(Box::new(e)),
    })?;
    let manifest = parse_manifest(&text)?;
    if manifest.is_empty() {
        println!("no plugins listed");
    }
    for url in &manifest.plugins {
        println!("{url}");
    }
    Ok(())
}

fn render_report(report: &LoadReport, documents: usize) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Loaded => out.push_str(&format!("  ok    {}\n", outcome.url)),
            OutcomeStatus::Failed(reason) => {
                out.push_str(&format!("  FAIL  {} ({reason})\n", outcome.url))
            }
        }
    }
    out.push_str(&format!(
        "ready: {} ({} loaded, {} failed, {} document types, {} replayed)\n",
        report.trigger,
        report.loaded(),
        report.failed(),
        documents,
        report.drained
    ));
    out
}
