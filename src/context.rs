//! Service context bundling all port trait objects.

use std::path::PathBuf;

use crate::adapters::live::{LiveCodexProbe, LiveRemoteResolver, LiveTrackerClient};
use crate::ports::{CodexProbe, RemoteResolver, TrackerQueries};

/// Bundles the port trait objects behind one handle.
///
/// Each field covers one external collaborator. Handlers receive a shared
/// context; tests construct one from stub implementations.
pub struct ServiceContext {
    /// Resolves whether a project has a GitHub remote.
    pub remote: Box<dyn RemoteResolver>,
    /// Runs issue and GraphQL queries against the tracker.
    pub tracker: Box<dyn TrackerQueries>,
    /// Probes the Codex CLI installation.
    pub codex: Box<dyn CodexProbe>,
}

impl ServiceContext {
    /// Creates a live context shelling out to `git`, `gh`, and `codex`.
    ///
    /// `gh_bin` overrides the GitHub CLI binary; `codex_bin`, when set,
    /// skips the Codex binary search.
    #[must_use]
    pub fn live(gh_bin: &str, codex_bin: Option<PathBuf>) -> Self {
        Self {
            remote: Box::new(LiveRemoteResolver::new()),
            tracker: Box::new(LiveTrackerClient::new(gh_bin)),
            codex: Box::new(LiveCodexProbe::new(codex_bin)),
        }
    }
}
