//! Remote-resolver port for detecting a project's GitHub remote.

use std::path::Path;

use super::PortFuture;

/// Owner/repository coordinates of a GitHub remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    /// The repository owner (user or organization login).
    pub owner: String,
    /// The repository name.
    pub repo: String,
}

/// Result of probing a project directory for a GitHub remote.
#[derive(Debug, Clone)]
pub struct RemoteStatus {
    /// Whether the project has a GitHub-hosted remote at all.
    pub has_remote: bool,
    /// Parsed owner/repo coordinates, when the remote URL was recognizable.
    ///
    /// A project can have a GitHub remote whose URL does not parse into
    /// coordinates; issue listing still works then, but enrichment is
    /// skipped.
    pub identity: Option<RepoIdentity>,
}

/// Resolves whether a project is backed by a GitHub remote.
pub trait RemoteResolver: Send + Sync {
    /// Probes the project at `project` for a GitHub remote.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the probe itself could
    /// not run. A project that simply has no remote is not an error; it
    /// yields a status with `has_remote == false`.
    fn remote_status(&self, project: &Path) -> PortFuture<'_, RemoteStatus>;
}
