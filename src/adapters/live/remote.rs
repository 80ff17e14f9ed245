//! Live `RemoteResolver` backed by `git remote get-url`.

use std::path::Path;

use crate::ports::remote::{RemoteResolver, RemoteStatus, RepoIdentity};
use crate::ports::PortFuture;

use super::exec;

/// Resolves a project's GitHub remote by asking `git` for the `origin`
/// remote URL and parsing owner/repo coordinates out of it.
pub struct LiveRemoteResolver {
    git_bin: String,
}

impl LiveRemoteResolver {
    /// Creates a resolver that invokes `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self { git_bin: "git".to_string() }
    }
}

impl Default for LiveRemoteResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteResolver for LiveRemoteResolver {
    fn remote_status(&self, project: &Path) -> PortFuture<'_, RemoteStatus> {
        let project = project.to_path_buf();
        Box::pin(async move {
            let output =
                exec::run(&self.git_bin, &["remote", "get-url", "origin"], Some(&project)).await?;
            // No remote (or not a git repo) is a negative answer, not a
            // failure of the probe.
            if !output.success() {
                return Ok(RemoteStatus { has_remote: false, identity: None });
            }
            let url = output.stdout.trim();
            if !url.contains("github.com") {
                return Ok(RemoteStatus { has_remote: false, identity: None });
            }
            Ok(RemoteStatus { has_remote: true, identity: parse_github_remote(url) })
        })
    }
}

/// Parses owner/repo coordinates out of a GitHub remote URL.
///
/// Accepts the HTTPS (`https://github.com/owner/repo.git`), SSH
/// (`git@github.com:owner/repo.git`), and `ssh://` forms. Returns `None`
/// for anything it cannot recognize, including names with characters
/// outside `[A-Za-z0-9._-]`.
fn parse_github_remote(url: &str) -> Option<RepoIdentity> {
    let rest = url
        .split_once("github.com")
        .map(|(_, rest)| rest.trim_start_matches([':', '/']))?;

    let mut segments = rest.split('/');
    let owner = segments.next()?.trim();
    let repo = segments.next()?.trim().trim_end_matches(".git");
    if segments.next().is_some() {
        return None;
    }

    let valid = |s: &str| {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "-._".contains(c))
    };
    if !valid(owner) || !valid(repo) {
        return None;
    }

    Some(RepoIdentity { owner: owner.to_string(), repo: repo.to_string() })
}
