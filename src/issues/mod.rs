//! GitHub issue data model, error taxonomy, aggregation, and enrichment.

pub mod aggregator;
pub mod enricher;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregator::{list_issues, IssueList};

/// The lifecycle state of an issue.
///
/// The tracker reports states upper-case (`OPEN`/`CLOSED`); the wire
/// contract uses lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// The issue is open.
    #[serde(alias = "OPEN")]
    Open,
    /// The issue is closed.
    #[serde(alias = "CLOSED")]
    Closed,
}

impl IssueState {
    /// The state filter value the `gh` CLI expects.
    #[must_use]
    pub fn as_cli_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A user reference (author or assignee).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// The user's login.
    pub login: String,
    /// The user's avatar URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// An issue label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// The label name.
    pub name: String,
    /// The label color as a hex string.
    pub color: String,
}

/// A pull request referenced by or connected to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedPullRequest {
    /// The pull request number.
    pub number: u64,
    /// The pull request title.
    pub title: String,
    /// The pull request state, normalized to lower-case
    /// (`open`, `closed`, `merged`).
    pub state: String,
    /// The pull request URL.
    pub url: String,
}

/// One tracked unit of work from the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// The issue number, unique within a repository.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// Open or closed.
    pub state: IssueState,
    /// The issue author.
    pub author: UserRef,
    /// Creation timestamp as reported by the tracker.
    pub created_at: String,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// The issue URL.
    pub url: String,
    /// The issue body text.
    #[serde(default)]
    pub body: String,
    /// Users assigned to the issue.
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    /// Pull requests linked to this issue. Populated only for open issues,
    /// and absent (not empty) when none were found or lookup failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_pull_requests: Option<Vec<LinkedPullRequest>>,
}

/// Failure modes of the issue aggregation call.
#[derive(Debug, Error)]
pub enum ListIssuesError {
    /// The required `projectPath` input was missing or empty.
    #[error("projectPath is required")]
    MissingProjectPath,
    /// The project has no GitHub remote configured.
    #[error("Project does not have a GitHub remote")]
    MissingRemote,
    /// The primary open/closed issue fetch (or the remote probe) failed.
    #[error("{0}")]
    Fetch(String),
}

/// A failed linked-pull-request batch.
///
/// Never surfaced to callers of the aggregator; logged and skipped.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EnrichmentError(pub String);
