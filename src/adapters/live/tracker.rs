//! Live `TrackerQueries` backed by the `gh` CLI.

use std::path::Path;

use serde_json::Value;

use crate::issues::{Issue, IssueState};
use crate::ports::tracker::TrackerQueries;
use crate::ports::{PortError, PortFuture};

use super::exec;

/// Field projection requested from `gh issue list`.
const ISSUE_FIELDS: &str = "number,title,state,author,createdAt,labels,url,body,assignees";

/// Tracker client that shells out to the GitHub CLI in the project
/// directory, so `gh`'s own auth and host resolution apply.
pub struct LiveTrackerClient {
    gh_bin: String,
}

impl LiveTrackerClient {
    /// Creates a client invoking the given `gh` binary.
    #[must_use]
    pub fn new(gh_bin: impl Into<String>) -> Self {
        Self { gh_bin: gh_bin.into() }
    }
}

impl TrackerQueries for LiveTrackerClient {
    fn issue_list(
        &self,
        project: &Path,
        state: IssueState,
        limit: u32,
    ) -> PortFuture<'_, Vec<Issue>> {
        let project = project.to_path_buf();
        Box::pin(async move {
            let limit = limit.to_string();
            let args = [
                "issue",
                "list",
                "--state",
                state.as_cli_str(),
                "--json",
                ISSUE_FIELDS,
                "--limit",
                &limit,
            ];
            let stdout = exec::run_checked(&self.gh_bin, &args, Some(&project)).await?;
            parse_issue_payload(&stdout)
        })
    }

    fn graphql(&self, project: &Path, query: &str) -> PortFuture<'_, Value> {
        let project = project.to_path_buf();
        let query_arg = format!("query={query}");
        Box::pin(async move {
            let args = ["api", "graphql", "-f", &query_arg];
            let stdout = exec::run_checked(&self.gh_bin, &args, Some(&project)).await?;
            if stdout.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&stdout)
                .map_err(|err| -> PortError { format!("invalid GraphQL response: {err}").into() })
        })
    }
}

/// Parses a `gh issue list` JSON payload.
///
/// An empty or all-whitespace body is treated as zero issues, not an
/// error; `gh` emits nothing for some empty repositories.
fn parse_issue_payload(payload: &str) -> Result<Vec<Issue>, PortError> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(payload)
        .map_err(|err| -> PortError { format!("invalid issue list payload: {err}").into() })
}
