//! Issue tracker port for querying GitHub issue and pull-request data.

use std::path::Path;

use serde_json::Value;

use super::PortFuture;
use crate::issues::{Issue, IssueState};

/// Executes structured queries against the project's issue tracker.
///
/// Abstracting the tracker allows the aggregator to be exercised in tests
/// without a network or the `gh` CLI installed.
pub trait TrackerQueries: Send + Sync {
    /// Lists up to `limit` issues in the given state, with the full field
    /// projection (number, title, state, author, createdAt, labels, url,
    /// body, assignees).
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the query cannot be
    /// executed or its response cannot be parsed.
    fn issue_list(&self, project: &Path, state: IssueState, limit: u32) -> PortFuture<'_, Vec<Issue>>;

    /// Executes an arbitrary composite GraphQL query and returns the raw
    /// JSON response. Used for batched timeline/cross-reference lookups.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the query cannot be
    /// executed or the response is not JSON.
    fn graphql(&self, project: &Path, query: &str) -> PortFuture<'_, Value>;
}
