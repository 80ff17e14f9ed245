//! Linked pull-request enrichment via batched GraphQL timeline queries.
//!
//! Enrichment is best-effort: a failed batch is logged and skipped, never
//! surfaced to the caller. Issues with zero linked pull requests do not
//! appear in the output mapping at all.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{EnrichmentError, LinkedPullRequest};
use crate::ports::{RepoIdentity, TrackerQueries};

/// Issues per composite query, chosen to stay under GraphQL complexity
/// limits.
const BATCH_SIZE: usize = 20;

/// Timeline items inspected per issue.
const TIMELINE_ITEM_LIMIT: usize = 10;

/// Fetches linked pull requests for the given issue numbers.
///
/// Numbers are partitioned into batches of [`BATCH_SIZE`] and queried
/// strictly sequentially, one composite query per batch. A batch that
/// fails for any reason contributes nothing; later batches still run.
/// Returns a mapping that contains only issues with at least one linked
/// pull request. An empty `issue_numbers` returns immediately without
/// querying.
pub async fn fetch_linked_changes(
    tracker: &dyn TrackerQueries,
    project: &Path,
    identity: &RepoIdentity,
    issue_numbers: &[u64],
) -> HashMap<u64, Vec<LinkedPullRequest>> {
    let mut linked = HashMap::new();
    if issue_numbers.is_empty() {
        return linked;
    }

    for batch in issue_numbers.chunks(BATCH_SIZE) {
        match fetch_batch(tracker, project, identity, batch).await {
            Ok(entries) => linked.extend(entries),
            Err(err) => {
                warn!(error = %err, issues = ?batch, "skipping linked pull request batch");
            }
        }
    }

    linked
}

/// Runs one composite query and parses its response.
async fn fetch_batch(
    tracker: &dyn TrackerQueries,
    project: &Path,
    identity: &RepoIdentity,
    batch: &[u64],
) -> Result<Vec<(u64, Vec<LinkedPullRequest>)>, EnrichmentError> {
    let query = build_batch_query(identity, batch);
    let response = tracker
        .graphql(project, &query)
        .await
        .map_err(|err| EnrichmentError(err.to_string()))?;
    parse_batch_response(response, batch)
}

/// Builds one composite GraphQL query covering every issue in `batch`.
///
/// Each issue is aliased by its own number (`i42`), so the response is
/// keyed explicitly rather than by position.
fn build_batch_query(identity: &RepoIdentity, batch: &[u64]) -> String {
    let mut issue_fields = String::new();
    for number in batch {
        let _ = write!(
            issue_fields,
            "i{number}: issue(number: {number}) {{ number \
             timelineItems(first: {TIMELINE_ITEM_LIMIT}, itemTypes: [CROSS_REFERENCED_EVENT, CONNECTED_EVENT]) {{ \
             nodes {{ \
             ... on CrossReferencedEvent {{ source {{ ... on PullRequest {{ number title state url }} }} }} \
             ... on ConnectedEvent {{ subject {{ ... on PullRequest {{ number title state url }} }} }} \
             }} }} }} "
        );
    }
    format!(
        "query {{ repository(owner: \"{}\", name: \"{}\") {{ {issue_fields}}} }}",
        identity.owner, identity.repo
    )
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<EnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    repository: Option<HashMap<String, Option<IssueNode>>>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    #[serde(rename = "timelineItems", default)]
    timeline_items: Option<TimelineItems>,
}

#[derive(Debug, Default, Deserialize)]
struct TimelineItems {
    #[serde(default)]
    nodes: Vec<Option<TimelineNode>>,
}

/// One timeline node. Exactly one of the two shapes is populated per node;
/// the reference sits under `source` for cross-references and `subject`
/// for explicit connections.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimelineNode {
    CrossReferenced(CrossReferencedEvent),
    Connected(ConnectedEvent),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CrossReferencedEvent {
    #[serde(default)]
    source: Option<ChangeRef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectedEvent {
    #[serde(default)]
    subject: Option<ChangeRef>,
}

/// A possibly-empty pull-request reference. A cross-reference from a
/// non-PR source deserializes with no `number` and is skipped.
#[derive(Debug, Deserialize)]
struct ChangeRef {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl TimelineNode {
    fn change_ref(&self) -> Option<&ChangeRef> {
        match self {
            Self::CrossReferenced(event) => event.source.as_ref(),
            Self::Connected(event) => event.subject.as_ref(),
        }
    }
}

/// Extracts per-issue linked pull requests from a composite response.
///
/// Deduplicates by pull-request number, first occurrence winning, and
/// emits an entry only for issues with at least one linked pull request.
fn parse_batch_response(
    response: Value,
    batch: &[u64],
) -> Result<Vec<(u64, Vec<LinkedPullRequest>)>, EnrichmentError> {
    let envelope: GraphqlEnvelope = serde_json::from_value(response)
        .map_err(|err| EnrichmentError(format!("malformed GraphQL response: {err}")))?;

    let Some(repository) = envelope.data.and_then(|data| data.repository) else {
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for &issue_number in batch {
        let alias = format!("i{issue_number}");
        let Some(node) = repository.get(&alias).and_then(Option::as_ref) else {
            continue;
        };
        let items = node.timeline_items.as_ref().map(|items| items.nodes.as_slice()).unwrap_or_default();

        let mut linked: Vec<LinkedPullRequest> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();
        for timeline_node in items.iter().flatten() {
            let Some(reference) = timeline_node.change_ref() else {
                continue;
            };
            let Some(number) = reference.number else {
                continue;
            };
            if !seen.insert(number) {
                continue;
            }
            linked.push(LinkedPullRequest {
                number,
                title: reference.title.clone().unwrap_or_default(),
                state: reference.state.as_deref().unwrap_or_default().to_lowercase(),
                url: reference.url.clone().unwrap_or_default(),
            });
        }

        if !linked.is_empty() {
            entries.push((issue_number, linked));
        }
    }

    Ok(entries)
}
