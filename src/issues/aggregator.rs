//! Issue aggregation: concurrent open/closed fetch plus enrichment.

use std::path::Path;

use serde::Serialize;

use super::{enricher, Issue, IssueState, ListIssuesError};
use crate::context::ServiceContext;

/// Maximum open issues fetched per call.
const OPEN_ISSUE_LIMIT: u32 = 100;

/// Maximum closed issues fetched per call.
const CLOSED_ISSUE_LIMIT: u32 = 50;

/// The aggregated issue listing for a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList {
    /// Open issues, enriched with linked pull requests where found.
    pub open_issues: Vec<Issue>,
    /// Closed issues. Never enriched.
    pub closed_issues: Vec<Issue>,
}

/// Lists a project's open and closed issues, attaching linked pull
/// requests to open issues.
///
/// Validates the path, checks the GitHub-remote precondition, fetches
/// open and closed issues concurrently (both must succeed), then
/// enriches open issues best-effort. Enrichment failures never fail the
/// call; affected issues simply carry no `linkedPullRequests` field.
///
/// # Errors
///
/// - [`ListIssuesError::MissingProjectPath`] when `project_path` is empty.
/// - [`ListIssuesError::MissingRemote`] when the project has no GitHub
///   remote; detected before any issue fetch.
/// - [`ListIssuesError::Fetch`] when the remote probe or either issue
///   fetch fails. No partial listing is returned.
pub async fn list_issues(
    ctx: &ServiceContext,
    project_path: &str,
) -> Result<IssueList, ListIssuesError> {
    if project_path.trim().is_empty() {
        return Err(ListIssuesError::MissingProjectPath);
    }
    let project = Path::new(project_path);

    let remote = ctx
        .remote
        .remote_status(project)
        .await
        .map_err(|err| ListIssuesError::Fetch(err.to_string()))?;
    if !remote.has_remote {
        return Err(ListIssuesError::MissingRemote);
    }

    let (mut open_issues, closed_issues) = tokio::try_join!(
        ctx.tracker.issue_list(project, IssueState::Open, OPEN_ISSUE_LIMIT),
        ctx.tracker.issue_list(project, IssueState::Closed, CLOSED_ISSUE_LIMIT),
    )
    .map_err(|err| ListIssuesError::Fetch(err.to_string()))?;

    if let Some(identity) = &remote.identity {
        if !open_issues.is_empty() {
            let numbers: Vec<u64> = open_issues.iter().map(|issue| issue.number).collect();
            let mut linked =
                enricher::fetch_linked_changes(ctx.tracker.as_ref(), project, identity, &numbers)
                    .await;
            for issue in &mut open_issues {
                if let Some(pull_requests) = linked.remove(&issue.number) {
                    issue.linked_pull_requests = Some(pull_requests);
                }
            }
        }
    }

    Ok(IssueList { open_issues, closed_issues })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::issues::UserRef;
    use crate::ports::{
        CodexInstall, CodexProbe, PortFuture, RemoteResolver, RemoteStatus, RepoIdentity,
        TrackerQueries,
    };

    fn issue(number: u64, state: IssueState) -> Issue {
        Issue {
            number,
            title: format!("Issue {number}"),
            state,
            author: UserRef { login: "octocat".into(), avatar_url: None },
            created_at: "2024-05-01T12:00:00Z".into(),
            labels: vec![],
            url: format!("https://github.com/acme/widgets/issues/{number}"),
            body: String::new(),
            assignees: vec![],
            linked_pull_requests: None,
        }
    }

    struct StubRemote {
        status: RemoteStatus,
    }

    impl RemoteResolver for StubRemote {
        fn remote_status(&self, _project: &std::path::Path) -> PortFuture<'_, RemoteStatus> {
            let status = self.status.clone();
            Box::pin(async move { Ok(status) })
        }
    }

    struct StubTracker {
        open: Vec<Issue>,
        closed: Vec<Issue>,
        graphql_response: Option<Value>,
    }

    impl StubTracker {
        fn new(open: Vec<Issue>, closed: Vec<Issue>, graphql_response: Option<Value>) -> Self {
            Self { open, closed, graphql_response }
        }
    }

    impl TrackerQueries for StubTracker {
        fn issue_list(
            &self,
            _project: &std::path::Path,
            state: IssueState,
            _limit: u32,
        ) -> PortFuture<'_, Vec<Issue>> {
            let issues = match state {
                IssueState::Open => self.open.clone(),
                IssueState::Closed => self.closed.clone(),
            };
            Box::pin(async move { Ok(issues) })
        }

        fn graphql(&self, _project: &std::path::Path, _query: &str) -> PortFuture<'_, Value> {
            let response = self
                .graphql_response
                .clone()
                .expect("graphql should not be called without a stubbed response");
            Box::pin(async move { Ok(response) })
        }
    }

    /// Port stubs that panic on any call; prove no external interaction.
    struct UnreachableRemote;

    impl RemoteResolver for UnreachableRemote {
        fn remote_status(&self, _project: &std::path::Path) -> PortFuture<'_, RemoteStatus> {
            panic!("remote_status should not be called");
        }
    }

    struct UnreachableTracker;

    impl TrackerQueries for UnreachableTracker {
        fn issue_list(
            &self,
            _project: &std::path::Path,
            _state: IssueState,
            _limit: u32,
        ) -> PortFuture<'_, Vec<Issue>> {
            panic!("issue_list should not be called");
        }

        fn graphql(&self, _project: &std::path::Path, _query: &str) -> PortFuture<'_, Value> {
            panic!("graphql should not be called");
        }
    }

    struct UnreachableCodex;

    impl CodexProbe for UnreachableCodex {
        fn detect(&self) -> PortFuture<'_, CodexInstall> {
            panic!("detect should not be called");
        }
    }

    fn ctx_with(remote: impl RemoteResolver + 'static, tracker: impl TrackerQueries + 'static) -> ServiceContext {
        ServiceContext {
            remote: Box::new(remote),
            tracker: Box::new(tracker),
            codex: Box::new(UnreachableCodex),
        }
    }

    fn resolved_status() -> RemoteStatus {
        RemoteStatus {
            has_remote: true,
            identity: Some(RepoIdentity { owner: "acme".into(), repo: "widgets".into() }),
        }
    }

    #[tokio::test]
    async fn empty_project_path_fails_before_any_call() {
        let ctx = ctx_with(UnreachableRemote, UnreachableTracker);
        let err = list_issues(&ctx, "").await.unwrap_err();
        assert!(matches!(err, ListIssuesError::MissingProjectPath));
        let err = list_issues(&ctx, "   ").await.unwrap_err();
        assert!(matches!(err, ListIssuesError::MissingProjectPath));
    }

    #[tokio::test]
    async fn missing_remote_fails_before_any_fetch() {
        let ctx = ctx_with(
            StubRemote { status: RemoteStatus { has_remote: false, identity: None } },
            UnreachableTracker,
        );
        let err = list_issues(&ctx, "/tmp/project").await.unwrap_err();
        assert!(matches!(err, ListIssuesError::MissingRemote));
    }

    #[tokio::test]
    async fn fetch_failure_aborts_whole_call() {
        struct FailingTracker;
        impl TrackerQueries for FailingTracker {
            fn issue_list(
                &self,
                _project: &std::path::Path,
                state: IssueState,
                _limit: u32,
            ) -> PortFuture<'_, Vec<Issue>> {
                Box::pin(async move {
                    match state {
                        IssueState::Open => Ok(vec![]),
                        IssueState::Closed => Err("gh exited with status 1".into()),
                    }
                })
            }
            fn graphql(&self, _project: &std::path::Path, _query: &str) -> PortFuture<'_, Value> {
                panic!("graphql should not be called");
            }
        }

        let ctx = ctx_with(StubRemote { status: resolved_status() }, FailingTracker);
        let err = list_issues(&ctx, "/tmp/project").await.unwrap_err();
        assert!(matches!(err, ListIssuesError::Fetch(_)));
        assert!(err.to_string().contains("gh exited"));
    }

    #[tokio::test]
    async fn enrichment_attaches_linked_pull_requests() {
        // Issue 1 cross-references PR 101 twice, issue 2 references
        // nothing, issue 4 is closed and never enriched.
        let pr = json!({
            "source": {
                "number": 101,
                "title": "Fix it",
                "state": "OPEN",
                "url": "https://github.com/acme/widgets/pull/101"
            }
        });
        let response = json!({
            "data": {
                "repository": {
                    "i1": { "number": 1, "timelineItems": { "nodes": [pr.clone(), pr] } },
                    "i2": { "number": 2, "timelineItems": { "nodes": [] } },
                    "i3": { "number": 3, "timelineItems": { "nodes": [] } }
                }
            }
        });
        let tracker = StubTracker::new(
            vec![
                issue(1, IssueState::Open),
                issue(2, IssueState::Open),
                issue(3, IssueState::Open),
            ],
            vec![issue(4, IssueState::Closed)],
            Some(response),
        );
        let ctx = ctx_with(StubRemote { status: resolved_status() }, tracker);

        let list = list_issues(&ctx, "/tmp/project").await.unwrap();

        assert_eq!(list.open_issues.len(), 3);
        assert_eq!(list.closed_issues.len(), 1);
        let linked = list.open_issues[0].linked_pull_requests.as_ref().unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].number, 101);
        assert_eq!(linked[0].state, "open");
        assert!(list.open_issues[1].linked_pull_requests.is_none());
        assert!(list.open_issues[2].linked_pull_requests.is_none());
        assert!(list.closed_issues[0].linked_pull_requests.is_none());
    }

    #[tokio::test]
    async fn no_open_issues_skips_enrichment() {
        let tracker = StubTracker::new(vec![], vec![issue(4, IssueState::Closed)], None);
        let ctx = ctx_with(StubRemote { status: resolved_status() }, tracker);

        let list = list_issues(&ctx, "/tmp/project").await.unwrap();

        assert!(list.open_issues.is_empty());
        assert_eq!(list.closed_issues.len(), 1);
    }

    #[tokio::test]
    async fn unresolved_identity_skips_enrichment_but_lists_issues() {
        let tracker = StubTracker::new(vec![issue(1, IssueState::Open)], vec![], None);
        let ctx = ctx_with(
            StubRemote { status: RemoteStatus { has_remote: true, identity: None } },
            tracker,
        );

        let list = list_issues(&ctx, "/tmp/project").await.unwrap();

        assert_eq!(list.open_issues.len(), 1);
        assert!(list.open_issues[0].linked_pull_requests.is_none());
    }
}
