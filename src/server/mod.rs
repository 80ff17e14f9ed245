//! HTTP surface: router, request handlers, and the serve loop.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::codex::{self, usage, AuthMethod};
use crate::context::ServiceContext;
use crate::issues::{self, Issue, ListIssuesError};

/// Builds the application router over a shared service context.
#[must_use]
pub fn router(ctx: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/list-issues", post(list_issues))
        .route("/codex-status", get(codex_status))
        .route("/codex-usage", get(codex_usage))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Binds `bind` and serves the router until the process exits.
///
/// # Errors
///
/// Returns an error string when the address cannot be bound or the
/// server loop fails.
pub async fn serve(bind: &str, ctx: Arc<ServiceContext>) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| format!("failed to bind {bind}: {err}"))?;
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(ctx)).await.map_err(|err| format!("server error: {err}"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListIssuesRequest {
    #[serde(default)]
    project_path: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListIssuesBody {
    success: bool,
    open_issues: Vec<Issue>,
    closed_issues: Vec<Issue>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CodexStatusBody {
    success: bool,
    installed: bool,
    version: Option<String>,
    path: Option<String>,
    auth: CodexAuthBody,
    install_command: &'static str,
    login_command: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CodexAuthBody {
    authenticated: bool,
    method: AuthMethod,
    has_api_key: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { success: false, error: message.into() })).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_issues(
    State(ctx): State<Arc<ServiceContext>>,
    body: Option<Json<ListIssuesRequest>>,
) -> Response {
    // A missing or non-JSON body is the same as a missing projectPath.
    let project_path =
        body.and_then(|Json(request)| request.project_path).unwrap_or_default();
    match issues::list_issues(&ctx, &project_path).await {
        Ok(list) => Json(ListIssuesBody {
            success: true,
            open_issues: list.open_issues,
            closed_issues: list.closed_issues,
        })
        .into_response(),
        Err(err) => {
            let status = match err {
                ListIssuesError::MissingProjectPath | ListIssuesError::MissingRemote => {
                    StatusCode::BAD_REQUEST
                }
                ListIssuesError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, err.to_string())
        }
    }
}

async fn codex_status(State(ctx): State<Arc<ServiceContext>>) -> Response {
    match ctx.codex.detect().await {
        Ok(install) => {
            let method = AuthMethod::derive(&install);
            Json(CodexStatusBody {
            success: true,
            installed: install.installed,
            version: install.version,
            path: install.path,
            auth: CodexAuthBody {
                authenticated: install.authenticated,
                method,
                has_api_key: install.has_api_key,
            },
            install_command: codex::INSTALL_COMMAND,
            login_command: codex::LOGIN_COMMAND,
            })
            .into_response()
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

async fn codex_usage(State(ctx): State<Arc<ServiceContext>>) -> Response {
    match usage::fetch_usage(ctx.codex.as_ref()).await {
        Ok(never) => match never {},
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
