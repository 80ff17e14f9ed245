//! Codex usage probing.
//!
//! The Codex CLI exposes no usage command, so this service can only
//! explain that limitation. Authentication is checked first so the user
//! gets the actionable message when that is the real problem.

use std::convert::Infallible;

use thiserror::Error;

use crate::ports::CodexProbe;

/// Why usage data could not be produced.
#[derive(Debug, Error)]
pub enum UsageError {
    /// No Codex credential was found.
    #[error("Codex is not authenticated. Please run 'codex login' to authenticate.")]
    NotAuthenticated,
    /// The CLI has no usage command; nothing can be queried.
    #[error(
        "Codex usage statistics are not available. The Codex CLI does not provide a \
         built-in usage command; usage limits are enforced by OpenAI but cannot be \
         queried via the CLI. Check https://platform.openai.com/usage for details."
    )]
    Unsupported,
    /// The installation probe itself failed.
    #[error("{0}")]
    Probe(String),
}

/// Attempts to fetch Codex usage data. Always fails; see [`UsageError`].
///
/// # Errors
///
/// [`UsageError::NotAuthenticated`] when no credential is present,
/// [`UsageError::Probe`] when the probe fails, and
/// [`UsageError::Unsupported`] otherwise.
pub async fn fetch_usage(probe: &dyn CodexProbe) -> Result<Infallible, UsageError> {
    let install = probe.detect().await.map_err(|err| UsageError::Probe(err.to_string()))?;
    if !install.authenticated {
        return Err(UsageError::NotAuthenticated);
    }
    Err(UsageError::Unsupported)
}
