//! Codex CLI status shaping.

pub mod usage;

use serde::Serialize;

use crate::ports::CodexInstall;

/// Command shown to users for installing the Codex CLI.
pub const INSTALL_COMMAND: &str = "npm install -g @openai/codex";

/// Command shown to users for authenticating the Codex CLI.
pub const LOGIN_COMMAND: &str = "codex login";

/// How the Codex CLI is authenticated, derived from the probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// No usable credential found.
    None,
    /// Authenticated via the `OPENAI_API_KEY` environment variable.
    ApiKeyEnv,
    /// Authenticated via `codex login` credentials on disk.
    CliAuthenticated,
}

impl AuthMethod {
    /// Derives the auth method: an API key takes precedence over stored
    /// CLI credentials.
    #[must_use]
    pub fn derive(install: &CodexInstall) -> Self {
        if !install.authenticated {
            Self::None
        } else if install.has_api_key {
            Self::ApiKeyEnv
        } else {
            Self::CliAuthenticated
        }
    }
}
