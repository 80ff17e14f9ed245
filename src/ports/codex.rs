//! Codex CLI probe port for installation and authentication status.

use super::PortFuture;

/// Installation and authentication state of the Codex CLI.
#[derive(Debug, Clone, Default)]
pub struct CodexInstall {
    /// Whether the `codex` binary was found.
    pub installed: bool,
    /// The CLI version, when it could be read.
    pub version: Option<String>,
    /// Absolute path to the resolved binary.
    pub path: Option<String>,
    /// Whether any usable credential was detected.
    pub authenticated: bool,
    /// Whether an API-key-style credential (`OPENAI_API_KEY`) is present.
    pub has_api_key: bool,
}

/// Detects the Codex CLI on the host system.
pub trait CodexProbe: Send + Sync {
    /// Probes for the Codex CLI and its credentials.
    ///
    /// # Errors
    ///
    /// The returned future resolves to an error if the probe itself fails.
    /// An absent binary is not an error; it yields a status with
    /// `installed == false`.
    fn detect(&self) -> PortFuture<'_, CodexInstall>;
}
