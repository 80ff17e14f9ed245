//! Live `CodexProbe` that locates the Codex CLI and its credentials.

use std::env;
use std::path::PathBuf;

use crate::ports::codex::{CodexInstall, CodexProbe};
use crate::ports::PortFuture;

use super::exec;

/// Probes the host for the Codex CLI.
///
/// Resolution goes beyond a bare `PATH` lookup because a server process
/// often lacks the npm global bin directories in its `PATH`.
pub struct LiveCodexProbe {
    codex_bin: Option<PathBuf>,
}

impl LiveCodexProbe {
    /// Creates a probe. When `codex_bin` is `Some`, that path is used
    /// verbatim instead of searching.
    #[must_use]
    pub fn new(codex_bin: Option<PathBuf>) -> Self {
        Self { codex_bin }
    }

    fn resolve_binary(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.codex_bin {
            return Some(explicit.clone());
        }
        candidate_dirs()
            .into_iter()
            .map(|dir| dir.join("codex"))
            .find(|candidate| candidate.is_file())
    }
}

impl CodexProbe for LiveCodexProbe {
    fn detect(&self) -> PortFuture<'_, CodexInstall> {
        Box::pin(async move {
            let has_api_key =
                env::var("OPENAI_API_KEY").map(|key| !key.trim().is_empty()).unwrap_or(false);
            let cli_credentials = codex_home().join("auth.json").is_file();

            let Some(path) = self.resolve_binary() else {
                return Ok(CodexInstall {
                    installed: false,
                    version: None,
                    path: None,
                    authenticated: has_api_key || cli_credentials,
                    has_api_key,
                });
            };

            let version = match exec::run(&path.to_string_lossy(), &["--version"], None).await {
                Ok(output) if output.success() => parse_version(&output.stdout),
                _ => None,
            };

            Ok(CodexInstall {
                installed: true,
                version,
                path: Some(path.to_string_lossy().into_owned()),
                authenticated: has_api_key || cli_credentials,
                has_api_key,
            })
        })
    }
}

/// Directories searched for the `codex` binary: `PATH` first, then
/// well-known npm/volta global bin locations.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|path| env::split_paths(&path).collect())
        .unwrap_or_default();

    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join(".npm-global/bin"));
        dirs.push(home.join(".volta/bin"));
        dirs.push(home.join(".local/bin"));
    }
    dirs.push(PathBuf::from("/usr/local/bin"));
    dirs.push(PathBuf::from("/opt/homebrew/bin"));
    dirs
}

/// The Codex home directory: `$CODEX_HOME`, defaulting to `~/.codex`.
fn codex_home() -> PathBuf {
    env::var_os("CODEX_HOME").map_or_else(
        || dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".codex"),
        PathBuf::from,
    )
}

/// Extracts a version number from `codex --version` output
/// (e.g. `codex-cli 0.45.0` or `0.45.0`).
fn parse_version(stdout: &str) -> Option<String> {
    let token = stdout.split_whitespace().last()?;
    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Some(token.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_version_output() {
        assert_eq!(parse_version("codex-cli 0.45.0\n"), Some("0.45.0".to_string()));
    }

    #[test]
    fn parses_bare_version_output() {
        assert_eq!(parse_version("0.45.0"), Some("0.45.0".to_string()));
    }

    #[test]
    fn rejects_non_version_output() {
        assert_eq!(parse_version("command not found"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn candidate_dirs_include_npm_global_fallbacks() {
        let dirs = candidate_dirs();
        assert!(dirs.iter().any(|dir| dir.ends_with("bin")));
        assert!(dirs.contains(&PathBuf::from("/usr/local/bin")));
    }

    #[tokio::test]
    async fn explicit_missing_binary_reports_installed_without_version() {
        // An explicit path is trusted for resolution but --version fails.
        let probe = LiveCodexProbe::new(Some(PathBuf::from("/nonexistent/codex-9c1f")));
        let install = probe.detect().await.unwrap();
        assert!(install.installed);
        assert!(install.version.is_none());
    }
}
