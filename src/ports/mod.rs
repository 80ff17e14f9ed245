//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external collaborator (the project's git remote, the GitHub issue
//! tracker, the Codex CLI). Implementations live in `src/adapters/`.

pub mod codex;
pub mod remote;
pub mod tracker;

use std::future::Future;
use std::pin::Pin;

pub use codex::{CodexInstall, CodexProbe};
pub use remote::{RemoteResolver, RemoteStatus, RepoIdentity};
pub use tracker::TrackerQueries;

/// Boxed error type shared by all port methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future type alias used by port traits to keep them dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
