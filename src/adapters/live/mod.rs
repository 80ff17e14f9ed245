//! Live adapters that shell out to `git`, `gh`, and `codex`.

pub mod codex;
pub mod exec;
pub mod remote;
pub mod tracker;

pub use codex::LiveCodexProbe;
pub use remote::LiveRemoteResolver;
pub use tracker::LiveTrackerClient;
