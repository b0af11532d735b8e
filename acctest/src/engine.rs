//! Apply engine seam
//!
//! The harness never applies configuration itself; it hands configuration
//! text to an external engine and reads back state snapshots. Convergence,
//! diffing, polling and backoff all live behind this trait.

use crate::state::StateSnapshot;
use async_trait::async_trait;

/// Outcome of planning a configuration against current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// No changes pending - applying again would be a no-op
    Empty,
    /// The engine would create, update or delete something
    Changes,
}

/// Error surfaced by the external apply engine.
/// Carries the engine's message verbatim so expected-error matchers
/// can run against it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// External declarative apply engine
#[async_trait]
pub trait ApplyEngine: Send + Sync {
    /// Apply the configuration and block until converged
    async fn apply(&self, config: &str) -> std::result::Result<StateSnapshot, EngineError>;

    /// Plan the configuration against current state without applying
    async fn plan(&self, config: &str) -> std::result::Result<Plan, EngineError>;

    /// Import the instance with the given backend identifier at the given
    /// address, returning the state the import produced
    async fn import(
        &self,
        config: &str,
        address: &str,
        id: &str,
    ) -> std::result::Result<StateSnapshot, EngineError>;

    /// Destroy everything the engine currently manages
    async fn destroy(&self) -> std::result::Result<(), EngineError>;
}
