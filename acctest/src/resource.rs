//! Lifecycle resource traits
//!
//! One implementation per resource type under test. Implementations are
//! constructed with whatever backend client they need; the harness only
//! talks to them through these traits.

use crate::context::TestContext;
use crate::error::Result;
use crate::state::InstanceState;
use async_trait::async_trait;

/// Contract every resource under test implements
#[async_trait]
pub trait LifecycleResource: Send + Sync {
    /// Type name as it appears in configuration (e.g. "azurerm_route_table")
    /// MUST match the addresses the rendered configuration declares
    fn type_name(&self) -> &str;

    /// Render the baseline configuration for this resource.
    /// Pure: identical contexts yield byte-identical text. Malformed
    /// templates surface at apply time, never here.
    fn render(&self, data: &TestContext) -> String;

    /// Single-shot probe against the live backend.
    /// Ok(true) = instance present, Ok(false) = backend reported not-found,
    /// Err = unparseable identifier or any other backend failure.
    /// No retry, no polling - convergence is the apply engine's job.
    async fn exists(&self, state: &InstanceState) -> Result<bool>;
}

/// Optional capability: resources that can be removed out-of-band,
/// used by disappears tests to provoke drift
#[async_trait]
pub trait ResourceWithDestroy: LifecycleResource {
    /// Delete the instance directly via the backend SDK and block until
    /// the backend's long-running operation reports completion
    async fn destroy(&self, state: &InstanceState) -> Result<()>;
}
