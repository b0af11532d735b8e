//! acctest - Resource lifecycle acceptance-test harness
//!
//! A framework for acceptance-testing infrastructure provider resources:
//! render a configuration, hand it to an external apply engine, probe the
//! live backend for the provisioned instances, and walk the resource
//! through create/update/import/destroy transitions step by step.

// Core modules
pub mod context;
pub mod error;
pub mod state;

// Harness contract modules
pub mod checks;
pub mod engine;
pub mod resource;
pub mod step;

// Runner modules
pub mod case;
pub mod mock;

// Re-exports for convenience
pub use case::TestCase;
pub use checks::{attr, attr_set, no_attr, StateCheck};
pub use context::{Locations, TestContext};
pub use engine::{ApplyEngine, EngineError, Plan};
pub use error::{AcctestError, Result};
pub use mock::MockApplyEngine;
pub use resource::{LifecycleResource, ResourceWithDestroy};
pub use state::{InstanceState, StateSnapshot};
pub use step::{requires_import_error, TestStep};

/// Install a fmt subscriber for test binaries.
/// Safe to call from multiple tests; only the first call wins.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Convenience macro collecting checks into the boxed list a step expects
#[macro_export]
macro_rules! compose_checks {
    ($($check:expr),* $(,)?) => {
        vec![$(Box::new($check) as Box<dyn $crate::StateCheck>),*]
    };
}
