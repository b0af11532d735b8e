//! Per-run test context
//!
//! Every acceptance test builds one TestContext up front: a random numeric
//! and string suffix so concurrent runs never collide on backend names, the
//! region labels the rendered configuration targets, and the address of the
//! resource under test. The context is read-only for the rest of the run;
//! renderers derive everything from it so two renders of the same context
//! produce byte-identical configuration.

use std::env;

const RANDOM_STRING_LEN: usize = 5;
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Region labels for the rendered configuration.
/// Secondary/ternary exist for resources that span regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub primary: String,
    pub secondary: String,
    pub ternary: String,
}

impl Locations {
    /// Resolve locations from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            primary: env::var("ARM_TEST_LOCATION").unwrap_or_else(|_| "westeurope".to_string()),
            secondary: env::var("ARM_TEST_LOCATION_ALT")
                .unwrap_or_else(|_| "northeurope".to_string()),
            ternary: env::var("ARM_TEST_LOCATION_ALT2")
                .unwrap_or_else(|_| "francecentral".to_string()),
        }
    }
}

/// Identifiers for a single acceptance-test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    /// Resource type under test (e.g. "azurerm_route_table")
    pub resource_type: String,
    /// Configuration label of the instance under test (e.g. "test")
    pub resource_label: String,
    /// Random 8-digit suffix for backend names
    pub random_integer: u64,
    /// Random lowercase-alphanumeric suffix for resources with
    /// tighter naming rules (storage accounts and the like)
    pub random_string: String,
    pub locations: Locations,
}

impl TestContext {
    /// Build a context with fresh random identifiers
    pub fn new(resource_type: &str, resource_label: &str) -> Self {
        let entropy = uuid::Uuid::new_v4();
        let bytes = entropy.as_bytes();

        let mut n: u64 = 0;
        for b in &bytes[..8] {
            n = (n << 8) | u64::from(*b);
        }
        // 8 digits, never leading-zero
        let random_integer = 10_000_000 + n % 90_000_000;

        let random_string: String = bytes[8..8 + RANDOM_STRING_LEN]
            .iter()
            .map(|b| CHARSET[usize::from(*b) % CHARSET.len()] as char)
            .collect();

        Self::with_seed(
            resource_type,
            resource_label,
            random_integer,
            &random_string,
            Locations::from_env(),
        )
    }

    /// Build a fully deterministic context
    pub fn with_seed(
        resource_type: &str,
        resource_label: &str,
        random_integer: u64,
        random_string: &str,
        locations: Locations,
    ) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            resource_label: resource_label.to_string(),
            random_integer,
            random_string: random_string.to_string(),
            locations,
        }
    }

    /// Computed backend name for the instance under test
    pub fn resource_name(&self) -> String {
        format!("acctest{}", self.random_integer)
    }

    /// Configuration address of the instance under test
    /// (e.g. "azurerm_route_table.test")
    pub fn resource_address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_label)
    }
}
