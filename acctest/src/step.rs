//! Test steps
//!
//! A step is one apply-and-assert cycle. Update, no-op, requires-import and
//! import transitions are all expressed as sequences of steps whose
//! configuration text differs; the harness carries nothing between steps
//! beyond the engine's own state.

use crate::checks::StateCheck;
use regex::Regex;

pub(crate) enum StepKind {
    /// Apply a configuration and assert on the resulting state
    Apply {
        config: String,
        checks: Vec<Box<dyn StateCheck>>,
        expect_non_empty_plan: bool,
    },
    /// Apply a configuration and require the engine to reject it
    ExpectError { config: String, pattern: Regex },
    /// Re-import the instance at `address` using the id recorded in the
    /// previous step's state
    Import {
        address: String,
        verify: bool,
        ignore: Vec<String>,
    },
}

/// One apply-and-assert unit in a lifecycle test
pub struct TestStep {
    pub(crate) kind: StepKind,
}

impl TestStep {
    /// Apply `config`; assertions are added with `check`
    pub fn apply(config: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Apply {
                config: config.into(),
                checks: Vec::new(),
                expect_non_empty_plan: false,
            },
        }
    }

    /// Apply `config` and require the error message to match `pattern`.
    /// A silently successful apply fails the step.
    pub fn expect_error(config: impl Into<String>, pattern: Regex) -> Self {
        Self {
            kind: StepKind::ExpectError {
                config: config.into(),
                pattern,
            },
        }
    }

    /// Import-verification step for the instance applied previously
    pub fn import(address: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Import {
                address: address.into(),
                verify: true,
                ignore: Vec::new(),
            },
        }
    }

    pub fn check(mut self, check: impl StateCheck + 'static) -> Self {
        if let StepKind::Apply { checks, .. } = &mut self.kind {
            checks.push(Box::new(check));
        }
        self
    }

    pub fn checks(mut self, boxed: Vec<Box<dyn StateCheck>>) -> Self {
        if let StepKind::Apply { checks, .. } = &mut self.kind {
            checks.extend(boxed);
        }
        self
    }

    /// Allow the post-apply plan to be non-empty (disappears tests)
    pub fn expect_non_empty_plan(mut self) -> Self {
        if let StepKind::Apply {
            expect_non_empty_plan,
            ..
        } = &mut self.kind
        {
            *expect_non_empty_plan = true;
        }
        self
    }

    /// Skip attribute verification on an import step
    pub fn no_verify(mut self) -> Self {
        if let StepKind::Import { verify, .. } = &mut self.kind {
            *verify = false;
        }
        self
    }

    /// Exclude attributes from import verification (write-only fields,
    /// timestamps the backend rewrites)
    pub fn ignore_on_verify(mut self, attributes: &[&str]) -> Self {
        if let StepKind::Import { ignore, .. } = &mut self.kind {
            ignore.extend(attributes.iter().map(|a| a.to_string()));
        }
        self
    }
}

/// Matcher for the import-conflict error an engine reports when a
/// declaration collides with an instance that already exists
pub fn requires_import_error(resource_type: &str) -> Regex {
    let pattern = format!(
        "A resource with the ID .+ already exists.+{}",
        regex::escape(resource_type)
    );
    Regex::new(&pattern).unwrap_or_else(|_| Regex::new("already exists").unwrap())
}
