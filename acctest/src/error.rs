//! Error types for the acceptance-test harness

/// Error type for harness operations
#[derive(Debug, thiserror::Error)]
pub enum AcctestError {
    #[error("Resource not found in state: {0}")]
    ResourceNotInState(String),

    #[error("Attribute {attribute:?} missing from state for {resource}")]
    MissingAttribute {
        resource: String,
        attribute: String,
    },

    #[error("Invalid resource ID {0:?}: {1}")]
    InvalidResourceId(String, String),

    #[error("Backend call failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Check failed: {0}")]
    CheckFailed(String),

    #[error("{resource} still exists in the backend after destroy")]
    StillExists { resource: String },

    #[error("Step {index} failed: {source}")]
    StepFailed {
        index: usize,
        #[source]
        source: Box<AcctestError>,
    },

    #[error("Step {index} expected an apply error matching {pattern:?} but apply succeeded")]
    ExpectedErrorNotSeen { index: usize, pattern: String },

    #[error("Step {index} apply error {message:?} did not match {pattern:?}")]
    ErrorMismatch {
        index: usize,
        message: String,
        pattern: String,
    },

    #[error("Step {index} left a non-empty plan after apply")]
    NonEmptyPlan { index: usize },

    #[error("Imported attribute {attribute:?} mismatch for {resource}: expected {expected:?}, got {actual:?}")]
    ImportVerifyMismatch {
        resource: String,
        attribute: String,
        expected: String,
        actual: String,
    },

    #[error("Import step has no prior apply step to import from")]
    ImportWithoutPriorState,

    #[error("Apply engine error: {0}")]
    Engine(#[from] crate::engine::EngineError),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, AcctestError>;

impl AcctestError {
    /// Wrap an arbitrary backend/SDK error
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        AcctestError::Backend(Box::new(err))
    }

    fn step_index(&self) -> Option<usize> {
        match self {
            AcctestError::StepFailed { index, .. }
            | AcctestError::ExpectedErrorNotSeen { index, .. }
            | AcctestError::ErrorMismatch { index, .. }
            | AcctestError::NonEmptyPlan { index } => Some(*index),
            _ => None,
        }
    }

    /// Attach a step index unless the error already carries one
    pub(crate) fn at_step(self, index: usize) -> Self {
        if self.step_index().is_some() {
            return self;
        }
        AcctestError::StepFailed {
            index,
            source: Box::new(self),
        }
    }
}

impl From<String> for AcctestError {
    fn from(s: String) -> Self {
        AcctestError::Custom(s)
    }
}

impl From<&str> for AcctestError {
    fn from(s: &str) -> Self {
        AcctestError::Custom(s.to_string())
    }
}
