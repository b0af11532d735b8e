//! Scriptable apply engine for exercising the harness without a real
//! declarative engine. Results are consumed FIFO per operation; every
//! applied configuration is recorded for inspection.

use crate::engine::{ApplyEngine, EngineError, Plan};
use crate::state::StateSnapshot;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type ApplyResult = Result<StateSnapshot, EngineError>;
type PlanResult = Result<Plan, EngineError>;

#[derive(Default)]
struct Script {
    apply: VecDeque<ApplyResult>,
    plan: VecDeque<PlanResult>,
    import: VecDeque<ApplyResult>,
    applied: Vec<String>,
    imports: Vec<(String, String)>,
    destroyed: bool,
}

/// In-memory apply engine driven by a pre-loaded script.
/// Plan defaults to Empty when nothing is scripted; apply and import
/// fail loudly when the script runs dry.
#[derive(Default)]
pub struct MockApplyEngine {
    script: Mutex<Script>,
}

impl MockApplyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_apply(self, result: ApplyResult) -> Self {
        self.script.lock().unwrap().apply.push_back(result);
        self
    }

    pub fn on_plan(self, result: PlanResult) -> Self {
        self.script.lock().unwrap().plan.push_back(result);
        self
    }

    pub fn on_import(self, result: ApplyResult) -> Self {
        self.script.lock().unwrap().import.push_back(result);
        self
    }

    /// Configurations applied so far, in order
    pub fn applied(&self) -> Vec<String> {
        self.script.lock().unwrap().applied.clone()
    }

    /// (address, id) pairs imported so far
    pub fn imports(&self) -> Vec<(String, String)> {
        self.script.lock().unwrap().imports.clone()
    }

    pub fn destroyed(&self) -> bool {
        self.script.lock().unwrap().destroyed
    }
}

#[async_trait]
impl ApplyEngine for MockApplyEngine {
    async fn apply(&self, config: &str) -> Result<StateSnapshot, EngineError> {
        let mut script = self.script.lock().unwrap();
        script.applied.push(config.to_string());
        script
            .apply
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::new("mock engine: no apply result scripted")))
    }

    async fn plan(&self, _config: &str) -> Result<Plan, EngineError> {
        self.script
            .lock()
            .unwrap()
            .plan
            .pop_front()
            .unwrap_or(Ok(Plan::Empty))
    }

    async fn import(
        &self,
        _config: &str,
        address: &str,
        id: &str,
    ) -> Result<StateSnapshot, EngineError> {
        let mut script = self.script.lock().unwrap();
        script.imports.push((address.to_string(), id.to_string()));
        script
            .import
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::new("mock engine: no import result scripted")))
    }

    async fn destroy(&self) -> Result<(), EngineError> {
        self.script.lock().unwrap().destroyed = true;
        Ok(())
    }
}
