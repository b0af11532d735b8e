//! Test case runner
//!
//! Executes steps strictly in sequence against an external apply engine.
//! Each step blocks until the engine converges; state lives in the engine
//! and the backend, the runner only remembers the last snapshot and config
//! so import steps and the destroy sweep have identifiers to work from.

use crate::checks::StateCheck;
use crate::engine::{ApplyEngine, Plan};
use crate::error::{AcctestError, Result};
use crate::state::StateSnapshot;
use crate::step::{StepKind, TestStep};

/// An ordered lifecycle test: steps, then destroy, then the destroy sweep
pub struct TestCase {
    steps: Vec<TestStep>,
    check_destroy: Option<Box<dyn StateCheck>>,
}

impl TestCase {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            check_destroy: None,
        }
    }

    pub fn step(mut self, step: TestStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Run after the final destroy; receives the last pre-destroy snapshot
    /// so it still has backend identifiers to probe
    pub fn check_destroy(mut self, check: impl StateCheck + 'static) -> Self {
        self.check_destroy = Some(Box::new(check));
        self
    }

    pub async fn run(self, engine: &dyn ApplyEngine) -> Result<()> {
        let TestCase {
            steps,
            check_destroy,
        } = self;

        let mut last_snapshot: Option<StateSnapshot> = None;
        let mut last_config: Option<String> = None;

        let mut steps_result = Ok(());
        for (index, step) in steps.into_iter().enumerate() {
            if let Err(e) =
                run_step(engine, index, step, &mut last_snapshot, &mut last_config).await
            {
                steps_result = Err(e.at_step(index));
                break;
            }
        }

        // Cleanup always runs, even when a step failed
        tracing::info!("destroying remaining infrastructure");
        let destroy_result = engine.destroy().await;

        steps_result?;
        destroy_result?;

        if let Some(check) = &check_destroy {
            let snapshot = last_snapshot.unwrap_or_default();
            check.check(&snapshot).await?;
        }

        Ok(())
    }
}

async fn run_step(
    engine: &dyn ApplyEngine,
    index: usize,
    step: TestStep,
    last_snapshot: &mut Option<StateSnapshot>,
    last_config: &mut Option<String>,
) -> Result<()> {
    match step.kind {
        StepKind::Apply {
            config,
            checks,
            expect_non_empty_plan,
        } => {
            tracing::info!(step = index, "applying configuration");
            let snapshot = engine.apply(&config).await?;

            for check in &checks {
                check.check(&snapshot).await?;
            }

            if !expect_non_empty_plan && engine.plan(&config).await? != Plan::Empty {
                return Err(AcctestError::NonEmptyPlan { index });
            }

            *last_snapshot = Some(snapshot);
            *last_config = Some(config);
            Ok(())
        }
        StepKind::ExpectError { config, pattern } => {
            tracing::info!(step = index, pattern = %pattern, "applying, expecting failure");
            match engine.apply(&config).await {
                Ok(_) => Err(AcctestError::ExpectedErrorNotSeen {
                    index,
                    pattern: pattern.to_string(),
                }),
                Err(e) if pattern.is_match(&e.0) => Ok(()),
                Err(e) => Err(AcctestError::ErrorMismatch {
                    index,
                    message: e.0,
                    pattern: pattern.to_string(),
                }),
            }
        }
        StepKind::Import {
            address,
            verify,
            ignore,
        } => {
            let snapshot = last_snapshot
                .as_ref()
                .ok_or(AcctestError::ImportWithoutPriorState)?;
            let config = last_config
                .as_deref()
                .ok_or(AcctestError::ImportWithoutPriorState)?;

            let prior = snapshot.resource(&address)?;
            tracing::info!(step = index, %address, id = %prior.id, "importing");
            let imported = engine.import(config, &address, &prior.id).await?;

            if verify {
                let imported_instance = imported.resource(&address)?;
                for (key, expected) in &prior.attributes {
                    if ignore.contains(key) {
                        continue;
                    }
                    let actual = imported_instance.attr(key).unwrap_or_default();
                    if actual != expected.as_str() {
                        return Err(AcctestError::ImportVerifyMismatch {
                            resource: address.clone(),
                            attribute: key.clone(),
                            expected: expected.clone(),
                            actual: actual.to_string(),
                        });
                    }
                }
            }
            Ok(())
        }
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{attr, StateCheck};
    use crate::engine::EngineError;
    use crate::mock::MockApplyEngine;
    use crate::state::InstanceState;
    use crate::step::requires_import_error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn snapshot_with(id: &str, attrs: &[(&str, &str)]) -> StateSnapshot {
        let mut instance = InstanceState::new(id);
        for (k, v) in attrs {
            instance = instance.with_attr(k, v);
        }
        StateSnapshot::new().with_resource("azurerm_route_table.test", instance)
    }

    struct CountingCheck(Arc<AtomicUsize>);

    #[async_trait]
    impl StateCheck for CountingCheck {
        async fn check(&self, _state: &StateSnapshot) -> crate::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn steps_run_in_sequence_and_destroy_at_the_end() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with("/rt/1", &[("name", "acctest1")])))
            .on_apply(Ok(snapshot_with("/rt/1", &[("name", "acctest1")])));

        let calls = Arc::new(AtomicUsize::new(0));
        let case = TestCase::new()
            .step(
                TestStep::apply("config one")
                    .check(attr("azurerm_route_table.test", "name", "acctest1"))
                    .check(CountingCheck(calls.clone())),
            )
            .step(TestStep::apply("config two").check(CountingCheck(calls.clone())));

        case.run(&engine).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(engine.applied(), vec!["config one", "config two"]);
        assert!(engine.destroyed());
    }

    #[tokio::test]
    async fn non_empty_plan_after_apply_fails_the_step() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with("/rt/1", &[])))
            .on_plan(Ok(Plan::Changes));

        let result = TestCase::new()
            .step(TestStep::apply("config"))
            .run(&engine)
            .await;

        assert!(matches!(result, Err(AcctestError::NonEmptyPlan { index: 0 })));
    }

    #[tokio::test]
    async fn expect_non_empty_plan_skips_the_plan_gate() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with("/rt/1", &[])))
            .on_plan(Ok(Plan::Changes));

        TestCase::new()
            .step(TestStep::apply("config").expect_non_empty_plan())
            .run(&engine)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expected_error_must_occur() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with("/rt/1", &[("name", "acctest1")])))
            .on_apply(Ok(snapshot_with("/rt/1", &[("name", "acctest1")])));

        let result = TestCase::new()
            .step(TestStep::apply("config"))
            .step(TestStep::expect_error(
                "duplicate config",
                requires_import_error("azurerm_route_table"),
            ))
            .run(&engine)
            .await;

        assert!(matches!(
            result,
            Err(AcctestError::ExpectedErrorNotSeen { index: 1, .. })
        ));
    }

    #[tokio::test]
    async fn expected_error_matches_pattern() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with("/rt/1", &[])))
            .on_apply(Err(EngineError::new(
                "A resource with the ID \"/rt/1\" already exists - see azurerm_route_table",
            )));

        TestCase::new()
            .step(TestStep::apply("config"))
            .step(TestStep::expect_error(
                "duplicate config",
                requires_import_error("azurerm_route_table"),
            ))
            .run(&engine)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn mismatched_error_is_reported() {
        let engine = MockApplyEngine::new()
            .on_apply(Err(EngineError::new("authorization failed")));

        let result = TestCase::new()
            .step(TestStep::expect_error(
                "config",
                requires_import_error("azurerm_route_table"),
            ))
            .run(&engine)
            .await;

        match result {
            Err(AcctestError::ErrorMismatch { message, .. }) => {
                assert!(message.contains("authorization failed"));
            }
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn import_verifies_attributes_against_prior_state() {
        let engine = MockApplyEngine::new()
            .on_apply(Ok(snapshot_with(
                "/rt/1",
                &[("name", "acctest1"), ("location", "westeurope")],
            )))
            .on_import(Ok(snapshot_with(
                "/rt/1",
                &[("name", "acctest1"), ("location", "westeurope")],
            )));

        TestCase::new()
            .step(TestStep::apply("config"))
            .step(TestStep::import("azurerm_route_table.test"))
            .run(&engine)
            .await
            .unwrap();

        assert_eq!(
            engine.imports(),
            vec![("azurerm_route_table.test".to_string(), "/rt/1".to_string())]
        );
    }

    #[tokio::test]
    async fn import_mismatch_fails_unless_ignored() {
        let applied = snapshot_with("/rt/1", &[("name", "acctest1"), ("etag", "v1")]);
        let imported = snapshot_with("/rt/1", &[("name", "acctest1"), ("etag", "v2")]);

        let engine = MockApplyEngine::new()
            .on_apply(Ok(applied.clone()))
            .on_import(Ok(imported.clone()));
        let result = TestCase::new()
            .step(TestStep::apply("config"))
            .step(TestStep::import("azurerm_route_table.test"))
            .run(&engine)
            .await;
        match result {
            Err(AcctestError::StepFailed { source, .. }) => assert!(matches!(
                *source,
                AcctestError::ImportVerifyMismatch { .. }
            )),
            other => panic!("unexpected result: {:?}", other.err()),
        }

        let engine = MockApplyEngine::new()
            .on_apply(Ok(applied))
            .on_import(Ok(imported));
        TestCase::new()
            .step(TestStep::apply("config"))
            .step(TestStep::import("azurerm_route_table.test").ignore_on_verify(&["etag"]))
            .run(&engine)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn import_without_prior_apply_is_rejected() {
        let engine = MockApplyEngine::new();
        let result = TestCase::new()
            .step(TestStep::import("azurerm_route_table.test"))
            .run(&engine)
            .await;
        match result {
            Err(AcctestError::StepFailed { source, .. }) => assert!(matches!(
                *source,
                AcctestError::ImportWithoutPriorState
            )),
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn check_destroy_sees_the_last_pre_destroy_snapshot() {
        struct SnapshotProbe(Arc<AtomicUsize>);

        #[async_trait]
        impl StateCheck for SnapshotProbe {
            async fn check(&self, state: &StateSnapshot) -> crate::Result<()> {
                assert!(state.resource("azurerm_route_table.test").is_ok());
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let engine = MockApplyEngine::new().on_apply(Ok(snapshot_with("/rt/1", &[])));
        let ran = Arc::new(AtomicUsize::new(0));

        TestCase::new()
            .step(TestStep::apply("config"))
            .check_destroy(SnapshotProbe(ran.clone()))
            .run(&engine)
            .await
            .unwrap();

        assert!(engine.destroyed());
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_check_aborts_with_step_index() {
        let engine = MockApplyEngine::new().on_apply(Ok(snapshot_with("/rt/1", &[])));

        let result = TestCase::new()
            .step(
                TestStep::apply("config").check(attr("azurerm_route_table.test", "name", "nope")),
            )
            .run(&engine)
            .await;

        assert!(matches!(
            result,
            Err(AcctestError::StepFailed { index: 0, .. })
        ));
        // cleanup still ran
        assert!(engine.destroyed());
    }
}
