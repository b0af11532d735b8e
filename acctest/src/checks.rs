//! State checks run against the snapshot a step produced
//!
//! The attribute checks mirror the assertions acceptance tests lean on most:
//! exact value, value present, value absent. The backend-facing checks wrap
//! a LifecycleResource and turn its tri-state probe into pass/fail.

use crate::error::{AcctestError, Result};
use crate::resource::{LifecycleResource, ResourceWithDestroy};
use crate::state::StateSnapshot;
use async_trait::async_trait;
use std::sync::Arc;

/// One assertion against a state snapshot
#[async_trait]
pub trait StateCheck: Send + Sync {
    async fn check(&self, state: &StateSnapshot) -> Result<()>;
}

/// Assert an attribute has an exact value
pub fn attr(address: &str, key: &str, value: &str) -> AttrEq {
    AttrEq {
        address: address.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Assert an attribute is present and non-empty
pub fn attr_set(address: &str, key: &str) -> AttrSet {
    AttrSet {
        address: address.to_string(),
        key: key.to_string(),
    }
}

/// Assert an attribute is absent from state
pub fn no_attr(address: &str, key: &str) -> AttrAbsent {
    AttrAbsent {
        address: address.to_string(),
        key: key.to_string(),
    }
}

pub struct AttrEq {
    address: String,
    key: String,
    value: String,
}

#[async_trait]
impl StateCheck for AttrEq {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        let instance = state.resource(&self.address)?;
        let actual = instance.require_attr(&self.key)?;
        if actual != self.value {
            return Err(AcctestError::CheckFailed(format!(
                "{}: attribute {:?} is {:?}, expected {:?}",
                self.address, self.key, actual, self.value
            )));
        }
        Ok(())
    }
}

pub struct AttrSet {
    address: String,
    key: String,
}

#[async_trait]
impl StateCheck for AttrSet {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        let instance = state.resource(&self.address)?;
        match instance.attr(&self.key) {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(AcctestError::CheckFailed(format!(
                "{}: attribute {:?} is not set",
                self.address, self.key
            ))),
        }
    }
}

pub struct AttrAbsent {
    address: String,
    key: String,
}

#[async_trait]
impl StateCheck for AttrAbsent {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        let instance = state.resource(&self.address)?;
        match instance.attr(&self.key) {
            None => Ok(()),
            Some(v) => Err(AcctestError::CheckFailed(format!(
                "{}: attribute {:?} should be absent but is {:?}",
                self.address, self.key, v
            ))),
        }
    }
}

/// Assert the instance at `address` exists in the backend
pub struct ExistsCheck {
    resource: Arc<dyn LifecycleResource>,
    address: String,
}

impl ExistsCheck {
    pub fn new(resource: Arc<dyn LifecycleResource>, address: &str) -> Self {
        Self {
            resource,
            address: address.to_string(),
        }
    }
}

#[async_trait]
impl StateCheck for ExistsCheck {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        let instance = state.resource(&self.address)?;
        if self.resource.exists(instance).await? {
            Ok(())
        } else {
            Err(AcctestError::CheckFailed(format!(
                "{} ({}) does not exist in the backend",
                self.address, instance.id
            )))
        }
    }
}

/// Delete the instance at `address` out-of-band to provoke drift.
/// Pair with expect_non_empty_plan on the step.
pub struct DisappearsCheck {
    resource: Arc<dyn ResourceWithDestroy>,
    address: String,
}

impl DisappearsCheck {
    pub fn new(resource: Arc<dyn ResourceWithDestroy>, address: &str) -> Self {
        Self {
            resource,
            address: address.to_string(),
        }
    }
}

#[async_trait]
impl StateCheck for DisappearsCheck {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        let instance = state.resource(&self.address)?;
        tracing::info!(address = %self.address, id = %instance.id, "deleting out-of-band");
        self.resource.destroy(instance).await
    }
}

/// Destroy sweep: every instance of the resource's type in the final
/// snapshot must be gone from the backend
pub struct DestroyCheck {
    resource: Arc<dyn LifecycleResource>,
}

impl DestroyCheck {
    pub fn new(resource: Arc<dyn LifecycleResource>) -> Self {
        Self { resource }
    }
}

#[async_trait]
impl StateCheck for DestroyCheck {
    async fn check(&self, state: &StateSnapshot) -> Result<()> {
        for (address, instance) in state.instances_of(self.resource.type_name()) {
            if self.resource.exists(instance).await? {
                return Err(AcctestError::StillExists {
                    resource: address.clone(),
                });
            }
        }
        Ok(())
    }
}
