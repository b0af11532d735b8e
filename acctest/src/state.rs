//! State snapshots produced by the apply engine
//!
//! The apply engine owns the state; the harness only ever reads it. A
//! snapshot maps configuration addresses ("azurerm_route_table.test") to the
//! flattened attribute view of the provisioned instance. Checks pull the
//! opaque backend identifier and individual attributes out of these
//! snapshots; nothing in the harness writes them back.

use crate::error::{AcctestError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flattened attribute view of one provisioned instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceState {
    /// Opaque backend identifier, e.g.
    /// "/subscriptions/.../resourceGroups/.../routeTables/acctest123"
    pub id: String,
    /// Flattened attributes, collection counts included
    /// ("route.#" = "2", "tags.%" = "1", "tags.environment" = "staging")
    pub attributes: HashMap<String, String>,
}

impl InstanceState {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute insertion, for tests and engines
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute lookup where absence is a harness error
    pub fn require_attr(&self, key: &str) -> Result<&str> {
        self.attr(key).ok_or_else(|| AcctestError::MissingAttribute {
            resource: self.id.clone(),
            attribute: key.to_string(),
        })
    }
}

/// All instances known to the apply engine after a step converged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub resources: HashMap<String, InstanceState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, address: &str, instance: InstanceState) -> Self {
        self.resources.insert(address.to_string(), instance);
        self
    }

    pub fn resource(&self, address: &str) -> Result<&InstanceState> {
        self.resources
            .get(address)
            .ok_or_else(|| AcctestError::ResourceNotInState(address.to_string()))
    }

    /// All instances whose address belongs to the given resource type
    pub fn instances_of<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a InstanceState)> {
        self.resources.iter().filter(move |(address, _)| {
            address
                .strip_prefix(resource_type)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup() {
        let instance = InstanceState::new("/some/id")
            .with_attr("name", "acctest123")
            .with_attr("route.#", "2");

        assert_eq!(instance.attr("name"), Some("acctest123"));
        assert_eq!(instance.attr("missing"), None);
        assert_eq!(instance.require_attr("route.#").unwrap(), "2");

        let err = instance.require_attr("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn snapshot_resolves_addresses() {
        let snapshot = StateSnapshot::new()
            .with_resource("azurerm_route_table.test", InstanceState::new("/rt/1"));

        assert_eq!(
            snapshot.resource("azurerm_route_table.test").unwrap().id,
            "/rt/1"
        );
        assert!(matches!(
            snapshot.resource("azurerm_route_table.other"),
            Err(AcctestError::ResourceNotInState(_))
        ));
    }

    #[test]
    fn snapshots_round_trip_through_json() {
        let snapshot = StateSnapshot::new().with_resource(
            "azurerm_route_table.test",
            InstanceState::new("/rt/1").with_attr("route.#", "1"),
        );

        let encoded = serde_json::to_string(&snapshot).unwrap();
        let decoded: StateSnapshot = serde_json::from_str(&encoded).unwrap();
        let instance = decoded.resource("azurerm_route_table.test").unwrap();
        assert_eq!(instance.id, "/rt/1");
        assert_eq!(instance.attr("route.#"), Some("1"));
    }

    #[test]
    fn instances_of_filters_by_type_not_prefix() {
        let snapshot = StateSnapshot::new()
            .with_resource("azurerm_subnet.test", InstanceState::new("/subnet/1"))
            .with_resource(
                "azurerm_subnet_route_table_association.test",
                InstanceState::new("/assoc/1"),
            );

        let subnets: Vec<_> = snapshot.instances_of("azurerm_subnet").collect();
        assert_eq!(subnets.len(), 1);
        assert_eq!(subnets[0].1.id, "/subnet/1");
    }
}
