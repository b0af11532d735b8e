//! Subnet operations
//!
//! Subnets are children of virtual networks. The association between a
//! subnet and a route table lives on the subnet itself, which is why the
//! virtual association resource probes this API rather than one of its own.

use serde::{Deserialize, Serialize};

use super::super::client::Client;
use super::super::error::ApiError;
use super::API_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub name: String,
    pub properties: SubnetProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubnetProperties {
    #[serde(rename = "addressPrefix", skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,
    /// Reference to the associated route table, absent when none is attached
    #[serde(rename = "routeTable", skip_serializing_if = "Option::is_none")]
    pub route_table: Option<SubResource>,
}

/// Reference to another resource by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubResource {
    pub id: String,
}

pub struct SubnetsApi<'a> {
    client: &'a Client,
}

impl<'a> SubnetsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        virtual_network: &str,
        name: &str,
    ) -> Result<Subnet, ApiError> {
        let path = format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/virtualNetworks/{}/subnets/{}?api-version={}",
            subscription_id, resource_group, virtual_network, name, API_VERSION
        );
        self.client.get(&path).await
    }
}

#[cfg(test)]
#[path = "./subnets_test.rs"]
mod subnets_test;
