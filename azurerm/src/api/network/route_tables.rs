//! Route table operations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::super::client::Client;
use super::super::error::ApiError;
use super::super::lro::LongRunningOperation;
use super::API_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTable {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub properties: RouteTableProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTableProperties {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(rename = "provisioningState", skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub properties: RouteProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteProperties {
    #[serde(rename = "addressPrefix")]
    pub address_prefix: String,
    #[serde(rename = "nextHopType")]
    pub next_hop_type: String,
    #[serde(rename = "nextHopIpAddress", skip_serializing_if = "Option::is_none")]
    pub next_hop_ip_address: Option<String>,
}

pub struct RouteTablesApi<'a> {
    client: &'a Client,
}

impl<'a> RouteTablesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn path(subscription_id: &str, resource_group: &str, name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/routeTables/{}?api-version={}",
            subscription_id, resource_group, name, API_VERSION
        )
    }

    pub async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Result<RouteTable, ApiError> {
        self.client
            .get(&Self::path(subscription_id, resource_group, name))
            .await
    }

    pub async fn delete(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Result<LongRunningOperation, ApiError> {
        self.client
            .delete(&Self::path(subscription_id, resource_group, name))
            .await
    }
}

#[cfg(test)]
#[path = "./route_tables_test.rs"]
mod route_tables_test;
