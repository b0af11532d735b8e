//! Subnet/route-table association
//!
//! A virtual resource: the association has no backend object of its own,
//! its identifier is the parent subnet's id and its existence is the
//! presence of the routeTable reference on that subnet. The exists probe
//! therefore fetches the parent and inspects a field instead of getting an
//! independent object.

use acctest::{AcctestError, InstanceState, LifecycleResource, TestContext};
use async_trait::async_trait;

use crate::api::{Client, ResourceId};

pub struct SubnetRouteTableAssociationTest {
    client: Client,
}

impl SubnetRouteTableAssociationTest {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn config_basic(&self, data: &TestContext) -> String {
        format!(
            r#"resource "azurerm_resource_group" "test" {{
  name     = "acctestRG-{ri}"
  location = "{location}"
}}

resource "azurerm_virtual_network" "test" {{
  name                = "acctestvnet{ri}"
  address_space       = ["10.0.0.0/16"]
  location            = azurerm_resource_group.test.location
  resource_group_name = azurerm_resource_group.test.name
}}

resource "azurerm_subnet" "test" {{
  name                 = "acctestsubnet{ri}"
  resource_group_name  = azurerm_resource_group.test.name
  virtual_network_name = azurerm_virtual_network.test.name
  address_prefix       = "10.0.2.0/24"
}}

resource "azurerm_route_table" "test" {{
  name                = "acctest{ri}"
  location            = azurerm_resource_group.test.location
  resource_group_name = azurerm_resource_group.test.name

  route {{
    name           = "route1"
    address_prefix = "10.100.0.0/14"
    next_hop_type  = "VirtualAppliance"
    next_hop_in_ip_address = "10.10.1.1"
  }}
}}

resource "azurerm_subnet_route_table_association" "test" {{
  subnet_id      = azurerm_subnet.test.id
  route_table_id = azurerm_route_table.test.id
}}
"#,
            ri = data.random_integer,
            location = data.locations.primary,
        )
    }

    /// Same infrastructure with the association removed; applying this
    /// after config_basic detaches the route table from the subnet
    pub fn config_without_association(&self, data: &TestContext) -> String {
        let config = self.config_basic(data);
        match config.find("\nresource \"azurerm_subnet_route_table_association\"") {
            Some(offset) => config[..offset].to_string() + "\n",
            None => config,
        }
    }
}

#[async_trait]
impl LifecycleResource for SubnetRouteTableAssociationTest {
    fn type_name(&self) -> &str {
        "azurerm_subnet_route_table_association"
    }

    fn render(&self, data: &TestContext) -> String {
        self.config_basic(data)
    }

    /// The association's id is the subnet's id; existence is the presence
    /// of the route table reference on the parent subnet
    async fn exists(&self, state: &InstanceState) -> acctest::Result<bool> {
        let id = ResourceId::parse(&state.id).map_err(AcctestError::backend)?;
        let virtual_network = id.require("virtualNetworks").map_err(AcctestError::backend)?;
        let subnet_name = id.require("subnets").map_err(AcctestError::backend)?;

        let subnet = match self
            .client
            .network()
            .subnets()
            .get(
                &id.subscription_id,
                &id.resource_group,
                virtual_network,
                subnet_name,
            )
            .await
        {
            Ok(subnet) => subnet,
            // parent gone means the association is gone
            Err(e) if e.is_not_found() => return Ok(false),
            Err(e) => return Err(AcctestError::backend(e)),
        };

        Ok(subnet.properties.route_table.is_some())
    }
}

#[cfg(test)]
#[path = "./subnet_route_table_association_test.rs"]
mod subnet_route_table_association_test;
