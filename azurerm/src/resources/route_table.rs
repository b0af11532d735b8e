//! Route table lifecycle resource
//!
//! The configuration variants pin the update transitions acceptance tests
//! care about: adding and dropping route blocks, the distinction between
//! omitting the repeated block (existing routes untouched) and declaring it
//! as an explicit empty list (all routes removed), duplicate declarations
//! for requires-import, and tag-map replacement.

use acctest::{AcctestError, InstanceState, LifecycleResource, ResourceWithDestroy, TestContext};
use async_trait::async_trait;

use crate::api::{Client, ResourceId};

pub struct RouteTableTest {
    client: Client,
}

impl RouteTableTest {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn template(data: &TestContext, body: &str) -> String {
        format!(
            r#"resource "azurerm_resource_group" "test" {{
  name     = "acctestRG-{ri}"
  location = "{location}"
}}

resource "azurerm_route_table" "test" {{
  name                = "acctest{ri}"
  location            = azurerm_resource_group.test.location
  resource_group_name = azurerm_resource_group.test.name
{body}}}
"#,
            ri = data.random_integer,
            location = data.locations.primary,
            body = body,
        )
    }

    /// One route block
    pub fn config_basic(&self, data: &TestContext) -> String {
        Self::template(
            data,
            r#"
  route {
    name           = "route1"
    address_prefix = "10.1.0.0/16"
    next_hop_type  = "VnetLocal"
  }
"#,
        )
    }

    /// The repeated block is omitted entirely: the apply engine leaves
    /// existing routes untouched
    pub fn config_no_route_blocks(&self, data: &TestContext) -> String {
        Self::template(data, "")
    }

    /// The repeated block is declared as an explicit empty list: the apply
    /// engine removes every route
    pub fn config_empty_routes(&self, data: &TestContext) -> String {
        Self::template(data, "\n  route = []\n")
    }

    /// A second declaration with the first one's identifying attributes,
    /// for the requires-import negative test
    pub fn config_requires_import(&self, data: &TestContext) -> String {
        format!(
            r#"{}
resource "azurerm_route_table" "import" {{
  name                = azurerm_route_table.test.name
  location            = azurerm_route_table.test.location
  resource_group_name = azurerm_route_table.test.resource_group_name
}}
"#,
            self.config_basic(data)
        )
    }

    pub fn config_with_tags(&self, data: &TestContext) -> String {
        Self::template(
            data,
            r#"
  tags = {
    environment = "Production"
    cost_center = "MSFT"
  }
"#,
        )
    }

    pub fn config_with_tags_updated(&self, data: &TestContext) -> String {
        Self::template(
            data,
            r#"
  tags = {
    environment = "staging"
  }
"#,
        )
    }
}

#[async_trait]
impl LifecycleResource for RouteTableTest {
    fn type_name(&self) -> &str {
        "azurerm_route_table"
    }

    fn render(&self, data: &TestContext) -> String {
        self.config_basic(data)
    }

    async fn exists(&self, state: &InstanceState) -> acctest::Result<bool> {
        let id = ResourceId::parse(&state.id).map_err(AcctestError::backend)?;
        let name = id.require("routeTables").map_err(AcctestError::backend)?;

        match self
            .client
            .network()
            .route_tables()
            .get(&id.subscription_id, &id.resource_group, name)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(AcctestError::backend(e)),
        }
    }
}

#[async_trait]
impl ResourceWithDestroy for RouteTableTest {
    async fn destroy(&self, state: &InstanceState) -> acctest::Result<()> {
        let id = ResourceId::parse(&state.id).map_err(AcctestError::backend)?;
        let name = id.require("routeTables").map_err(AcctestError::backend)?;

        let operation = self
            .client
            .network()
            .route_tables()
            .delete(&id.subscription_id, &id.resource_group, name)
            .await
            .map_err(AcctestError::backend)?;

        operation
            .wait_for_completion()
            .await
            .map_err(AcctestError::backend)
    }
}

#[cfg(test)]
#[path = "./route_table_test.rs"]
mod route_table_test;
