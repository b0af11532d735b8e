//! Network API operations and wire models

pub mod route_tables;
pub mod subnets;

pub use route_tables::{Route, RouteProperties, RouteTable, RouteTablesApi};
pub use subnets::{Subnet, SubnetsApi};

use super::client::Client;

const API_VERSION: &str = "2020-05-01";

/// Entry point for network operations
pub struct NetworkApi<'a> {
    client: &'a Client,
}

impl<'a> NetworkApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn route_tables(&self) -> RouteTablesApi<'a> {
        RouteTablesApi::new(self.client)
    }

    pub fn subnets(&self) -> SubnetsApi<'a> {
        SubnetsApi::new(self.client)
    }
}
