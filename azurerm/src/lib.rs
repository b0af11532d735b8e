//! azurerm - example resource definitions for the acceptance-test harness
//!
//! A thin SDK surface over an Azure-style REST API (client, resource-id
//! parsing, long-running-operation wait) plus the lifecycle resource
//! definitions the harness drives: a route table, and a subnet/route-table
//! association as the virtual-resource variant.

pub mod api;
pub mod resources;

pub use api::{ApiError, Client};
