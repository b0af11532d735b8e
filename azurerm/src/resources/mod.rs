pub mod route_table;
pub mod subnet_route_table_association;

pub use route_table::RouteTableTest;
pub use subnet_route_table_association::SubnetRouteTableAssociationTest;
