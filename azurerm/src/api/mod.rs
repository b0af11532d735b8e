pub mod client;
pub mod error;
pub mod lro;
pub mod network;
pub mod resource_id;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use client::Client;
pub use error::ApiError;
pub use lro::LongRunningOperation;
pub use resource_id::ResourceId;
