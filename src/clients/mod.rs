//! Type-safe wrappers around [`StoreClient`](crate::framework::StoreClient).

pub mod cart_client;
pub mod catalog_client;

pub use cart_client::*;
pub use catalog_client::*;
