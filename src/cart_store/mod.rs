//! # Cart Store
//!
//! Per-user carts held by an [`EntityStore`], keyed by [`Username`](crate::model::Username).
//!
//! ## Structure
//!
//! - [`entity`] - [`RemoteEntity`](crate::framework::RemoteEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`], the mutations the backend performs
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory function that creates the store and its client
//!
//! Every action goes through the one store task, so rapid repeated clicks are applied and
//! re-fetched in order. The cart handed back is always the backend's, never a local delta.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use golflow_storefront::cart_store;
//! use golflow_storefront::config::Config;
//! use golflow_storefront::model::{ProductId, Username};
//! use golflow_storefront::services::CartService;
//! use golflow_storefront::transport::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(&Config::new("http://localhost:8080/")?)?;
//!     let (store, carts) = cart_store::new(32);
//!     tokio::spawn(store.run(CartService::new(api)));
//!
//!     let alice = Username::from("alice");
//!     let cart = carts.add_item(&alice, ProductId(1), 20.0, 2).await?;
//!     println!("{} items, {:.2} total", cart.total_items, cart.total_price);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartStoreClient;
use crate::framework::EntityStore;
use crate::model::Cart;

/// Creates a new cart store and its client.
pub fn new(buffer_size: usize) -> (EntityStore<Cart>, CartStoreClient) {
    let (store, client) = EntityStore::new(buffer_size);
    (store, CartStoreClient::new(client))
}
