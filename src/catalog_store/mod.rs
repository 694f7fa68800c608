//! # Catalog Store
//!
//! Product listings held by an [`EntityStore`], one snapshot per [`CatalogFilter`].
//!
//! ## Structure
//!
//! - [`entity`] - [`Catalog`] and its [`RemoteEntity`](crate::framework::RemoteEntity) implementation
//! - [`actions`] - [`CatalogAction`] (create, update, delete) and what they report
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - Factory function that creates the store and its client
//!
//! A mutation re-fetches the filter it was issued under and drops the snapshots of every
//! other filter, since a created or edited product may move between them.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::CatalogStoreClient;
use crate::framework::EntityStore;

/// Creates a new catalog store and its client.
pub fn new(buffer_size: usize) -> (EntityStore<Catalog>, CatalogStoreClient) {
    let (store, client) = EntityStore::new(buffer_size);
    (store, CatalogStoreClient::new(client))
}
