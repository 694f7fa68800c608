//! Generic entity store for resources owned by the backend.
//!
//! # Main Components
//!
//! - [`RemoteEntity`] - Trait that store-managed resources implement
//! - [`EntityStore`] - Sequential actor holding snapshots and serializing mutations
//! - [`StoreClient`] - Cloneable handle for sending requests to a store
//! - [`StoreHandle`] - Default `refresh`/`cached`/`evict` for typed clients
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to drive typed clients without a running store.

pub mod core;
pub mod handle;
pub mod mock;

pub use self::core::*;
pub use self::handle::*;
