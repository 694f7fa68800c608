//! # Gol & Flow Storefront
//!
//! Client for the Gol & Flow shop backend: product listing and CRUD, per-user carts and a
//! username-only login. Every business value (prices, totals, stock) is owned by the backend;
//! this crate issues requests and shows what comes back.
//!
//! ## Consistency
//!
//! Nothing is patched locally. Every mutation is followed by a re-fetch of the affected
//! collection, and the snapshot handed back to the page is the re-fetched one. Mutations of
//! one entity type run through a single [`EntityStore`](framework::EntityStore) task, so
//! two rapid clicks are applied and re-fetched in order.
//!
//! ## Module Tour
//!
//! ### 1. Wire ([`transport`], [`model`], [`services`])
//! - [`ApiClient`](transport::ApiClient) is the one configured HTTP client.
//! - The services map one method to one endpoint and forward every error untouched as an
//!   [`ApiError`](transport::ApiError).
//!
//! ### 2. The Engine ([`framework`])
//! The generic store behind carts and the catalog.
//! - **Key items**: [`RemoteEntity`](framework::RemoteEntity),
//!   [`EntityStore`](framework::EntityStore), [`StoreClient`](framework::StoreClient).
//! - [`framework::mock`] drives code that uses a store without a backend.
//!
//! ### 3. The Stores ([`cart_store`], [`catalog_store`], [`clients`])
//! - Carts are keyed by username, listings by [`CatalogFilter`](catalog_store::CatalogFilter).
//! - [`CartStoreClient`](clients::CartStoreClient) and
//!   [`CatalogStoreClient`](clients::CatalogStoreClient) give them typed methods and errors.
//!
//! ### 4. The UI state ([`session`], [`pages`])
//! - [`Session`](session::Session) reads the stored username once and is passed explicitly.
//! - Each page is a state machine driven by `&mut self` handlers.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - [`Storefront`](lifecycle::Storefront) wires the above together and shuts it down.
//!
//! ## Running
//!
//! ```bash
//! GOLFLOW_BACKEND_URL=http://localhost:8080/ GOLFLOW_USERNAME=alice RUST_LOG=info cargo run
//! ```

pub mod cart_store;
pub mod catalog_store;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod services;
pub mod session;
pub mod transport;
