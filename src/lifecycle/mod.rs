//! Runtime wiring for the storefront.
//!
//! - [`Storefront`] - Builds the HTTP client and services, spawns the cart and catalog stores,
//!   and hands out pages bound to them
//! - [`setup_tracing`] - Installs the log subscriber

pub mod storefront;
pub mod tracing;

pub use self::storefront::*;
pub use self::tracing::*;
