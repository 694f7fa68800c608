//! Domain services.
//!
//! Each service wraps one REST resource and exposes one async method per endpoint. There is no
//! retry, caching or local validation here: every failure is the [`ApiError`](crate::transport::ApiError)
//! produced by the transport, passed through unchanged.

pub mod cart_service;
pub mod product_service;
pub mod user_service;

pub use cart_service::*;
pub use product_service::*;
pub use user_service::*;
