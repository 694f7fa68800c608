//! # Page State Machines
//!
//! Each page owns its transient UI state and turns user intents into store or service calls.
//! Handlers take `&mut self`, so a page that is dropped mid-request drops the pending future
//! with it and nothing is written into a page that no longer exists.
//!
//! Failure presentation follows one convention per page kind:
//!
//! - **Forms** (login, create user, product create/edit) carry an inline `error` and a
//!   [`FormStatus`].
//! - **Lists** (home, products, cart) carry a [`ListState`], keep their previous snapshot
//!   when a mutation fails, log the failure, and raise a [`Notice`].

pub mod cart;
pub mod header;
pub mod home;
pub mod login;
pub mod product_form;
pub mod products;

pub use cart::*;
pub use header::*;
pub use home::*;
pub use login::*;
pub use product_form::*;
pub use products::*;

use crate::clients::CartStoreClient;
use tracing::warn;

/// Lifecycle of a collection view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListState {
    /// Loading (again).
    #[default]
    Initial,
    Loaded,
    /// Nothing to show. A category without products lands here, never in `Error`.
    Empty,
    Error,
}

impl ListState {
    pub fn for_items<T>(items: &[T]) -> Self {
        if items.is_empty() {
            ListState::Empty
        } else {
            ListState::Loaded
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

/// Transient feedback shown on list pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    /// The primary operation succeeded but a follow-up did not (e.g. the image upload).
    Partial(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Partial(m) | Notice::Failure(m) => m,
        }
    }
}

/// Feeds the header badge from the cart store. Signed-out headers are left alone.
async fn load_badge(header: &mut Header, carts: &CartStoreClient) {
    let Some(user) = header.user().cloned() else {
        return;
    };
    match carts.load(&user).await {
        Ok(cart) => header.set_cart(&cart),
        Err(e) => warn!(%user, error = %e, "Could not load cart badge"),
    }
}
