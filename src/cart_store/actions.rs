//! Mutations on a user's cart. Each maps to one cart endpoint.

use crate::model::{CartItemRequest, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add units of a product. The backend merges repeated adds into one line.
    Add(CartItemRequest),
    /// Take one unit off a line; a line at quantity 1 disappears.
    RemoveOne(ProductId),
    /// Drop a line whatever its quantity.
    Remove(ProductId),
    Clear,
}
