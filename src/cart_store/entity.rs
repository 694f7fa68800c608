//! [`RemoteEntity`] implementation for [`Cart`].

use super::{CartAction, CartError};
use crate::framework::RemoteEntity;
use crate::model::{Cart, Username};
use crate::services::CartService;
use async_trait::async_trait;

#[async_trait]
impl RemoteEntity for Cart {
    type Key = Username;
    type Action = CartAction;
    type ActionResult = ();
    type Context = CartService;
    type Error = CartError;

    /// The backend creates an empty cart on first access, so this never 404s for a user.
    async fn fetch(username: &Username, carts: &CartService) -> Result<Self, CartError> {
        Ok(carts.get_cart(username).await?)
    }

    async fn apply(
        username: &Username,
        action: CartAction,
        carts: &CartService,
    ) -> Result<(), CartError> {
        match action {
            CartAction::Add(item) => {
                // The returned cart is discarded; the store re-fetches anyway.
                carts.add_item(username, &item).await?;
            }
            CartAction::RemoveOne(product_id) => carts.remove_one(username, product_id).await?,
            CartAction::Remove(product_id) => carts.remove_item(username, product_id).await?,
            CartAction::Clear => carts.clear(username).await?,
        }
        Ok(())
    }
}
