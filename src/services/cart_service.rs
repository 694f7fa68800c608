use crate::model::{Cart, CartItemRequest, ProductId, Username};
use crate::transport::{ApiClient, ApiError};
use tracing::{debug, instrument};

/// Client for the `/api/cart` resource.
///
/// Merging repeated adds, decrementing and totals are all server-side rules; the removal
/// endpoints return no body, so callers re-fetch with [`CartService::get_cart`].
#[derive(Debug, Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, username: &Username) -> Result<Cart, ApiError> {
        debug!("Sending request");
        self.api.get_json(&["api", "cart", username.as_str()]).await
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        username: &Username,
        item: &CartItemRequest,
    ) -> Result<Cart, ApiError> {
        debug!("Sending request");
        self.api
            .post_json(&["api", "cart", "add", username.as_str()], item)
            .await
    }

    /// Decrements the line by one; the backend drops the line when it reaches zero.
    #[instrument(skip(self))]
    pub async fn remove_one(
        &self,
        username: &Username,
        product_id: ProductId,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let product_id = product_id.to_string();
        self.api
            .delete(&["api", "cart", username.as_str(), "item", &product_id, "one"])
            .await
    }

    /// Removes the line regardless of its quantity.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        username: &Username,
        product_id: ProductId,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let product_id = product_id.to_string();
        self.api
            .delete(&["api", "cart", username.as_str(), "item", &product_id])
            .await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, username: &Username) -> Result<(), ApiError> {
        debug!("Sending request");
        self.api
            .delete(&["api", "cart", "clear", username.as_str()])
            .await
    }
}
