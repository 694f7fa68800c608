use crate::cart_store::{CartAction, CartError};
use crate::framework::{FrameworkError, StoreClient, StoreHandle};
use crate::model::{Cart, CartItemRequest, ProductId, Username};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the cart store. Every method returns the cart as re-fetched after the call.
#[derive(Clone)]
pub struct CartStoreClient {
    inner: StoreClient<Cart>,
}

impl CartStoreClient {
    pub fn new(inner: StoreClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<Cart> for CartStoreClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_stale::<()>() {
            Ok(((), refresh)) => CartError::Stale(Box::new(Self::map_error(refresh))),
            Err(e) => e
                .downcast_entity::<CartError>()
                .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl CartStoreClient {
    #[instrument(skip(self))]
    pub async fn load(&self, username: &Username) -> Result<Cart, CartError> {
        self.refresh(username.clone()).await
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        username: &Username,
        product_id: ProductId,
        price: f64,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        let item = CartItemRequest::new(product_id, price, quantity);
        self.mutate(username, CartAction::Add(item)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_one(
        &self,
        username: &Username,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        self.mutate(username, CartAction::RemoveOne(product_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        username: &Username,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        self.mutate(username, CartAction::Remove(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, username: &Username) -> Result<Cart, CartError> {
        self.mutate(username, CartAction::Clear).await
    }

    /// Drops the cached cart, e.g. on logout.
    #[instrument(skip(self))]
    pub async fn forget(&self, username: &Username) -> Result<(), CartError> {
        self.evict(username.clone()).await
    }

    async fn mutate(&self, username: &Username, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform(username.clone(), action)
            .await
            .map(|performed| performed.snapshot)
            .map_err(Self::map_error)
    }
}
