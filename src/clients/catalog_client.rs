use crate::catalog_store::{
    Catalog, CatalogAction, CatalogActionResult, CatalogError, CatalogFilter, Saved,
};
use crate::framework::{FrameworkError, Performed, StoreClient, StoreHandle};
use crate::model::{ProductDraft, ProductId, StagedImage};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the catalog store.
///
/// Mutations take the filter the caller is showing; that listing is what comes back,
/// re-fetched after the change.
#[derive(Clone)]
pub struct CatalogStoreClient {
    inner: StoreClient<Catalog>,
}

impl CatalogStoreClient {
    pub fn new(inner: StoreClient<Catalog>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreHandle<Catalog> for CatalogStoreClient {
    type Error = CatalogError;

    fn inner(&self) -> &StoreClient<Catalog> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_stale::<CatalogActionResult>() {
            Ok((result, refresh)) => CatalogError::Stale {
                result,
                error: Box::new(Self::map_error(refresh)),
            },
            Err(e) => e
                .downcast_entity::<CatalogError>()
                .unwrap_or_else(|e| CatalogError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl CatalogStoreClient {
    /// A category with no products loads as an empty catalog.
    #[instrument(skip(self))]
    pub async fn load(&self, filter: CatalogFilter) -> Result<Catalog, CatalogError> {
        self.refresh(filter).await
    }

    /// Saves a new product, then attaches `image` when one is staged.
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        filter: CatalogFilter,
        draft: ProductDraft,
        image: Option<StagedImage>,
    ) -> Result<(Saved, Catalog), CatalogError> {
        let performed = self
            .perform(filter, CatalogAction::Create { draft, image })
            .await?;
        match performed.result {
            CatalogActionResult::Saved(saved) => Ok((saved, performed.snapshot)),
            other => Err(CatalogError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Replaces every field of product `id`, then attaches `image` when one is staged.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        filter: CatalogFilter,
        id: ProductId,
        draft: ProductDraft,
        image: Option<StagedImage>,
    ) -> Result<(Saved, Catalog), CatalogError> {
        let performed = self
            .perform(filter, CatalogAction::Update { id, draft, image })
            .await?;
        match performed.result {
            CatalogActionResult::Saved(saved) => Ok((saved, performed.snapshot)),
            other => Err(CatalogError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(
        &self,
        filter: CatalogFilter,
        id: ProductId,
    ) -> Result<Catalog, CatalogError> {
        let performed = self.perform(filter, CatalogAction::Delete(id)).await?;
        match performed.result {
            CatalogActionResult::Deleted(_) => Ok(performed.snapshot),
            other => Err(CatalogError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    async fn perform(
        &self,
        filter: CatalogFilter,
        action: CatalogAction,
    ) -> Result<Performed<Catalog>, CatalogError> {
        debug!("Sending request");
        self.inner
            .perform(filter, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockStore;
    use crate::model::{Category, Product};
    use crate::transport::ApiError;

    fn jersey() -> Product {
        Product {
            id: ProductId(1),
            name: "Jersey".into(),
            description: String::new(),
            price: 20.0,
            category: Category::Shirts,
        }
    }

    #[tokio::test]
    async fn create_returns_the_saved_product_and_refreshed_listing() {
        let mut mock = MockStore::<Catalog>::new();
        let listing = Catalog {
            filter: CatalogFilter::All,
            products: vec![jersey()],
        };
        mock.expect_perform(CatalogFilter::All).return_ok(
            CatalogActionResult::Saved(Saved {
                product: jersey(),
                image_error: Some("upload rejected".into()),
            }),
            listing.clone(),
        );

        let catalog = CatalogStoreClient::new(mock.client());
        let draft = ProductDraft::from(&jersey());
        let (saved, refreshed) = catalog
            .create_product(CatalogFilter::All, draft, None)
            .await
            .unwrap();

        assert!(saved.is_partial());
        assert_eq!(refreshed, listing);
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_result_is_an_error() {
        let mut mock = MockStore::<Catalog>::new();
        mock.expect_perform(CatalogFilter::All).return_ok(
            CatalogActionResult::Deleted(ProductId(1)),
            Catalog {
                filter: CatalogFilter::All,
                products: vec![],
            },
        );

        let catalog = CatalogStoreClient::new(mock.client());
        let err = catalog
            .update_product(CatalogFilter::All, ProductId(1), ProductDraft::from(&jersey()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedResult(_)));
    }

    #[tokio::test]
    async fn create_that_could_not_be_reloaded_keeps_the_saved_product() {
        let mut mock = MockStore::<Catalog>::new();
        mock.expect_perform(CatalogFilter::All)
            .return_err(FrameworkError::Stale {
                result: Box::new(CatalogActionResult::Saved(Saved {
                    product: jersey(),
                    image_error: None,
                })),
                error: Box::new(CatalogError::Api(ApiError::Status {
                    status: 500,
                    body: String::new(),
                })),
            });

        let catalog = CatalogStoreClient::new(mock.client());
        let err = catalog
            .create_product(CatalogFilter::All, ProductDraft::from(&jersey()), None)
            .await
            .unwrap_err();

        match err {
            CatalogError::Stale {
                result: CatalogActionResult::Saved(saved),
                error,
            } => {
                assert_eq!(saved.product, jersey());
                assert!(matches!(*error, CatalogError::Api(ApiError::Status { status: 500, .. })));
            }
            other => panic!("expected a stale save, got {other:?}"),
        }
        mock.verify();
    }
}
