use crate::model::{Category, Product, ProductDraft, ProductId, StagedImage};
use crate::transport::{ApiClient, ApiError};
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};
use url::Url;

/// Client for the `/api/products` resource.
#[derive(Debug, Clone)]
pub struct ProductService {
    api: ApiClient,
}

impl ProductService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Full listing, in the order the backend returns it.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("Sending request");
        self.api.get_json(&["api", "products"]).await
    }

    /// Filtered listing.
    ///
    /// The backend answers 404 when nothing matches. That is returned as-is; callers treat it
    /// as an empty listing.
    #[instrument(skip(self))]
    pub async fn list_products_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Product>, ApiError> {
        debug!("Sending request");
        self.api
            .get_json(&["api", "products", "category", category.slug()])
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        debug!("Sending request");
        self.api.post_json(&["api", "products"], draft).await
    }

    /// Full replace: every field of `draft` is sent.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, ApiError> {
        debug!("Sending request");
        let id = id.to_string();
        self.api.put_json(&["api", "products", &id], draft).await
    }

    /// Attaches an image as the multipart field `file`.
    #[instrument(skip(self))]
    pub async fn upload_product_image(
        &self,
        id: ProductId,
        image: &StagedImage,
    ) -> Result<Product, ApiError> {
        debug!("Sending request");
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part("file", part);
        let id = id.to_string();
        self.api
            .post_multipart(&["api", "products", "upload-product-image", &id], form)
            .await
    }

    /// Deleting an already deleted id surfaces whatever error the backend returns.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        debug!("Sending request");
        let id = id.to_string();
        self.api.delete(&["api", "products", &id]).await
    }

    /// Where the product's image is served from.
    pub fn image_url(&self, id: ProductId) -> Result<Url, ApiError> {
        let id = id.to_string();
        self.api
            .endpoint(&["api", "products", "uploads", "products", &id])
    }

    #[instrument(skip(self))]
    pub async fn product_image(&self, id: ProductId) -> Result<Vec<u8>, ApiError> {
        debug!("Sending request");
        let id = id.to_string();
        self.api
            .get_bytes(&["api", "products", "uploads", "products", &id])
            .await
    }
}
