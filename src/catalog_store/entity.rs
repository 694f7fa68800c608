//! The product listing as a store entity.

use super::{CatalogAction, CatalogActionResult, CatalogError, Saved};
use crate::framework::RemoteEntity;
use crate::model::{Category, Product, ProductId, StagedImage};
use crate::services::ProductService;
use async_trait::async_trait;
use std::fmt::Display;
use tracing::warn;

/// Which listing a page is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CatalogFilter {
    #[default]
    All,
    Category(Category),
}

impl From<Option<Category>> for CatalogFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CatalogFilter::All, CatalogFilter::Category)
    }
}

impl CatalogFilter {
    pub fn category(&self) -> Option<Category> {
        match self {
            CatalogFilter::All => None,
            CatalogFilter::Category(category) => Some(*category),
        }
    }
}

impl Display for CatalogFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFilter::All => f.write_str("all"),
            CatalogFilter::Category(category) => write!(f, "category:{category}"),
        }
    }
}

/// One listing, in the order the backend returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub filter: CatalogFilter,
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[async_trait]
impl RemoteEntity for Catalog {
    type Key = CatalogFilter;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = ProductService;
    type Error = CatalogError;

    async fn fetch(filter: &CatalogFilter, products: &ProductService) -> Result<Self, CatalogError> {
        let listing = match filter {
            CatalogFilter::All => products.list_products().await?,
            CatalogFilter::Category(category) => {
                match products.list_products_by_category(*category).await {
                    Ok(listing) => listing,
                    // No matches is reported as 404; that is an empty listing, not a failure.
                    Err(e) if e.is_not_found() => Vec::new(),
                    Err(e) => return Err(e.into()),
                }
            }
        };
        Ok(Catalog {
            filter: *filter,
            products: listing,
        })
    }

    async fn apply(
        _filter: &CatalogFilter,
        action: CatalogAction,
        products: &ProductService,
    ) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::Create { draft, image } => {
                let product = products.create_product(&draft).await?;
                Ok(CatalogActionResult::Saved(
                    attach_image(products, product, image).await,
                ))
            }
            CatalogAction::Update { id, draft, image } => {
                let product = products.update_product(id, &draft).await?;
                Ok(CatalogActionResult::Saved(
                    attach_image(products, product, image).await,
                ))
            }
            CatalogAction::Delete(id) => {
                products.delete_product(id).await?;
                Ok(CatalogActionResult::Deleted(id))
            }
        }
    }

    fn invalidates_siblings() -> bool {
        true
    }
}

/// Second phase of a save. The record is already stored; a failed upload leaves it
/// without an image.
async fn attach_image(
    products: &ProductService,
    product: Product,
    image: Option<StagedImage>,
) -> Saved {
    let Some(image) = image else {
        return Saved {
            product,
            image_error: None,
        };
    };
    match products.upload_product_image(product.id, &image).await {
        Ok(updated) => Saved {
            product: updated,
            image_error: None,
        },
        Err(e) => {
            warn!(product_id = %product.id, error = %e, "Image upload failed");
            Saved {
                product,
                image_error: Some(e.to_string()),
            }
        }
    }
}
