//! Product mutations and their results.
//!
//! Create and update are two-phase: the record is saved first, then the staged image (if any)
//! is uploaded. An upload failure does not undo the save; it is reported in
//! [`Saved::image_error`] so the page can show a partial success.

use crate::model::{Product, ProductDraft, ProductId, StagedImage};

#[derive(Debug, Clone)]
pub enum CatalogAction {
    Create {
        draft: ProductDraft,
        image: Option<StagedImage>,
    },
    Update {
        id: ProductId,
        draft: ProductDraft,
        image: Option<StagedImage>,
    },
    Delete(ProductId),
}

/// A product record that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub product: Product,
    /// Set when the record was saved but attaching its image failed.
    pub image_error: Option<String>,
}

impl Saved {
    pub fn is_partial(&self) -> bool {
        self.image_error.is_some()
    }
}

/// Results from CatalogActions - variants match the action kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogActionResult {
    /// From `Create` and `Update`.
    Saved(Saved),
    /// From `Delete`.
    Deleted(ProductId),
}
