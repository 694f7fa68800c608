use super::FormStatus;
use crate::model::{Category, Product, ProductDraft, StagedImage};

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_PRICE: &str = "Price must be a non-negative number";

/// Buffer behind the create and edit product forms.
///
/// The price is kept as typed so a half-entered value survives until submit. A staged
/// image stays local until the product itself has been saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: Category,
    image: Option<StagedImage>,
    pub error: Option<String>,
    pub status: FormStatus,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            description: String::new(),
            category: Category::Shirts,
            image: None,
            error: None,
            status: FormStatus::Idle,
        }
    }
}

impl ProductForm {
    /// Edit buffer pre-filled from `product`.
    pub fn for_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category,
            ..Self::default()
        }
    }

    pub fn stage_image(&mut self, image: StagedImage) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&StagedImage> {
        self.image.as_ref()
    }

    /// `data:` URL for previewing the staged image.
    pub fn image_preview(&self) -> Option<String> {
        self.image.as_ref().map(StagedImage::preview_data_url)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn to_draft(&self) -> Result<ProductDraft, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(NAME_REQUIRED.to_string());
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| INVALID_PRICE.to_string())?;
        Ok(ProductDraft::new(
            name,
            self.description.trim(),
            price,
            self.category,
        ))
    }

    /// Marks the form as submitting and returns what to send, or records the validation
    /// error and returns `None`.
    pub(crate) fn begin_submit(&mut self) -> Option<(ProductDraft, Option<StagedImage>)> {
        match self.to_draft() {
            Ok(draft) => {
                self.error = None;
                self.status = FormStatus::Submitting;
                Some((draft, self.image.clone()))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    pub(crate) fn fail_submit(&mut self, message: &str) {
        self.status = FormStatus::Idle;
        self.error = Some(message.to_string());
    }
}
