/// Represents a product in the catalog as returned by the backend.
///
/// # Entity Store
/// Collections of products are held by the catalog store
/// ([`Catalog`](crate::catalog_store::Catalog)), which re-fetches the whole listing after
/// every mutation instead of patching it locally.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products, assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of product categories. The wire values are the shop's own slugs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "camisetas")]
    Shirts,
    #[serde(rename = "pantalones")]
    Pants,
    #[serde(rename = "calzado")]
    Footwear,
    #[serde(rename = "mas")]
    Other,
    /// No category chosen. Unknown slugs from the backend also land here.
    #[default]
    #[serde(rename = "", other)]
    Unset,
}

impl Category {
    /// Every selectable category, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Shirts,
        Category::Pants,
        Category::Footwear,
        Category::Other,
    ];

    /// The slug used in request bodies and in `/api/products/category/{category}`.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Shirts => "camisetas",
            Category::Pants => "pantalones",
            Category::Footwear => "calzado",
            Category::Other => "mas",
            Category::Unset => "",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

fn category_or_unset<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Category>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, deserialize_with = "category_or_unset")]
    pub category: Category,
}

/// Payload for creating or fully replacing a product. Every field is sent on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            category,
        }
    }

    /// True when `product` carries exactly this draft's fields.
    pub fn matches(&self, product: &Product) -> bool {
        product.name == self.name
            && product.description == self.description
            && product.price == self.price
            && product.category == self.category
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft::new(
            product.name.clone(),
            product.description.clone(),
            product.price,
            product.category,
        )
    }
}
