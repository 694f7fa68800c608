//! Cart snapshots. Line totals and aggregates are computed by the backend and displayed as-is.

use crate::model::{ProductId, Username};
use serde::{Deserialize, Serialize};

/// One cart line, denormalized by the backend at response time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(rename = "productPrice")]
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(rename = "totalItemPrice")]
    pub line_total: f64,
}

/// The authoritative cart for one user. Created server-side on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: Username,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub total_items: u32,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// Body of `POST /api/cart/add/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItemRequest {
    #[serde(rename = "productCartId")]
    pub product_id: ProductId,
    #[serde(rename = "productPrice")]
    pub price: f64,
    pub quantity: u32,
}

impl CartItemRequest {
    pub fn new(product_id: ProductId, price: f64, quantity: u32) -> Self {
        Self {
            product_id,
            price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_reads_backend_field_names() {
        let json = r#"{
            "id": 7,
            "username": "alice",
            "totalPrice": 40.0,
            "totalItems": 2,
            "items": [{
                "productId": 3,
                "productName": "Jersey",
                "productPrice": 20.0,
                "totalItemPrice": 40.0,
                "quantity": 2
            }]
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.username.as_str(), "alice");
        assert_eq!(cart.total_items, 2);
        let line = cart.line(ProductId(3)).unwrap();
        assert_eq!(line.unit_price, 20.0);
        assert_eq!(line.line_total, 40.0);
        assert_eq!(line.id, None);
    }

    #[test]
    fn add_request_uses_backend_field_names() {
        let body = serde_json::to_value(CartItemRequest::new(ProductId(3), 20.0, 1)).unwrap();
        assert_eq!(body["productCartId"], 3);
        assert_eq!(body["productPrice"], 20.0);
        assert_eq!(body["quantity"], 1);
    }
}
