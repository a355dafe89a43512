use crate::models::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const AVAILABLE_MESSAGE: &str = "Available for order";
pub const UNAVAILABLE_MESSAGE: &str = "Currently unavailable";

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "9.50")]
    pub price: Decimal,
    pub category: Option<i32>,
    pub is_available: Option<bool>,
    pub preparation_time: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "10.00")]
    pub price: Option<Decimal>,
    pub category: Option<i32>,
    pub is_available: Option<bool>,
    pub preparation_time: Option<i32>,
}

/// The category foreign key is write-only; responses expose the resolved
/// `category_name` instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "9.50")]
    pub price: Decimal,
    pub category_name: Option<String>,
    pub is_available: bool,
    pub preparation_time: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_name: product.category_name,
            is_available: product.is_available,
            preparation_time: product.preparation_time,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub product_id: i32,
    pub product_name: String,
    pub is_available: bool,
    pub message: String,
}

impl AvailabilityResponse {
    pub fn new(product: &Product) -> Self {
        let message = if product.is_available {
            AVAILABLE_MESSAGE
        } else {
            UNAVAILABLE_MESSAGE
        };
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            is_available: product.is_available,
            message: message.to_string(),
        }
    }
}

/// Query string accepted by the product list endpoint: page selection plus
/// the category/price/search filters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    pub category: Option<i32>,
    pub price: Option<Decimal>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coffee() -> Product {
        Product {
            id: 1,
            name: "Coffee".to_string(),
            description: Some("Hot coffee".to_string()),
            price: Decimal::new(250, 2),
            category_id: Some(1),
            category_name: Some("Beverages".to_string()),
            is_available: true,
            preparation_time: 5,
            ..Default::default()
        }
    }

    #[test]
    fn price_serializes_as_a_decimal_string() {
        let value = serde_json::to_value(ProductResponse::from(coffee())).unwrap();
        assert_eq!(value["price"], json!("2.50"));
        assert_eq!(value["category_name"], json!("Beverages"));
    }

    #[test]
    fn response_has_no_raw_category_key() {
        let value = serde_json::to_value(ProductResponse::from(coffee())).unwrap();
        assert!(value.get("category").is_none());
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn available_product_message() {
        let body = AvailabilityResponse::new(&coffee());
        assert_eq!(body.product_id, 1);
        assert_eq!(body.product_name, "Coffee");
        assert!(body.is_available);
        assert_eq!(body.message, "Available for order");
    }

    #[test]
    fn unavailable_product_message() {
        let mut product = coffee();
        product.is_available = false;
        let body = AvailabilityResponse::new(&product);
        assert!(!body.is_available);
        assert_eq!(body.message, "Currently unavailable");
    }

    #[test]
    fn new_product_parses_price_from_a_string() {
        let body: NewProduct =
            serde_json::from_value(json!({"name": "Tea", "price": "1.80"})).unwrap();
        assert_eq!(body.price, Decimal::new(180, 2));
        assert_eq!(body.is_available, None);
        assert_eq!(body.preparation_time, None);
    }
}
