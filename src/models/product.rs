use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu item. `category_name` is not a column on the `product` table; every
/// select joins the category so responses can carry the resolved name.
#[derive(Debug, Default, Deserialize, Serialize, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub is_available: bool,
    pub preparation_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
