use crate::models::{Order, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrder {
    pub customer: Option<i32>,
    pub status: Option<OrderStatus>,
    #[schema(value_type = String, example = "24.00")]
    pub total_amount: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrder {
    pub customer: Option<i32>,
    pub status: Option<OrderStatus>,
    #[schema(value_type = Option<String>, example = "26.50")]
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer: Option<i32>,
    pub status: OrderStatus,
    #[schema(value_type = String, example = "24.00")]
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer: order.customer_id,
            status: order.status,
            total_amount: order.total_amount,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPage {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<OrderResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_defaults_are_left_to_the_handler() {
        let body: NewOrder = serde_json::from_value(json!({"total_amount": "18.00"})).unwrap();
        assert_eq!(body.status, None);
        assert_eq!(body.customer, None);
    }

    #[test]
    fn response_serializes_status_lowercase() {
        let value = serde_json::to_value(OrderResponse::from(Order {
            id: 7,
            status: OrderStatus::Preparing,
            total_amount: Decimal::new(2400, 2),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(value["status"], json!("preparing"));
        assert_eq!(value["total_amount"], json!("24.00"));
    }
}
