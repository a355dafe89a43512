use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{
            page_links, page_offset, NewOrder, OrderPage, OrderResponse, PageQuery, UpdateOrder,
            PAGE_SIZE,
        },
        Error, Order,
    },
    AppState,
};

use super::middlewares::manager_guard;

#[derive(OpenApi)]
#[openapi(paths(
    list_orders_handler,
    get_order_handler,
    create_order_handler,
    update_order_handler,
    delete_order_handler
))]
/// Defines the OpenAPI spec for order endpoints
pub struct OrdersApi;

/// Used to group order endpoints together in the OpenAPI documentation
pub const ORDER_API_GROUP: &str = "ORDER";

/// Builds a router for all the order routes. Reads are open; writes pass
/// through the manager guard.
pub fn order_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let guard = middleware::from_fn_with_state(state.clone(), manager_guard);
    Router::new()
        .route("/", get(list_orders_handler))
        .route("/:id", get(get_order_handler))
        .route("/", post(create_order_handler).route_layer(guard.clone()))
        .route(
            "/:id",
            put(update_order_handler)
                .patch(update_order_handler)
                .delete(delete_order_handler)
                .route_layer(guard),
        )
}

/// List orders handler function
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_API_GROUP,
    params(
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "One page of orders, newest first", body = OrderPage),
        (status = 404, description = "Page out of range"),
    )
)]
pub async fn list_orders_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<OrderPage>, Error> {
    let page = query.page.unwrap_or(1);
    let count = state.db.count_orders().await?;
    let offset = page_offset(page, count).ok_or((StatusCode::NOT_FOUND, "Invalid page."))?;

    let orders = state.db.list_orders(PAGE_SIZE, offset).await?;
    let (next, previous) = page_links(page, count);
    Ok(Json(OrderPage {
        count,
        next,
        previous,
        results: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

/// Get order by ID handler function
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_API_GROUP,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    )
)]
pub async fn get_order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, Error> {
    let order = state.db.get_order_by_id(id).await?;
    let order = order.ok_or((StatusCode::NOT_FOUND, "Order not found"))?;
    Ok(Json(OrderResponse::from(order)))
}

/// Create order handler function
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_API_GROUP,
    request_body = NewOrder,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Order successfully created", body = OrderResponse),
        (status = 400, description = "Referenced customer does not exist"),
        (status = 403, description = "Caller may not create orders"),
    )
)]
pub async fn create_order_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewOrder>,
) -> Result<impl IntoResponse, Error> {
    // Check that the referenced customer exists
    if let Some(customer_id) = body.customer {
        if state.db.get_customer_by_id(customer_id).await?.is_none() {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Customer does not exist",
            ));
        }
    }

    let new_order = Order {
        customer_id: body.customer,
        status: body.status.unwrap_or_default(),
        total_amount: body.total_amount,
        notes: body.notes,
        ..Default::default()
    };

    let order = state.db.create_order(&new_order).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// Update order handler function
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = ORDER_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the order to update")
    ),
    request_body = UpdateOrder,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Order successfully updated", body = OrderResponse),
        (status = 400, description = "Referenced customer does not exist"),
        (status = 404, description = "Order not found"),
    )
)]
pub async fn update_order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateOrder>,
) -> Result<Json<OrderResponse>, Error> {
    // Fetch the existing order
    let mut order = if let Some(order) = state.db.get_order_by_id(id).await? {
        order
    } else {
        return Err(Error::new(StatusCode::NOT_FOUND, "Order not found"));
    };

    // Update fields
    if let Some(customer_id) = body.customer {
        if state.db.get_customer_by_id(customer_id).await?.is_none() {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Customer does not exist",
            ));
        }
        order.customer_id = Some(customer_id);
    }
    if let Some(status) = body.status {
        order.status = status;
    }
    if let Some(total_amount) = body.total_amount {
        order.total_amount = total_amount;
    }
    if let Some(notes) = body.notes {
        order.notes = Some(notes);
    }

    let updated_order = state.db.update_order(&order).await?;
    Ok(Json(OrderResponse::from(updated_order)))
}

/// Delete order handler function
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = ORDER_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the order to delete")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 204, description = "Order successfully deleted"),
        (status = 404, description = "Order not found"),
    )
)]
pub async fn delete_order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    if state.db.delete_order(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::new(StatusCode::NOT_FOUND, "Order not found"))
    }
}
