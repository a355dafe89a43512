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
            page_links, page_offset, CustomerPage, CustomerResponse, NewCustomer, PageQuery,
            UpdateCustomer, PAGE_SIZE,
        },
        Customer, Error,
    },
    AppState,
};

use super::middlewares::manager_guard;

#[derive(OpenApi)]
#[openapi(paths(
    list_customers_handler,
    get_customer_handler,
    create_customer_handler,
    update_customer_handler,
    delete_customer_handler
))]
/// Defines the OpenAPI spec for customer endpoints
pub struct CustomersApi;

/// Used to group customer endpoints together in the OpenAPI documentation
pub const CUSTOMER_API_GROUP: &str = "CUSTOMER";

/// Builds a router for all the customer routes. Reads are open; writes pass
/// through the manager guard.
pub fn customer_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let guard = middleware::from_fn_with_state(state.clone(), manager_guard);
    Router::new()
        .route("/", get(list_customers_handler))
        .route("/:id", get(get_customer_handler))
        .route("/", post(create_customer_handler).route_layer(guard.clone()))
        .route(
            "/:id",
            put(update_customer_handler)
                .patch(update_customer_handler)
                .delete(delete_customer_handler)
                .route_layer(guard),
        )
}

/// List customers handler function
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = CUSTOMER_API_GROUP,
    params(
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "One page of customers", body = CustomerPage),
        (status = 404, description = "Page out of range"),
    )
)]
pub async fn list_customers_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CustomerPage>, Error> {
    let page = query.page.unwrap_or(1);
    let count = state.db.count_customers().await?;
    let offset = page_offset(page, count).ok_or((StatusCode::NOT_FOUND, "Invalid page."))?;

    let customers = state.db.list_customers(PAGE_SIZE, offset).await?;
    let (next, previous) = page_links(page, count);
    Ok(Json(CustomerPage {
        count,
        next,
        previous,
        results: customers.into_iter().map(CustomerResponse::from).collect(),
    }))
}

/// Get customer by ID handler function
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = CUSTOMER_API_GROUP,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    )
)]
pub async fn get_customer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, Error> {
    let customer = state.db.get_customer_by_id(id).await?;
    let customer = customer.ok_or((StatusCode::NOT_FOUND, "Customer not found"))?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// Create customer handler function
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = CUSTOMER_API_GROUP,
    request_body = NewCustomer,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Customer successfully created", body = CustomerResponse),
        (status = 403, description = "Caller may not modify customers"),
    )
)]
pub async fn create_customer_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCustomer>,
) -> Result<impl IntoResponse, Error> {
    let new_customer = Customer {
        name: body.name,
        email: body.email,
        phone_number: body.phone_number,
        address: body.address,
        ..Default::default()
    };

    let customer = state.db.create_customer(&new_customer).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// Update customer handler function
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = CUSTOMER_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the customer to update")
    ),
    request_body = UpdateCustomer,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Customer successfully updated", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    )
)]
pub async fn update_customer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCustomer>,
) -> Result<Json<CustomerResponse>, Error> {
    // Fetch the existing customer
    let mut customer = if let Some(customer) = state.db.get_customer_by_id(id).await? {
        customer
    } else {
        return Err(Error::new(StatusCode::NOT_FOUND, "Customer not found"));
    };

    // Update fields
    if let Some(name) = body.name {
        customer.name = name;
    }
    if let Some(email) = body.email {
        customer.email = email;
    }
    if let Some(phone_number) = body.phone_number {
        customer.phone_number = phone_number;
    }
    if let Some(address) = body.address {
        customer.address = address;
    }

    let updated_customer = state.db.update_customer(&customer).await?;
    Ok(Json(CustomerResponse::from(updated_customer)))
}

/// Delete customer handler function
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = CUSTOMER_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the customer to delete")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 204, description = "Customer successfully deleted"),
        (status = 404, description = "Customer not found"),
    )
)]
pub async fn delete_customer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    if state.db.delete_customer(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::new(StatusCode::NOT_FOUND, "Customer not found"))
    }
}
