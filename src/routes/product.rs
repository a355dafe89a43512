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
            page_links, page_offset, AvailabilityResponse, NewProduct, ProductListQuery,
            ProductPage, ProductResponse, UpdateProduct, PAGE_SIZE,
        },
        Error, Product,
    },
    AppState,
};

use super::middlewares::manager_guard;

#[derive(OpenApi)]
#[openapi(paths(
    list_products_handler,
    get_product_handler,
    check_availability_handler,
    create_product_handler,
    update_product_handler,
    delete_product_handler
))]
/// Defines the OpenAPI spec for product endpoints
pub struct ProductsApi;

/// Used to group product endpoints together in the OpenAPI documentation
pub const PRODUCT_API_GROUP: &str = "PRODUCT";

const DEFAULT_PREPARATION_TIME: i32 = 15;

/// Builds a router for all the product routes. Reads are open; writes pass
/// through the manager guard.
pub fn product_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let guard = middleware::from_fn_with_state(state.clone(), manager_guard);
    Router::new()
        .route("/", get(list_products_handler))
        .route("/:id", get(get_product_handler))
        .route("/:id/check-availability", get(check_availability_handler))
        .route("/", post(create_product_handler).route_layer(guard.clone()))
        .route(
            "/:id",
            put(update_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler)
                .route_layer(guard),
        )
}

/// List products handler function
#[utoipa::path(
    get,
    path = "/api/products",
    tag = PRODUCT_API_GROUP,
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("category" = Option<i32>, Query, description = "Only products in this category"),
        ("price" = Option<String>, Query, description = "Only products at exactly this price"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
    ),
    responses(
        (status = 200, description = "One page of products, newest first", body = ProductPage),
        (status = 404, description = "Page out of range"),
    )
)]
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPage>, Error> {
    let page = query.page.unwrap_or(1);
    let count = state
        .db
        .count_products(query.category, query.price, query.search.as_deref())
        .await?;
    let offset = page_offset(page, count).ok_or((StatusCode::NOT_FOUND, "Invalid page."))?;

    let products = state
        .db
        .list_products(
            query.category,
            query.price,
            query.search.as_deref(),
            PAGE_SIZE,
            offset,
        )
        .await?;
    let (next, previous) = page_links(page, count);
    Ok(Json(ProductPage {
        count,
        next,
        previous,
        results: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// Get product by ID handler function
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = PRODUCT_API_GROUP,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, Error> {
    let product = state.db.get_product_by_id(id).await?;
    let product = product.ok_or((StatusCode::NOT_FOUND, "Product not found"))?;
    Ok(Json(ProductResponse::from(product)))
}

/// Check availability handler function
#[utoipa::path(
    get,
    path = "/api/products/{id}/check-availability",
    tag = PRODUCT_API_GROUP,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability of the product", body = AvailabilityResponse),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn check_availability_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<AvailabilityResponse>, Error> {
    let product = state.db.get_product_by_id(id).await?;
    let product = product.ok_or((StatusCode::NOT_FOUND, "Product not found"))?;
    Ok(Json(AvailabilityResponse::new(&product)))
}

/// Create product handler function
#[utoipa::path(
    post,
    path = "/api/products",
    tag = PRODUCT_API_GROUP,
    request_body = NewProduct,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Product successfully created", body = ProductResponse),
        (status = 400, description = "Referenced category does not exist"),
        (status = 403, description = "Caller may not modify the catalog"),
    )
)]
pub async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, Error> {
    // Check that the referenced category exists
    if let Some(category_id) = body.category {
        if state.db.get_category_by_id(category_id).await?.is_none() {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Category does not exist",
            ));
        }
    }

    let new_product = Product {
        name: body.name,
        description: body.description,
        price: body.price,
        category_id: body.category,
        is_available: body.is_available.unwrap_or(true),
        preparation_time: body.preparation_time.unwrap_or(DEFAULT_PREPARATION_TIME),
        ..Default::default()
    };

    let product = state.db.create_product(&new_product).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Update product handler function
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = PRODUCT_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the product to update")
    ),
    request_body = UpdateProduct,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Product successfully updated", body = ProductResponse),
        (status = 400, description = "Referenced category does not exist"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProduct>,
) -> Result<Json<ProductResponse>, Error> {
    // Fetch the existing product
    let mut product = if let Some(product) = state.db.get_product_by_id(id).await? {
        product
    } else {
        return Err(Error::new(StatusCode::NOT_FOUND, "Product not found"));
    };

    // Update fields
    if let Some(name) = body.name {
        product.name = name;
    }
    if let Some(description) = body.description {
        product.description = Some(description);
    }
    if let Some(price) = body.price {
        product.price = price;
    }
    if let Some(category_id) = body.category {
        if state.db.get_category_by_id(category_id).await?.is_none() {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Category does not exist",
            ));
        }
        product.category_id = Some(category_id);
    }
    if let Some(is_available) = body.is_available {
        product.is_available = is_available;
    }
    if let Some(preparation_time) = body.preparation_time {
        product.preparation_time = preparation_time;
    }

    let updated_product = state.db.update_product(&product).await?;
    Ok(Json(ProductResponse::from(updated_product)))
}

/// Delete product handler function
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = PRODUCT_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the product to delete")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 204, description = "Product successfully deleted"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    if state.db.delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::new(StatusCode::NOT_FOUND, "Product not found"))
    }
}
