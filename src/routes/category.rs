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
            page_links, page_offset, CategoryPage, CategoryResponse, NewCategory, PageQuery,
            UpdateCategory, PAGE_SIZE,
        },
        Category, Error,
    },
    AppState,
};

use super::middlewares::manager_guard;

#[derive(OpenApi)]
#[openapi(paths(
    list_categories_handler,
    get_category_handler,
    create_category_handler,
    update_category_handler,
    delete_category_handler
))]
/// Defines the OpenAPI spec for category endpoints
pub struct CategoriesApi;

/// Used to group category endpoints together in the OpenAPI documentation
pub const CATEGORY_API_GROUP: &str = "CATEGORY";

/// Builds a router for all the category routes. Reads are open; writes pass
/// through the manager guard.
pub fn category_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let guard = middleware::from_fn_with_state(state.clone(), manager_guard);
    Router::new()
        .route("/", get(list_categories_handler))
        .route("/:id", get(get_category_handler))
        .route("/", post(create_category_handler).route_layer(guard.clone()))
        .route(
            "/:id",
            put(update_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler)
                .route_layer(guard),
        )
}

/// List categories handler function
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_API_GROUP,
    params(
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "One page of categories", body = CategoryPage),
        (status = 404, description = "Page out of range"),
    )
)]
pub async fn list_categories_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryPage>, Error> {
    let page = query.page.unwrap_or(1);
    let count = state.db.count_categories().await?;
    let offset = page_offset(page, count).ok_or((StatusCode::NOT_FOUND, "Invalid page."))?;

    let categories = state.db.list_categories(PAGE_SIZE, offset).await?;
    let (next, previous) = page_links(page, count);
    Ok(Json(CategoryPage {
        count,
        next,
        previous,
        results: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

/// Get category by ID handler function
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = CATEGORY_API_GROUP,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn get_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, Error> {
    let category = state.db.get_category_by_id(id).await?;
    let category = category.ok_or((StatusCode::NOT_FOUND, "Category not found"))?;
    Ok(Json(CategoryResponse::from(category)))
}

/// Create category handler function
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_API_GROUP,
    request_body = NewCategory,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 201, description = "Category successfully created", body = CategoryResponse),
        (status = 403, description = "Caller may not modify the catalog"),
    )
)]
pub async fn create_category_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCategory>,
) -> Result<impl IntoResponse, Error> {
    let new_category = Category {
        name: body.name,
        description: body.description,
        is_active: body.is_active.unwrap_or(true),
        ..Default::default()
    };

    let category = state.db.create_category(&new_category).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Update category handler function
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = CATEGORY_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the category to update")
    ),
    request_body = UpdateCategory,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Category successfully updated", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn update_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCategory>,
) -> Result<Json<CategoryResponse>, Error> {
    // Fetch the existing category
    let mut category = if let Some(category) = state.db.get_category_by_id(id).await? {
        category
    } else {
        return Err(Error::new(StatusCode::NOT_FOUND, "Category not found"));
    };

    // Update fields
    if let Some(name) = body.name {
        category.name = name;
    }
    if let Some(description) = body.description {
        category.description = description;
    }
    if let Some(is_active) = body.is_active {
        category.is_active = is_active;
    }

    let updated_category = state.db.update_category(&category).await?;
    Ok(Json(CategoryResponse::from(updated_category)))
}

/// Delete category handler function
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = CATEGORY_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the category to delete")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 204, description = "Category successfully deleted"),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn delete_category_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    if state.db.delete_category(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::new(StatusCode::NOT_FOUND, "Category not found"))
    }
}
