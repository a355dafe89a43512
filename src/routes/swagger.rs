use crate::models::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Bistro Order Management API",
    description = "REST backend for the restaurant catalog, customers and orders",
))]
struct Api;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from other locations in the app, such as the [dto] package
/// and the per-resource route modules
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = Api::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::health::HealthApi::openapi());
    api_docs.merge(super::user::UsersApi::openapi());
    api_docs.merge(super::category::CategoriesApi::openapi());
    api_docs.merge(super::product::ProductsApi::openapi());
    api_docs.merge(super::customer::CustomersApi::openapi());
    api_docs.merge(super::order::OrdersApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
