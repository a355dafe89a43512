use crate::models::dto::Message;
use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(paths(
    health_checker_handler
))]
/// Defines the OpenAPI spec for the health endpoint
pub struct HealthApi;
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "HEALTH",
    responses(
        (status = OK, description = "Success", body = Message)
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(Message::new(
        "OK, I'm alive!",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_check_responds_ok() {
        let response = health_checker_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
