mod health;
mod middlewares;
mod swagger;
mod user;
mod category;
mod product;
mod customer;
mod order;
use crate::database;
use health::health_checker_handler;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{AppState, Config};

use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;

pub async fn make_app() -> Result<Router, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
    let config = Config::init();
    info!("Connecting to PostgreSQL...");
    let sqlx_db_connection = database::connect_sqlx(&config.db_url).await;
    info!("Connected to PostgreSQL!");

    let db = database::PostgreDatabase::new(sqlx_db_connection);
    db.migrate().await?;
    let state = Arc::new(AppState { db, config });
    let ret = Router::new()
        .route("/api", get(health_checker_handler))
        .route("/api/health", get(health_checker_handler))
        .nest("/api/user", user::user_routes(state.clone()))
        .nest("/api/categories", category::category_routes(state.clone()))
        .nest("/api/products", product::product_routes(state.clone()))
        .nest("/api/customers", customer::customer_routes(state.clone()))
        .nest("/api/orders", order::order_routes(state.clone()))
        .merge(swagger::build_documentation())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    Ok(ret)
}
