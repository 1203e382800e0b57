use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod account;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod orders;
pub mod quotes;
pub mod state;

pub use state::{AppState, Clock};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(account::API_KEY_HEADER),
        ]);

    Router::new()
        .route("/health", get(health))
        .merge(catalog::routes())
        .merge(quotes::routes())
        .merge(orders::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
