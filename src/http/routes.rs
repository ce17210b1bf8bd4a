use super::docs;
use super::handlers;
use super::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api", get(docs::api_doc))
        .route("/api/index", get(docs::api_doc))
        .route(
            "/api/transcript",
            get(handlers::get_transcript).post(handlers::post_transcript),
        )
        .layer(cors)
        .with_state(state)
}
