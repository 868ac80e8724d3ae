pub mod auth;
pub mod cooks;
pub mod dishes;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use service::assets::MAX_UPLOAD_BYTES;

use crate::state::AppState;

async fn test(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Server is running!",
        "timestamp": Utc::now(),
        "storage": state.store.mode().as_str(),
    }))
}

/// Build the full application router: API routes, static asset serving and
/// the shared middleware stack.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let assets = ServeDir::new(state.assets.root());

    Router::new()
        .route("/api/test", get(test))
        .route("/api/cooks", get(cooks::list_cooks))
        .route("/api/cooks/:email", get(cooks::get_cook))
        .route("/api/cooks/:email/dishes", get(cooks::get_cook_dishes))
        .route("/api/dishes/add", post(dishes::add_dish))
        .route("/api/dishes/bulk-upload-images", post(dishes::bulk_upload_images))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .nest_service("/static", assets)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
