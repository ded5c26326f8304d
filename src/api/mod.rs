//! HTTP surface: router, handlers, state, and error envelope

/// Error envelope shared by all routes.
pub mod error;
/// Route handlers.
pub mod routes;
/// Shared application state.
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::MAX_UPLOAD_BYTES;

/// Assemble the full application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/voice/translate", post(routes::voice_translate))
        .route("/speech/synthesize", post(routes::synthesize_speech))
        .route("/vision/landmarks", post(routes::detect_landmarks))
        .route("/vision/ocr", post(routes::extract_text))
        .route("/images/analyze", post(routes::analyze_image))
        .route("/itinerary", post(routes::generate_itinerary))
        .route("/sentiment", post(routes::analyze_sentiment))
        .route("/history/{user_id}", get(routes::history))
        // Base64 media payloads need more headroom than the default limit
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
