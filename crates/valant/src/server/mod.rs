mod error;
mod items;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use valant_core::InventoryService;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub inventory: InventoryService,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

// Item payloads are a handful of short fields.
const ITEM_BODY_LIMIT: usize = 64 * 1024;

pub fn build_router(state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    let shared = Arc::new(state);

    let router = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/{label}", delete(items::delete_item))
        .layer(DefaultBodyLimit::max(ITEM_BODY_LIMIT))
        .layer(TraceLayer::new_for_http());

    let router = match cors_origin {
        // Only reflect the allowed origin when the request's Origin header
        // actually matches, so browsers get a clean CORS rejection otherwise.
        Some(allowed) => router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(
                    move |request_origin: &HeaderValue, _| *request_origin == allowed,
                ))
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::LOCATION]),
        ),
        None => router,
    };

    router.with_state(shared)
}
