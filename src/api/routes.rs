use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/session", session_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Routes for the discovery session
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_page))
        // Search box
        .route(
            "/search",
            get(handlers::get_search)
                .put(handlers::set_search_input)
                .delete(handlers::clear_search),
        )
        .route("/search/focus", post(handlers::focus_search))
        .route("/search/dismiss", post(handlers::dismiss_search))
        .route("/search/select", post(handlers::select_movie))
        // Recommendation grid
        .route("/recommendations/more", post(handlers::load_more))
        .route("/detail", axum::routing::delete(handlers::close_detail))
        .route("/detail/:id", post(handlers::open_detail))
        .route("/overlay", post(handlers::overlay_event))
}
