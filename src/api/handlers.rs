use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::MovieId,
    services::{OverlayEvent, PageView, SearchState},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchInputRequest {
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectMovieRequest {
    pub movie_id: MovieId,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current page: recommendations section, visible cards and detail overlay
pub async fn get_page(State(state): State<AppState>) -> Json<PageView> {
    Json(state.page_view().await)
}

/// Current search box state
pub async fn get_search(State(state): State<AppState>) -> Json<SearchState> {
    Json(state.search.snapshot().await)
}

/// Keystroke in the search box; the search itself fires after the debounce period
pub async fn set_search_input(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchInputRequest>,
) -> (StatusCode, Json<SearchState>) {
    tracing::debug!(request_id = %request_id, term = %request.term, "Search input");

    state.search.set_input(request.term).await;
    (StatusCode::ACCEPTED, Json(state.search.snapshot().await))
}

/// Clear button
pub async fn clear_search(State(state): State<AppState>) -> Json<SearchState> {
    state.search.clear().await;
    Json(state.search.snapshot().await)
}

/// Search box regained focus
pub async fn focus_search(State(state): State<AppState>) -> Json<SearchState> {
    state.search.focus().await;
    Json(state.search.snapshot().await)
}

/// Click outside the search box and dropdown
pub async fn dismiss_search(State(state): State<AppState>) -> Json<SearchState> {
    state.search.dismiss().await;
    Json(state.search.snapshot().await)
}

/// Dropdown choice; recommendations load in the background
pub async fn select_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SelectMovieRequest>,
) -> AppResult<(StatusCode, Json<SearchState>)> {
    tracing::info!(
        request_id = %request_id,
        movie_id = request.movie_id,
        "Selecting movie"
    );

    state.search.select_by_id(request.movie_id).await?;
    Ok((StatusCode::ACCEPTED, Json(state.search.snapshot().await)))
}

/// "Load more" control; rejected while the grid is hidden
pub async fn load_more(State(state): State<AppState>) -> AppResult<Json<PageView>> {
    {
        let mut slot = state.visible_grid().await?;
        slot.grid.load_more();
    }
    Ok(Json(state.page_view().await))
}

/// Card click; rejected while the grid is hidden
pub async fn open_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<PageView>> {
    {
        let mut slot = state.visible_grid().await?;
        slot.grid.open_detail(movie_id, &state.scroll)?;
    }
    Ok(Json(state.page_view().await))
}

/// Key press or click reaching the open overlay
pub async fn overlay_event(
    State(state): State<AppState>,
    Json(event): Json<OverlayEvent>,
) -> Json<PageView> {
    {
        // A hidden grid has no overlay, so the event falls through
        if let Ok(mut slot) = state.visible_grid().await {
            let closed = slot.grid.handle_overlay_event(&event);
            tracing::debug!(event = ?event, closed = closed, "Overlay event");
        }
    }
    Json(state.page_view().await)
}

/// Overlay close control
pub async fn close_detail(State(state): State<AppState>) -> Json<PageView> {
    {
        let (_, mut slot) = state.grid().await;
        slot.grid.close_detail();
    }
    Json(state.page_view().await)
}
