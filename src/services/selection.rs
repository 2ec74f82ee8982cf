use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{Movie, MovieId, Recommendation},
    services::catalog::MovieClient,
};

/// Message shown when a recommendations fetch fails
pub const RECOMMENDATIONS_ERROR: &str = "Failed to fetch recommendations. Please try again.";

/// Selected movie plus the recommendations fetched for it
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_movie: Option<Movie>,
    pub recommendations: Vec<Recommendation>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped by every fetch; only the latest fetch may write its result
    pub generation: u64,
}

/// Session-scoped selection store
///
/// All writes go through `set_selected_movie` and `get_recommendations`.
#[derive(Clone)]
pub struct SelectionStore {
    inner: Arc<RwLock<SelectionState>>,
    client: MovieClient,
    clear_on_error: bool,
}

impl SelectionStore {
    pub fn new(client: MovieClient, clear_on_error: bool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SelectionState::default())),
            client,
            clear_on_error,
        }
    }

    /// Plain assignment; the current recommendation list is left alone
    pub async fn set_selected_movie(&self, movie: Option<Movie>) {
        let mut state = self.inner.write().await;
        state.selected_movie = movie;
    }

    /// Fetches recommendations for `movie_id` into the store
    ///
    /// A response that arrives after a newer call has started is dropped, so the
    /// last requested movie wins regardless of network ordering.
    pub async fn get_recommendations(&self, movie_id: MovieId) {
        let ticket = {
            let mut state = self.inner.write().await;
            state.generation += 1;
            state.is_loading = true;
            state.error = None;
            state.generation
        };

        let result = self.client.recommendations(movie_id).await;

        let mut state = self.inner.write().await;
        if state.generation != ticket {
            tracing::debug!(
                movie_id = movie_id,
                ticket = ticket,
                latest = state.generation,
                "Discarding superseded recommendations response"
            );
            return;
        }

        match result {
            Ok(recommendations) => {
                state.recommendations = recommendations;
            }
            Err(e) => {
                tracing::error!(movie_id = movie_id, error = %e, "Recommendations request failed");
                state.error = Some(RECOMMENDATIONS_ERROR.to_string());
                if self.clear_on_error {
                    state.recommendations.clear();
                }
            }
        }
        state.is_loading = false;
    }

    pub async fn snapshot(&self) -> SelectionState {
        self.inner.read().await.clone()
    }
}
