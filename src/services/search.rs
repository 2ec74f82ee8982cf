use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use serde::Serialize;
use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
    services::{catalog::MovieClient, selection::SelectionStore},
};

/// Message recorded when a search request fails
pub const SEARCH_ERROR: &str = "Failed to search movies. Please try again.";

/// State behind the search box and its dropdown
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub term: String,
    pub results: Vec<Movie>,
    pub is_searching: bool,
    pub show_results: bool,
    pub error: Option<String>,
}

/// Debounced search-as-you-type driving the selection store
///
/// Each keystroke restarts the debounce timer. Every input change takes a new
/// sequence number, and a search result is committed only while its number is
/// still the latest, so a slow response can never overwrite newer input.
#[derive(Clone)]
pub struct SearchWorkflow {
    state: Arc<RwLock<SearchState>>,
    client: MovieClient,
    store: SelectionStore,
    debounce: Duration,
    min_query_len: usize,
    seq: Arc<AtomicU64>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SearchWorkflow {
    pub fn new(
        client: MovieClient,
        store: SelectionStore,
        debounce: Duration,
        min_query_len: usize,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(SearchState::default())),
            client,
            store,
            debounce,
            min_query_len,
            seq: Arc::new(AtomicU64::new(0)),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Records new input and (re)arms the debounce timer
    pub async fn set_input(&self, term: impl Into<String>) {
        let term = term.into();
        let ticket = self.supersede();
        let searchable = term.trim().chars().count() >= self.min_query_len;

        {
            let mut state = self.state.write().await;
            state.term = term.clone();
            // Any search still in flight was aborted by `supersede`
            state.is_searching = false;
            if !searchable {
                state.results.clear();
                state.show_results = false;
            }
        }

        if !searchable {
            return;
        }

        let workflow = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(workflow.debounce).await;
            workflow.run_search(ticket, term).await;
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    /// Commits a dropdown choice and starts fetching its recommendations
    pub async fn select(&self, movie: Movie) -> JoinHandle<()> {
        let movie_id = movie.id;
        tracing::info!(movie_id = movie_id, title = %movie.title, "Movie selected");

        self.supersede();
        {
            let mut state = self.state.write().await;
            state.term = movie.title.clone();
            state.show_results = false;
            state.is_searching = false;
        }
        self.store.set_selected_movie(Some(movie)).await;

        let store = self.store.clone();
        tokio::spawn(async move { store.get_recommendations(movie_id).await })
    }

    /// Selects a movie from the current results by id
    pub async fn select_by_id(&self, movie_id: MovieId) -> AppResult<JoinHandle<()>> {
        let movie = {
            let state = self.state.read().await;
            state.results.iter().find(|m| m.id == movie_id).cloned()
        };

        match movie {
            Some(movie) => Ok(self.select(movie).await),
            None => Err(AppError::NotFound(format!(
                "Movie {} is not in the current search results",
                movie_id
            ))),
        }
    }

    /// Hides the dropdown; the committed selection is untouched
    pub async fn dismiss(&self) {
        self.state.write().await.show_results = false;
    }

    /// Re-opens the dropdown when there is something to show
    pub async fn focus(&self) {
        let mut state = self.state.write().await;
        if !state.results.is_empty() {
            state.show_results = true;
        }
    }

    /// Empties the search box
    pub async fn clear(&self) {
        self.supersede();
        let mut state = self.state.write().await;
        state.term.clear();
        state.results.clear();
        state.show_results = false;
        state.is_searching = false;
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Invalidates any pending timer or in-flight search, returning the new ticket
    fn supersede(&self) -> u64 {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    async fn run_search(&self, ticket: u64, term: String) {
        if !self.is_current(ticket) {
            return;
        }

        self.state.write().await.is_searching = true;

        let result = self.client.search(&term).await;

        let mut state = self.state.write().await;
        if !self.is_current(ticket) {
            tracing::debug!(query = %term, "Discarding superseded search response");
            return;
        }

        match result {
            Ok(results) => {
                state.results = results;
                state.show_results = true;
                state.error = None;
            }
            Err(e) => {
                tracing::error!(query = %term, error = %e, "Search error");
                state.error = Some(SEARCH_ERROR.to_string());
            }
        }
        state.is_searching = false;
    }
}
