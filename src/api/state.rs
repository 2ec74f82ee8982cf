use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::{
        providers::HttpMovieBackend, DiscoveryView, MovieClient, PageScroll, PageView,
        RecommendationGrid, SearchWorkflow, SelectionState, SelectionStore,
    },
};

/// Shared session state
///
/// One discovery session per process: the selection store, the search box, the
/// recommendation grid and the page scroll it may lock.
#[derive(Clone)]
pub struct AppState {
    pub store: SelectionStore,
    pub search: SearchWorkflow,
    pub scroll: PageScroll,
    grid: Arc<RwLock<GridSlot>>,
    page_size: usize,
}

/// Grid built from one generation of the store's recommendation list
pub struct GridSlot {
    generation: u64,
    pub grid: RecommendationGrid,
}

impl AppState {
    /// Creates a session over the given client
    pub fn new(client: MovieClient, config: &Config) -> Self {
        let store = SelectionStore::new(client.clone(), config.clear_recommendations_on_error);
        let search = SearchWorkflow::new(
            client,
            store.clone(),
            config.debounce(),
            config.min_query_len,
        );

        Self {
            store,
            search,
            scroll: PageScroll::new(),
            grid: Arc::new(RwLock::new(GridSlot {
                generation: 0,
                grid: RecommendationGrid::new(Vec::new(), config.page_size),
            })),
            page_size: config.page_size,
        }
    }

    /// Creates a session talking to the HTTP backend at `config.api_url`
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let backend = HttpMovieBackend::new(config.api_url.clone(), config.request_timeout())?;
        Ok(Self::new(MovieClient::new(Arc::new(backend)), config))
    }

    /// Locks the grid, rebuilding it first if the store has fetched since
    ///
    /// Rebuilding drops any open overlay, which releases its scroll lock. So does
    /// any state in which the page hides the grid (loading, error, empty).
    pub async fn grid(&self) -> (SelectionState, RwLockWriteGuard<'_, GridSlot>) {
        let state = self.store.snapshot().await;
        let mut slot = self.grid.write().await;

        if slot.generation != state.generation && !state.is_loading {
            tracing::debug!(
                generation = state.generation,
                items = state.recommendations.len(),
                "Rebuilding recommendation grid"
            );
            slot.generation = state.generation;
            slot.grid = RecommendationGrid::new(state.recommendations.clone(), self.page_size);
        }

        if !Self::shows_grid(&state) && slot.grid.close_detail() {
            tracing::debug!("Grid hidden, closed detail overlay");
        }

        (state, slot)
    }

    /// Locks the grid for a user interaction, rejecting it while the grid is hidden
    pub async fn visible_grid(&self) -> AppResult<RwLockWriteGuard<'_, GridSlot>> {
        let (state, slot) = self.grid().await;
        if Self::shows_grid(&state) {
            Ok(slot)
        } else {
            Err(AppError::NotFound(
                "Recommendation grid is not shown".to_string(),
            ))
        }
    }

    fn shows_grid(state: &SelectionState) -> bool {
        DiscoveryView::from_state(state).is_some_and(|view| view.shows_grid())
    }

    pub async fn page_view(&self) -> PageView {
        let (state, slot) = self.grid().await;
        PageView::build(&state, &slot.grid, self.scroll.status())
    }
}
