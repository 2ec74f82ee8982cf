use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, Recommendation},
};

/// Cards revealed initially and per "load more"
pub const DEFAULT_PAGE_SIZE: usize = 8;

const NO_IMAGE_LABEL: &str = "No image available";

// ============================================================================
// Page scroll
// ============================================================================

#[derive(Debug, Default)]
struct ScrollInner {
    suppressed: bool,
    locks: u64,
    restores: u64,
}

/// Body scroll of the page hosting the grid
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    inner: Arc<Mutex<ScrollInner>>,
}

/// Snapshot of `PageScroll` for rendering and diagnostics
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollStatus {
    pub suppressed: bool,
    pub locks: u64,
    pub restores: u64,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses scroll until the returned guard is released or dropped
    pub fn lock(&self) -> ScrollLock {
        if let Ok(mut inner) = self.inner.lock() {
            inner.suppressed = true;
            inner.locks += 1;
        }
        ScrollLock {
            scroll: self.clone(),
            released: false,
        }
    }

    pub fn status(&self) -> ScrollStatus {
        match self.inner.lock() {
            Ok(inner) => ScrollStatus {
                suppressed: inner.suppressed,
                locks: inner.locks,
                restores: inner.restores,
            },
            Err(poisoned) => {
                let inner = poisoned.into_inner();
                ScrollStatus {
                    suppressed: inner.suppressed,
                    locks: inner.locks,
                    restores: inner.restores,
                }
            }
        }
    }

    fn restore(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.suppressed = false;
            inner.restores += 1;
        }
    }
}

/// Scroll suppression held by an open overlay; restores exactly once
#[derive(Debug)]
pub struct ScrollLock {
    scroll: PageScroll,
    released: bool,
}

impl ScrollLock {
    /// Restores scroll; later calls and the eventual drop are no-ops
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.scroll.restore();
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Detail overlay
// ============================================================================

/// Input that can reach an open overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "key")]
pub enum OverlayEvent {
    CloseButton,
    OutsideClick,
    Escape,
    /// Any other key press
    Key(String),
}

impl OverlayEvent {
    pub fn closes(&self) -> bool {
        !matches!(self, OverlayEvent::Key(_))
    }
}

/// Open detail overlay for one recommendation
#[derive(Debug)]
pub struct DetailOverlay {
    recommendation: Recommendation,
    _scroll: ScrollLock,
}

impl DetailOverlay {
    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn view(&self) -> DetailView {
        DetailView::from(&self.recommendation)
    }
}

// ============================================================================
// Views
// ============================================================================

/// What a recommendation card shows
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: MovieId,
    pub title: String,
    pub poster: Option<String>,
    pub poster_label: Option<String>,
    pub rating: Option<String>,
}

impl From<&Recommendation> for CardView {
    fn from(rec: &Recommendation) -> Self {
        let poster = rec.movie.poster_path.clone();
        Self {
            id: rec.id(),
            title: rec.title().to_string(),
            poster_label: poster.is_none().then(|| NO_IMAGE_LABEL.to_string()),
            poster,
            rating: rec
                .vote_average
                .filter(|v| *v > 0.0)
                .map(|v| format!("Rating: {:.1}/10", v)),
        }
    }
}

/// Everything the detail overlay renders
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub id: MovieId,
    pub title: String,
    pub poster: Option<String>,
    pub rating: String,
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    pub genres: Option<String>,
    pub overview: Option<String>,
    pub tmdb_url: String,
    pub imdb_url: String,
}

impl From<&Recommendation> for DetailView {
    fn from(rec: &Recommendation) -> Self {
        Self {
            id: rec.id(),
            title: rec.title().to_string(),
            poster: rec.movie.poster_path.clone(),
            rating: rec
                .vote_average
                .filter(|v| *v > 0.0)
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            release_date: rec.movie.release_date.clone(),
            runtime: rec.runtime.filter(|m| *m > 0).map(|m| format!("{} min", m)),
            genres: (!rec.genres.is_empty()).then(|| rec.genres.join(", ")),
            overview: rec.overview.clone().filter(|o| !o.is_empty()),
            tmdb_url: rec.movie.tmdb_url(),
            imdb_url: rec.movie.imdb_search_url(),
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

/// Client-side paging over an already fetched recommendation list
#[derive(Debug)]
pub struct RecommendationGrid {
    items: Vec<Recommendation>,
    visible: usize,
    page_size: usize,
    detail: Option<DetailOverlay>,
}

impl RecommendationGrid {
    pub fn new(items: Vec<Recommendation>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            visible: page_size.min(items.len()),
            items,
            page_size,
            detail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn visible_items(&self) -> &[Recommendation] {
        &self.items[..self.visible]
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.visible_items().iter().map(CardView::from).collect()
    }

    /// Whether the "load more" control is offered
    pub fn can_load_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// Reveals another page, returning the new visible count
    pub fn load_more(&mut self) -> usize {
        if self.can_load_more() {
            self.visible = (self.visible + self.page_size).min(self.items.len());
        }
        self.visible
    }

    /// Opens the overlay for `movie_id`, locking page scroll while it is open
    pub fn open_detail(&mut self, movie_id: MovieId, scroll: &PageScroll) -> AppResult<&DetailOverlay> {
        let recommendation = self
            .items
            .iter()
            .find(|r| r.id() == movie_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Recommendation {} not found", movie_id)))?;

        // Dropping a previous overlay releases its lock before the new one is taken
        self.detail = None;
        let overlay = self.detail.insert(DetailOverlay {
            recommendation,
            _scroll: scroll.lock(),
        });

        Ok(&*overlay)
    }

    pub fn detail(&self) -> Option<&DetailOverlay> {
        self.detail.as_ref()
    }

    /// Closes the overlay; returns false when it was already closed
    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Routes an overlay event, returning true when it closed the overlay
    pub fn handle_overlay_event(&mut self, event: &OverlayEvent) -> bool {
        if event.closes() {
            self.close_detail()
        } else {
            false
        }
    }
}
