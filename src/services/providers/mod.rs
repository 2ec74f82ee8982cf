//! Recommendation backend abstraction
//!
//! The backend owns the movie catalogue and the similarity model. This crate only
//! consumes it: title search, recommendations for one movie, and a per-movie poster
//! lookup. Normalization into local records happens in `MovieClient`.
use crate::{
    error::AppResult,
    models::{MovieId, RecommendationHit, SearchHit},
};

pub mod http;

pub use http::HttpMovieBackend;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieBackend: Send + Sync {
    /// Search the catalogue by title fragment
    async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchHit>>;

    /// Movies similar to the given one, most similar first
    async fn fetch_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<RecommendationHit>>;

    /// Poster URL for a movie, `None` when the backend has none
    async fn fetch_poster(&self, movie_id: MovieId) -> AppResult<Option<String>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
