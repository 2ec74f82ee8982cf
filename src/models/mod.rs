use serde::Deserialize;

pub mod movie;

pub use movie::{Movie, MovieId, Recommendation};

// ============================================================================
// Recommendation backend wire types
// ============================================================================

/// One row of `GET /movies/search`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchHit {
    pub movie_id: MovieId,
    pub title: String,
}

/// One row of `GET /movies/recommendations`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecommendationHit {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Body of `GET /movies/{id}/poster`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PosterResponse {
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl SearchHit {
    /// Builds the local record, attaching whatever poster the lookup produced
    pub fn into_movie(self, poster_path: Option<String>) -> Movie {
        Movie::new(self.movie_id, self.title).with_poster(poster_path)
    }
}

impl RecommendationHit {
    /// Builds the local record; rating, date, runtime and genres stay unset
    pub fn into_recommendation(self, poster_path: Option<String>) -> Recommendation {
        let movie = Movie::new(self.movie_id, self.title).with_poster(poster_path);
        Recommendation::new(movie).with_overview(self.overview)
    }
}
