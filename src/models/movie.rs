use chrono::{Datelike, NaiveDate};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Backend-assigned movie identifier
pub type MovieId = u64;

const TMDB_MOVIE_URL: &str = "https://www.themoviedb.org/movie";
const IMDB_FIND_URL: &str = "https://www.imdb.com/find/";

/// Minimal movie record returned by search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

impl Movie {
    /// Creates a movie with no poster and no release date
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
        }
    }

    /// Sets the poster, treating an empty string as "no poster"
    pub fn with_poster(mut self, poster_path: Option<String>) -> Self {
        self.poster_path = poster_path.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_release_date(mut self, release_date: Option<String>) -> Self {
        self.release_date = release_date.filter(|d| !d.trim().is_empty());
        self
    }

    /// Year of release, if the date starts with a `YYYY-MM-DD` prefix
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        let prefix = date.get(..10).unwrap_or(date);
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Canonical detail page on TMDB
    pub fn tmdb_url(&self) -> String {
        format!("{}/{}", TMDB_MOVIE_URL, self.id)
    }

    /// Text search on IMDb for this title
    ///
    /// Spaces come out as `%20`; a literal `+` in the title is already `%2B`.
    pub fn imdb_search_url(&self) -> String {
        match Url::parse_with_params(IMDB_FIND_URL, &[("q", self.title.as_str())]) {
            Ok(url) => url.as_str().replace('+', "%20"),
            Err(_) => IMDB_FIND_URL.to_string(),
        }
    }
}

/// A movie enriched with the fields shown in the detail overlay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Recommendation {
    pub fn new(movie: Movie) -> Self {
        Self {
            movie,
            vote_average: None,
            overview: None,
            runtime: None,
            genres: Vec::new(),
        }
    }

    pub fn with_overview(mut self, overview: Option<String>) -> Self {
        self.overview = overview;
        self
    }

    /// Sets the rating; anything outside 0..=10 is dropped
    pub fn with_vote_average(mut self, vote_average: Option<f64>) -> Self {
        self.vote_average = vote_average.filter(|v| v.is_finite() && (0.0..=10.0).contains(v));
        self
    }

    pub fn with_runtime(mut self, runtime: Option<u32>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }
}
