/// HTTP recommendation backend
///
/// API Flow:
/// 1. Search: /movies/search?query= → `[{movie_id, title}]`
/// 2. Recommendations: /movies/recommendations?id= → `[{movie_id, title, overview}]`
/// 3. Poster: /movies/{id}/poster → `{poster_url}`
use crate::{
    error::{AppError, AppResult},
    models::{MovieId, PosterResponse, RecommendationHit, SearchHit},
    services::providers::MovieBackend,
};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpMovieBackend {
    http_client: HttpClient,
    api_url: String,
}

impl HttpMovieBackend {
    /// Creates a backend client rooted at `api_url` (e.g. `http://localhost:5000/api`)
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Decodes a JSON body, mapping non-2xx statuses to `ExternalApi`
    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "{} returned status {}: {}",
                what, status, body
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl MovieBackend for HttpMovieBackend {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let url = format!("{}/movies/search", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        let hits: Vec<SearchHit> = Self::decode(response, "Movie search").await?;

        tracing::debug!(
            query = %query,
            results = hits.len(),
            backend = self.name(),
            "Search response received"
        );

        Ok(hits)
    }

    async fn fetch_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<RecommendationHit>> {
        let url = format!("{}/movies/recommendations", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("id", movie_id)])
            .send()
            .await?;

        let hits: Vec<RecommendationHit> = Self::decode(response, "Recommendations").await?;

        tracing::debug!(
            movie_id = movie_id,
            results = hits.len(),
            backend = self.name(),
            "Recommendations response received"
        );

        Ok(hits)
    }

    async fn fetch_poster(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let url = format!("{}/movies/{}/poster", self.api_url, movie_id);

        let response = self.http_client.get(&url).send().await?;
        let poster: PosterResponse = Self::decode(response, "Poster lookup").await?;

        Ok(poster.poster_url.filter(|p| !p.is_empty()))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
