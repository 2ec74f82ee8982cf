use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::AppResult,
    models::{Movie, MovieId, Recommendation},
    services::providers::MovieBackend,
};

/// Client-side view of the recommendation backend
///
/// Turns backend rows into `Movie`/`Recommendation` records and enriches each one
/// with a poster. Poster lookups for a batch run in parallel and are all joined
/// before the batch is returned. A failed lookup only costs that item its poster.
#[derive(Clone)]
pub struct MovieClient {
    backend: Arc<dyn MovieBackend>,
}

impl MovieClient {
    pub fn new(backend: Arc<dyn MovieBackend>) -> Self {
        Self { backend }
    }

    /// Search by title fragment; the search call's own failure propagates
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        let hits = self.backend.search_movies(query).await.map_err(|e| {
            tracing::error!(error = %e, "Error searching movies");
            e
        })?;

        let ids = hits.iter().map(|hit| hit.movie_id).collect();
        let posters = self.fetch_posters(ids).await;

        let movies: Vec<Movie> = hits
            .into_iter()
            .zip(posters)
            .map(|(hit, poster)| hit.into_movie(poster))
            .collect();

        tracing::info!(results = movies.len(), "Movie search completed");

        Ok(movies)
    }

    /// Recommendations for one movie, overview carried through verbatim
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn recommendations(&self, movie_id: MovieId) -> AppResult<Vec<Recommendation>> {
        let hits = self
            .backend
            .fetch_recommendations(movie_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error fetching recommendations");
                e
            })?;

        let ids = hits.iter().map(|hit| hit.movie_id).collect();
        let posters = self.fetch_posters(ids).await;

        let recommendations: Vec<Recommendation> = hits
            .into_iter()
            .zip(posters)
            .map(|(hit, poster)| hit.into_recommendation(poster))
            .collect();

        tracing::info!(
            results = recommendations.len(),
            "Recommendations fetched"
        );

        Ok(recommendations)
    }

    /// Fetch posters for a batch in parallel, one result per id in input order
    async fn fetch_posters(&self, movie_ids: Vec<MovieId>) -> Vec<Option<String>> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let backend = Arc::clone(&self.backend);
            let task = tokio::spawn(async move { backend.fetch_poster(movie_id).await });
            tasks.push((movie_id, task));
        }

        let mut posters = Vec::with_capacity(tasks.len());
        let mut failures = 0usize;

        for (movie_id, task) in tasks {
            match task.await {
                Ok(Ok(poster)) => posters.push(poster),
                Ok(Err(e)) => {
                    tracing::warn!(movie_id = movie_id, error = %e, "Error fetching poster");
                    failures += 1;
                    posters.push(None);
                }
                Err(e) => {
                    tracing::warn!(movie_id = movie_id, error = %e, "Poster task join error");
                    failures += 1;
                    posters.push(None);
                }
            }
        }

        if failures > 0 {
            tracing::warn!(
                success_count = posters.len() - failures,
                error_count = failures,
                "Partial poster fetch failure"
            );
        }

        posters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{RecommendationHit, SearchHit};
    use crate::services::providers::MockMovieBackend;
    use tokio_test::{assert_err, assert_ok};

    fn hit(movie_id: MovieId, title: &str) -> SearchHit {
        SearchHit {
            movie_id,
            title: title.to_string(),
        }
    }

    fn client(backend: MockMovieBackend) -> MovieClient {
        MovieClient::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_search_attaches_poster() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_search_movies()
            .withf(|query| query == "A")
            .times(1)
            .returning(|_| Ok(vec![hit(1, "A")]));
        backend
            .expect_fetch_poster()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some("x.jpg".to_string())));

        let movies = assert_ok!(client(backend).search("A").await);

        assert_eq!(movies, vec![Movie::new(1, "A").with_poster(Some("x.jpg".to_string()))]);
        assert_eq!(
            serde_json::to_value(&movies).unwrap(),
            serde_json::json!([{"id": 1, "title": "A", "posterPath": "x.jpg", "releaseDate": null}])
        );
    }

    #[tokio::test]
    async fn test_search_isolates_poster_failure() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_search_movies()
            .returning(|_| Ok(vec![hit(1, "A")]));
        backend
            .expect_fetch_poster()
            .returning(|_| Err(AppError::ExternalApi("poster down".to_string())));

        let movies = assert_ok!(client(backend).search("A").await);

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "A");
        assert_eq!(movies[0].poster_path, None);
        assert_eq!(movies[0].release_date, None);
    }

    #[tokio::test]
    async fn test_search_failure_propagates_without_poster_calls() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_search_movies()
            .returning(|_| Err(AppError::ExternalApi("status 500".to_string())));
        backend.expect_fetch_poster().never();

        let err = assert_err!(client(backend).search("heat").await);
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_batch_keeps_backend_order_with_mixed_posters() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_search_movies()
            .returning(|_| Ok(vec![hit(3, "C"), hit(1, "A"), hit(2, "B")]));
        backend.expect_fetch_poster().times(3).returning(|id| match id {
            1 => Ok(Some("a.jpg".to_string())),
            2 => Err(AppError::Internal("timeout".to_string())),
            _ => Ok(None),
        });

        let movies = client(backend).search("x").await.unwrap();
        let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(movies[0].poster_path, None);
        assert_eq!(movies[1].poster_path.as_deref(), Some("a.jpg"));
        assert_eq!(movies[2].poster_path, None);
    }

    #[tokio::test]
    async fn test_recommendations_carry_overview() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_fetch_recommendations()
            .withf(|id| *id == 603)
            .returning(|_| {
                Ok(vec![RecommendationHit {
                    movie_id: 604,
                    title: "The Matrix Reloaded".to_string(),
                    overview: Some("Six months after...".to_string()),
                }])
            });
        backend
            .expect_fetch_poster()
            .returning(|_| Err(AppError::ExternalApi("poster down".to_string())));

        let recs = client(backend).recommendations(603).await.unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id(), 604);
        assert_eq!(recs[0].overview.as_deref(), Some("Six months after..."));
        assert_eq!(recs[0].movie.poster_path, None);
        assert_eq!(recs[0].vote_average, None);
        assert_eq!(recs[0].movie.release_date, None);
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_poster_calls() {
        let mut backend = MockMovieBackend::new();
        backend.expect_name().return_const("mock");
        backend.expect_fetch_recommendations().returning(|_| Ok(vec![]));
        backend.expect_fetch_poster().never();

        let recs = client(backend).recommendations(1).await.unwrap();
        assert!(recs.is_empty());
    }
}
