use std::sync::Arc;

use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{
    ClassifiedFailure, Movie, MovieInfo, MoviesInfoRestClient, RestClientConfig, Review,
    ReviewRestClient,
};

/// Combines a movie's metadata and reviews into one [`Movie`].
#[derive(Clone)]
pub struct MovieService {
    movies_info: MoviesInfoRestClient,
    reviews: ReviewRestClient,
}

impl MovieService {
    pub fn new(movies_info: MoviesInfoRestClient, reviews: ReviewRestClient) -> Self {
        Self {
            movies_info,
            reviews,
        }
    }

    /// Wires both clients to one pooled reqwest transport.
    pub fn from_config(config: &RestClientConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: &RestClientConfig) -> Self {
        let movies_info = MoviesInfoRestClient::new(http_client.clone(), &config.movies_info_url)
            .with_retry_policy(config.retry)
            .with_timeout_ms(config.timeout_ms);
        let reviews = ReviewRestClient::new(http_client, &config.reviews_url)
            .with_retry_policy(config.retry)
            .with_timeout_ms(config.timeout_ms);

        Self::new(movies_info, reviews)
    }

    pub fn movies_info_client(&self) -> &MoviesInfoRestClient {
        &self.movies_info
    }

    pub fn review_client(&self) -> &ReviewRestClient {
        &self.reviews
    }

    /// Fetches movie-info and reviews concurrently and pairs them.
    ///
    /// Both fetches always run to completion before anything is returned.
    /// When both fail, the movie-info failure wins. Dropping the returned
    /// future cancels both fetches, including any pending retry delay.
    #[tracing::instrument(skip_all, fields(movie_id = %movie_id))]
    pub async fn retrieve_movie(&self, movie_id: &str) -> Result<Movie, ClassifiedFailure> {
        let (movie_info, reviews) = tokio::join!(
            self.movies_info.retrieve_movie_info(movie_id),
            self.reviews.retrieve_reviews(movie_id),
        );

        let movie = combine(movie_info, reviews);
        match &movie {
            Ok(movie) => tracing::info!(reviews = movie.review_list.len(), "movie aggregated"),
            Err(failure) => tracing::error!(
                code = failure.code(),
                error = %failure,
                "movie aggregation failed"
            ),
        }
        movie
    }
}

fn combine(
    movie_info: Result<MovieInfo, ClassifiedFailure>,
    reviews: Result<Vec<Review>, ClassifiedFailure>,
) -> Result<Movie, ClassifiedFailure> {
    let movie_info = movie_info?;
    let reviews = reviews?;
    Ok(Movie::new(movie_info, reviews))
}
