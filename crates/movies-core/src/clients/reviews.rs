use std::sync::Arc;

use serde::Deserialize;

use super::{classify_error_status, decode_json, transport_failure, unexpected_status};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_MS};
use crate::{ClassifiedFailure, Review, RetryPolicy};

const DEFAULT_SERVICE_NAME: &str = "ReviewService";
const MOVIE_INFO_ID_PARAM: &str = "movie-info-id";

/// Client for `GET <reviews-url>?movie-info-id={id}`.
///
/// An id with no reviews is an empty list, not a failure.
#[derive(Clone)]
pub struct ReviewRestClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    service_name: String,
    retry: RetryPolicy,
    timeout_ms: u64,
}

impl ReviewRestClient {
    /// Client with the default retry policy, timeout and service name.
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            service_name: String::from(DEFAULT_SERVICE_NAME),
            retry: RetryPolicy::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Replaces the retry policy applied to every fetch.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Label used in server error messages.
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Per-attempt request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetches every review attached to `movie_id`, retrying server errors.
    pub async fn retrieve_reviews(
        &self,
        movie_id: &str,
    ) -> Result<Vec<Review>, ClassifiedFailure> {
        self.retry.execute(|| self.fetch_once(movie_id)).await
    }

    fn reviews_url(&self, movie_id: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}{MOVIE_INFO_ID_PARAM}={}",
            self.base_url,
            urlencoding::encode(movie_id)
        )
    }

    async fn fetch_once(&self, movie_id: &str) -> Result<Vec<Review>, ClassifiedFailure> {
        let url = self.reviews_url(movie_id);
        tracing::debug!(%url, "requesting reviews");

        let request = HttpRequest::get(url)
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| transport_failure(&self.service_name, error))?;

        self.classify(response)
    }

    fn classify(&self, response: HttpResponse) -> Result<Vec<Review>, ClassifiedFailure> {
        if let Some(failure) = classify_error_status(&self.service_name, &response) {
            return Err(failure);
        }

        if !response.is_success() {
            return Err(unexpected_status(&self.service_name, &response));
        }

        let payloads: Vec<ReviewPayload> = decode_json(&self.service_name, &response)?;
        let reviews = payloads
            .into_iter()
            .map(normalize_review)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = reviews.len(), "decoded reviews");
        Ok(reviews)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewPayload {
    #[serde(default)]
    review_id: Option<String>,
    movie_info_id: i64,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
}

fn normalize_review(payload: ReviewPayload) -> Result<Review, ClassifiedFailure> {
    Review::new(
        payload.review_id,
        payload.movie_info_id,
        payload.comment,
        payload.rating,
    )
    .map_err(|error| ClassifiedFailure::decode(error.to_string()))
}
