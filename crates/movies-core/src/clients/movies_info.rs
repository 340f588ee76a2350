use std::sync::Arc;

use serde::Deserialize;

use super::{
    classify_error_status, decode_json, log_status, transport_failure, unexpected_status,
};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_MS};
use crate::{ClassifiedFailure, MovieInfo, ReleaseDate, RetryPolicy};

const DEFAULT_SERVICE_NAME: &str = "MoviesInfoService";

/// Client for `GET <movies-info-url>/{id}`.
#[derive(Clone)]
pub struct MoviesInfoRestClient {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    service_name: String,
    retry: RetryPolicy,
    timeout_ms: u64,
}

impl MoviesInfoRestClient {
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

    /// Fetches one movie-info record, retrying server errors per the policy.
    ///
    /// # Errors
    ///
    /// - [`ClassifiedFailure::NotFound`] when the service answers 404 (never retried)
    /// - [`ClassifiedFailure::Client`] for any other 4xx, carrying the response body
    /// - [`ClassifiedFailure::Server`] for 5xx once retries are exhausted
    /// - [`ClassifiedFailure::Decode`] when a 2xx body is not a valid movie-info
    pub async fn retrieve_movie_info(
        &self,
        movie_id: &str,
    ) -> Result<MovieInfo, ClassifiedFailure> {
        self.retry.execute(|| self.fetch_once(movie_id)).await
    }

    async fn fetch_once(&self, movie_id: &str) -> Result<MovieInfo, ClassifiedFailure> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(movie_id)
        );
        tracing::debug!(%url, "requesting movie info");

        let request = HttpRequest::get(url)
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| transport_failure(&self.service_name, error))?;

        self.classify(movie_id, response)
    }

    fn classify(
        &self,
        movie_id: &str,
        response: HttpResponse,
    ) -> Result<MovieInfo, ClassifiedFailure> {
        if response.status == 404 {
            log_status(&self.service_name, response.status);
            return Err(ClassifiedFailure::not_found(format!(
                "There is no Metadata Available for the passed in id: {movie_id}"
            )));
        }

        if let Some(failure) = classify_error_status(&self.service_name, &response) {
            return Err(failure);
        }

        if !response.is_success() {
            return Err(unexpected_status(&self.service_name, &response));
        }

        let payload: MovieInfoPayload = decode_json(&self.service_name, &response)?;
        normalize_movie_info(payload)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieInfoPayload {
    #[serde(default)]
    movie_info_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    year: i32,
    #[serde(default)]
    cast: Vec<String>,
    #[serde(default)]
    release_date: Option<ReleaseDate>,
}

fn normalize_movie_info(payload: MovieInfoPayload) -> Result<MovieInfo, ClassifiedFailure> {
    MovieInfo::new(
        payload.movie_info_id,
        payload.name,
        payload.year,
        payload.cast,
        payload.release_date,
    )
    .map_err(|error| ClassifiedFailure::decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::NeverCalled;
    use crate::FailureKind;

    fn client() -> MoviesInfoRestClient {
        MoviesInfoRestClient::new(Arc::new(NeverCalled), "http://localhost:8080/v1/movieinfos")
    }

    #[test]
    fn not_found_names_the_requested_id() {
        let failure = client()
            .classify("abc", HttpResponse::new(404, ""))
            .expect_err("404 is a failure");

        assert_eq!(
            failure,
            ClassifiedFailure::not_found("There is no Metadata Available for the passed in id: abc")
        );
    }

    #[test]
    fn other_client_errors_keep_body_and_status() {
        let failure = client()
            .classify("abc", HttpResponse::new(422, "movieInfo.year must be a positive value"))
            .expect_err("422 is a failure");

        assert_eq!(failure.kind(), FailureKind::Client);
        assert_eq!(failure.upstream_status(), Some(422));
        assert_eq!(failure.message(), "movieInfo.year must be a positive value");
    }

    #[test]
    fn server_errors_use_configured_service_name() {
        let failure = client()
            .with_service_name("InfoSvc")
            .classify("abc", HttpResponse::new(500, "MoviesInfo Service Unavailable"))
            .expect_err("500 is a failure");

        assert_eq!(
            failure.message(),
            "Server Exception in InfoSvc: MoviesInfo Service Unavailable"
        );
    }

    #[test]
    fn decodes_success_body() {
        let body = r#"{"movieInfoId":"abc","name":"Batman Begins","year":2005,
            "cast":["Christian Bale","Michael Cane"],"releaseDate":"2005-06-15"}"#;

        let info = client()
            .classify("abc", HttpResponse::ok_json(body))
            .expect("valid body");

        assert_eq!(info.movie_info_id.as_deref(), Some("abc"));
        assert_eq!(info.name, "Batman Begins");
        assert_eq!(
            info.release_date.map(|date| date.to_string()).as_deref(),
            Some("2005-06-15")
        );
    }

    #[test]
    fn malformed_release_date_is_a_decode_failure() {
        let body = r#"{"movieInfoId":"abc","name":"Batman Begins","year":2005,
            "cast":["Christian Bale"],"releaseDate":"15/06/2005"}"#;

        let failure = client()
            .classify("abc", HttpResponse::ok_json(body))
            .expect_err("release date is not YYYY-MM-DD");

        assert_eq!(failure.kind(), FailureKind::Decode);
        assert!(failure.message().contains("MoviesInfoService"));
        assert!(failure.message().contains("YYYY-MM-DD"));
    }

    #[test]
    fn null_release_date_is_absent() {
        let body = r#"{"movieInfoId":"abc","name":"Batman Begins","year":2005,
            "cast":["Christian Bale"],"releaseDate":null}"#;

        let info = client()
            .classify("abc", HttpResponse::ok_json(body))
            .expect("release date is optional");

        assert_eq!(info.release_date, None);
    }

    #[test]
    fn invalid_success_body_is_a_decode_failure() {
        let missing_cast = r#"{"movieInfoId":"abc","name":"Batman Begins","year":2005}"#;
        let failure = client()
            .classify("abc", HttpResponse::ok_json(missing_cast))
            .expect_err("cast is required");
        assert_eq!(failure.kind(), FailureKind::Decode);

        let failure = client()
            .classify("abc", HttpResponse::ok_json("not json"))
            .expect_err("not json");
        assert_eq!(failure.kind(), FailureKind::Decode);
    }
}
