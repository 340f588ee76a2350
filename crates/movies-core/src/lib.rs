//! # Movies Core
//!
//! Resilient downstream access for the movies aggregation service.
//!
//! ## Overview
//!
//! Given a movie id, this crate fetches the movie's metadata from the
//! movie-info service and its reviews from the review service, concurrently,
//! and combines both into one [`Movie`]. Remote failures are classified into a
//! closed [`ClassifiedFailure`] taxonomy; only server errors are retried.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`clients`] | Movie-info and review REST clients |
//! | [`config`] | Base URLs, timeouts and retry overrides |
//! | [`domain`] | Domain models (MovieInfo, Review, Movie) |
//! | [`error`] | Validation errors and the remote failure taxonomy |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Fixed-delay retry policy for server errors |
//! | [`service`] | Aggregation of both downstream calls |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use movies_core::{MovieService, RestClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RestClientConfig::from_env()?;
//!     let service = MovieService::from_config(&config);
//!
//!     let movie = service.retrieve_movie("abc").await?;
//!     println!("{} has {} review(s)", movie.movie_info.name, movie.review_list.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  MovieService   │──── join ────┐
//! └────────┬────────┘              │
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MoviesInfo      │     │ Review           │
//! │ RestClient      │     │ RestClient       │
//! └────────┬────────┘     └────────┬─────────┘
//!          │   RetryPolicy (5xx)   │
//!          ▼                       ▼
//! ┌──────────────────────────────────────────┐
//! │ HttpClient (shared reqwest pool)         │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use movies_core::{ClassifiedFailure, FailureKind};
//!
//! fn render(failure: &ClassifiedFailure) -> (u16, &str) {
//!     match failure.kind() {
//!         FailureKind::NotFound
//!         | FailureKind::Client
//!         | FailureKind::Server
//!         | FailureKind::Decode
//!         | FailureKind::Transport => (failure.http_status(), failure.message()),
//!     }
//! }
//! ```

pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod retry;
pub mod service;

pub use clients::{MoviesInfoRestClient, ReviewRestClient};

pub use config::{ConfigError, RestClientConfig};

pub use domain::{Movie, MovieInfo, ReleaseDate, Review};

pub use error::{ClassifiedFailure, FailureKind, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use retry::{Backoff, RetryDecision, RetryPolicy};

pub use service::MovieService;
