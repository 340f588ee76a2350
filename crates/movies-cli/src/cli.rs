//! CLI argument definitions for the `movies` binary.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `movie` | Movie-info and reviews combined into one movie |
//! | `movie-info` | Movie-info only |
//! | `reviews` | Reviews only |
//!
//! # Global Options
//!
//! | Option | Fallback | Description |
//! |--------|----------|-------------|
//! | `--movies-info-url` | `MOVIES_INFO_URL` | Movie-info service base URL |
//! | `--reviews-url` | `MOVIES_REVIEWS_URL` | Reviews service base URL |
//! | `--retry-delay-ms` | `MOVIES_RETRY_DELAY_MS` or `1000` | Delay between retries |
//! | `--max-retries` | `MOVIES_MAX_RETRIES` or `3` | Retries after the first attempt |
//! | `--timeout-ms` | `MOVIES_TIMEOUT_MS` or `3000` | Per-request timeout |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Log retries and outcomes to stderr |
//!
//! # Examples
//!
//! ```bash
//! movies movie abc --movies-info-url http://localhost:8080/v1/movieinfos \
//!     --reviews-url http://localhost:8081/v1/reviews --pretty
//! MOVIES_MAX_RETRIES=0 movies reviews abc
//! ```

use clap::{Args, Parser, Subcommand};

/// Aggregates movie metadata and reviews from two downstream services.
#[derive(Debug, Parser)]
#[command(name = "movies", author, version, about = "Movie metadata and reviews aggregator")]
pub struct Cli {
    /// Base URL of the movie-info service.
    #[arg(long, global = true)]
    pub movies_info_url: Option<String>,

    /// Base URL of the reviews service.
    #[arg(long, global = true)]
    pub reviews_url: Option<String>,

    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Retries after the first attempt; 0 disables retrying.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch movie-info and reviews concurrently and combine them.
    ///
    ///   movies movie abc
    Movie(MovieIdArgs),

    /// Fetch a movie's metadata only.
    MovieInfo(MovieIdArgs),

    /// Fetch a movie's reviews only.
    Reviews(MovieIdArgs),
}

#[derive(Debug, Args)]
pub struct MovieIdArgs {
    /// Movie identifier as known to the movie-info service.
    pub movie_id: String,
}
