mod movie;
mod movie_info;
mod reviews;

use std::env;

use movies_core::config::{
    MAX_RETRIES_VAR, MOVIES_INFO_URL_VAR, RETRY_DELAY_MS_VAR, REVIEWS_URL_VAR, TIMEOUT_MS_VAR,
};
use movies_core::{ConfigError, MovieService, RestClientConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = rest_client_config(cli, |name| env::var(name).ok())?;
    let service = MovieService::from_config(&config);

    match &cli.command {
        Command::Movie(args) => movie::run(args, &service).await,
        Command::MovieInfo(args) => movie_info::run(args, &service).await,
        Command::Reviews(args) => reviews::run(args, &service).await,
    }
}

/// Flags win over the environment, which wins over built-in defaults.
fn rest_client_config(
    cli: &Cli,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<RestClientConfig, ConfigError> {
    let overrides = [
        (MOVIES_INFO_URL_VAR, cli.movies_info_url.clone()),
        (REVIEWS_URL_VAR, cli.reviews_url.clone()),
        (RETRY_DELAY_MS_VAR, cli.retry_delay_ms.map(|v| v.to_string())),
        (MAX_RETRIES_VAR, cli.max_retries.map(|v| v.to_string())),
        (TIMEOUT_MS_VAR, cli.timeout_ms.map(|v| v.to_string())),
    ];

    RestClientConfig::from_lookup(|name| {
        overrides
            .iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| value.clone())
            .or_else(|| env_lookup(name))
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use movies_core::RetryPolicy;

    use super::*;

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| String::from(*value))
        }
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "movies",
            "movie",
            "abc",
            "--reviews-url",
            "http://flag/v1/reviews",
            "--max-retries",
            "1",
        ])
        .expect("valid arguments");

        let config = rest_client_config(
            &cli,
            env_with(&[
                (MOVIES_INFO_URL_VAR, "http://env/v1/movieinfos"),
                (REVIEWS_URL_VAR, "http://env/v1/reviews"),
                (RETRY_DELAY_MS_VAR, "50"),
            ]),
        )
        .expect("valid config");

        assert_eq!(config.movies_info_url, "http://env/v1/movieinfos");
        assert_eq!(config.reviews_url, "http://flag/v1/reviews");
        assert_eq!(config.retry, RetryPolicy::fixed(Duration::from_millis(50), 1));
    }

    #[test]
    fn missing_urls_are_a_config_error() {
        let cli = Cli::try_parse_from(["movies", "reviews", "abc"]).expect("valid arguments");
        let err = rest_client_config(&cli, env_with(&[])).expect_err("no urls anywhere");

        assert_eq!(err, ConfigError::Missing { name: MOVIES_INFO_URL_VAR });
        assert_eq!(CliError::from(err).exit_code(), 10);
    }
}
