use movies_core::MovieService;
use serde_json::Value;

use crate::cli::MovieIdArgs;
use crate::error::CliError;

pub async fn run(args: &MovieIdArgs, service: &MovieService) -> Result<Value, CliError> {
    let reviews = service
        .review_client()
        .retrieve_reviews(&args.movie_id)
        .await?;
    tracing::debug!(count = reviews.len(), "reviews fetched");
    Ok(serde_json::to_value(reviews)?)
}
