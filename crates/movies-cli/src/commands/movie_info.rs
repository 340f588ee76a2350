use movies_core::MovieService;
use serde_json::Value;

use crate::cli::MovieIdArgs;
use crate::error::CliError;

pub async fn run(args: &MovieIdArgs, service: &MovieService) -> Result<Value, CliError> {
    let movie_info = service
        .movies_info_client()
        .retrieve_movie_info(&args.movie_id)
        .await?;
    Ok(serde_json::to_value(movie_info)?)
}
