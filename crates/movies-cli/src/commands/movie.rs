use movies_core::MovieService;
use serde_json::Value;

use crate::cli::MovieIdArgs;
use crate::error::CliError;

pub async fn run(args: &MovieIdArgs, service: &MovieService) -> Result<Value, CliError> {
    let movie = service.retrieve_movie(&args.movie_id).await?;
    Ok(serde_json::to_value(movie)?)
}
