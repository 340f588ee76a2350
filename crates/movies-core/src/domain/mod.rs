//! # Domain Models
//!
//! Values exchanged with the movie-info and review services.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MovieInfo`] | Title, year, cast and release date of a movie |
//! | [`Review`] | One rating/comment attached to a movie-info id |
//! | [`Movie`] | A movie-info record paired with its reviews |
//! | [`ReleaseDate`] | Calendar date (`YYYY-MM-DD`) |
//!
//! Constructors validate their invariants and return [`ValidationError`](crate::ValidationError).

mod models;
mod release_date;

pub use models::{Movie, MovieInfo, Review};
pub use release_date::ReleaseDate;
