use serde::Serialize;

use crate::{ReleaseDate, ValidationError};

/// Descriptive data for one movie as served by the movie-info service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    pub movie_info_id: Option<String>,
    pub name: String,
    pub year: i32,
    pub cast: Vec<String>,
    pub release_date: Option<ReleaseDate>,
}

impl MovieInfo {
    pub fn new(
        movie_info_id: Option<String>,
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        release_date: Option<ReleaseDate>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }

        if year <= 0 {
            return Err(ValidationError::NonPositiveYear { year });
        }

        if cast.is_empty() {
            return Err(ValidationError::EmptyCast);
        }
        if let Some(index) = cast.iter().position(|member| member.trim().is_empty()) {
            return Err(ValidationError::BlankCastMember { index });
        }

        Ok(Self {
            movie_info_id,
            name,
            year,
            cast,
            release_date,
        })
    }
}

/// One user review attached to a movie-info id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: Option<String>,
    pub movie_info_id: i64,
    pub comment: Option<String>,
    pub rating: Option<f64>,
}

impl Review {
    pub fn new(
        review_id: Option<String>,
        movie_info_id: i64,
        comment: Option<String>,
        rating: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if let Some(rating) = rating {
            if !rating.is_finite() {
                return Err(ValidationError::NonFiniteValue { field: "rating" });
            }
            if rating < 0.0 {
                return Err(ValidationError::NegativeRating);
            }
        }

        Ok(Self {
            review_id,
            movie_info_id,
            comment,
            rating,
        })
    }
}

/// A movie's metadata together with all of its reviews.
///
/// Only built once both downstream fetches have succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_info: MovieInfo,
    pub review_list: Vec<Review>,
}

impl Movie {
    pub fn new(movie_info: MovieInfo, review_list: Vec<Review>) -> Self {
        Self {
            movie_info,
            review_list,
        }
    }
}
