//! Movie DTOs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::movie::{ListParams, Movie, MoviePatch};
use crate::interfaces::http::common::RootKey;

/// Movie resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub genre: String,
    /// 0.0 - 10.0, one decimal place
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 8.8)]
    pub rating: Option<Decimal>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            director: m.director,
            year: m.year,
            genre: m.genre,
            rating: m.rating,
            synopsis: m.synopsis,
            poster_url: m.poster_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Accepted movie fields, sent as `{"movie": {...}}`.
///
/// Any other key is dropped. On update an absent key leaves the stored
/// value alone and an explicit `null` clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MovieRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Inception")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Christopher Nolan")]
    pub director: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>, example = 2010)]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Sci-Fi")]
    pub genre: Option<Option<String>>,
    /// Number or numeric string
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>, example = 8.8)]
    pub rating: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub synopsis: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "https://image.tmdb.org/t/p/w500/poster.jpg")]
    pub poster_url: Option<Option<String>>,
}

impl RootKey for MovieRequest {
    const ROOT: &'static str = "movie";
}

/// Wraps whatever was sent, including `null`, so a present key is
/// distinguishable from a missing one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<MovieRequest> for MoviePatch {
    fn from(r: MovieRequest) -> Self {
        Self {
            title: r.title,
            director: r.director,
            year: r.year,
            genre: r.genre,
            rating: r.rating,
            synopsis: r.synopsis,
            poster_url: r.poster_url,
        }
    }
}

/// Only documents the query string; values are read leniently by
/// [`ListMoviesQuery::parse`] so bad input never rejects the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// Page number, from 1. Invalid values fall back to 1
    pub page: Option<String>,
    /// Page size, 1-100. Invalid values fall back to 20, larger ones are capped at 100
    pub per_page: Option<String>,
    /// Case-insensitive exact genre
    pub genre: Option<String>,
    /// Release year. Ignored when out of range or not a number
    pub year: Option<String>,
    /// Case-insensitive substring of title or director
    pub q: Option<String>,
}

impl ListMoviesQuery {
    /// Decode a raw query string. Repeated keys keep the last value.
    pub fn parse(raw: Option<&str>) -> ListParams {
        let mut pairs: HashMap<String, String> = raw
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        ListParams {
            page: pairs.remove("page"),
            per_page: pairs.remove("per_page"),
            genre: pairs.remove("genre"),
            year: pairs.remove("year"),
            q: pairs.remove("q"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
