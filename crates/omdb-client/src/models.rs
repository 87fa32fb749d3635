//! Raw OMDb response bodies.
//!
//! OMDb always answers 200 and signals failure in-band with
//! `"Response": "False"` plus an `"Error"` message.

use serde::Deserialize;

use crate::types::{split_list, EntityRecord, SearchCandidate, SearchPage};

/// Body of a `?t=` / `?i=` lookup
#[derive(Debug, Clone, Deserialize)]
pub struct MovieResponse {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

/// Body of a `?s=` search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchItem>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

pub(crate) fn is_success(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

impl From<MovieResponse> for EntityRecord {
    fn from(raw: MovieResponse) -> Self {
        Self {
            imdb_id: raw.imdb_id,
            title: raw.title,
            year: raw.year,
            genres: split_list(&raw.genre),
            directors: split_list(&raw.director),
            actors: split_list(&raw.actors),
            imdb_rating: raw.imdb_rating,
            plot: raw.plot.filter(|p| p != "N/A"),
        }
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(raw: SearchResponse) -> Self {
        Self {
            candidates: raw
                .search
                .into_iter()
                .map(|item| SearchCandidate {
                    imdb_id: item.imdb_id,
                    title: item.title,
                    year: item.year,
                })
                .collect(),
            total_results: raw.total_results.and_then(|t| t.parse().ok()),
        }
    }
}
