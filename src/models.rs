use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// Wire shape for a cached movie. Field names are camelCase to match the
/// frontend contract.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: f64,
    pub year: i32,
    pub genres: Vec<String>,
}

impl From<movie::Model> for MovieResponse {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image_url: m.image_url,
            rating: m.rating,
            year: m.year,
            genres: split_genres(&m.genres),
        }
    }
}

/// Genres are stored as comma-joined text. Order is preserved; the
/// representation is lossy only if a genre name itself contains a comma.
pub fn join_genres(genres: &[String]) -> String {
    genres.join(",")
}

pub fn split_genres(stored: &str) -> Vec<String> {
    stored.split(',').filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// All fields optional so presence can be checked explicitly; a missing field
/// yields a 400 with the missing-fields body rather than a deserialization
/// rejection. A present rating of 0 is valid.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRequest {
    pub user_id: Option<String>,
    pub movie_id: Option<i32>,
    pub rating: Option<i32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub movie_id: i32,
    pub rating: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_round_trip_preserves_order() {
        let genres = vec!["Action".to_string(), "Drama".to_string()];
        assert_eq!(split_genres(&join_genres(&genres)), genres);
    }

    #[test]
    fn empty_genres_yield_empty_list() {
        assert_eq!(split_genres(""), Vec::<String>::new());
    }
}
