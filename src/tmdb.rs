use std::collections::HashMap;

use anyhow::anyhow;
use serde::Deserialize;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    store::{MovieStore, now_sec},
};

pub struct CatalogClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl CatalogClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self { client, api_key, base_url, image_base_url }
    }

    /// Refreshes the movie cache from the upstream catalog: both the popular
    /// list and the genre taxonomy must come back successfully before any
    /// write happens, and the replace itself is a single transaction. No
    /// retries, no pagination.
    pub async fn fetch_and_store(&self, store: &MovieStore) -> AppResult<()> {
        let popular = self.fetch_popular().await?;
        let genres = self.fetch_genres().await?;

        let now = now_sec();
        let movies = popular
            .into_iter()
            .map(|raw| map_movie(raw, &genres, &self.image_base_url, now))
            .collect::<AppResult<Vec<_>>>()?;

        tracing::info!(count = movies.len(), "refreshing movie cache from catalog");
        store.replace_all(movies).await
    }

    async fn fetch_popular(&self) -> AppResult<Vec<RawMovie>> {
        let url = format!("{}/movie/popular", self.base_url.trim_end_matches('/'));
        let resp =
            self.client.get(url).query(&[("api_key", &self.api_key)]).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::Upstream);
        }
        let body: PopularResponse = resp.json().await?;
        Ok(body.results)
    }

    async fn fetch_genres(&self) -> AppResult<HashMap<i32, String>> {
        let url = format!("{}/genre/movie/list", self.base_url.trim_end_matches('/'));
        let resp =
            self.client.get(url).query(&[("api_key", &self.api_key)]).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::Upstream);
        }
        let body: GenreListResponse = resp.json().await?;
        Ok(body.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }
}

/// Maps one upstream movie into a cache row. Genre ids are resolved through
/// the fetched taxonomy and the release date is reduced to its year; either
/// failing aborts the whole refresh before any write.
fn map_movie(
    raw: RawMovie,
    genres: &HashMap<i32, String>,
    image_base_url: &str,
    now: i64,
) -> AppResult<movie::Model> {
    let names = raw
        .genre_ids
        .iter()
        .map(|id| {
            genres
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("movie {}: unknown genre id {id}", raw.id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let release_date = raw
        .release_date
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("movie {}: missing release date", raw.id))?;
    let date: jiff::civil::Date = release_date.parse()?;

    let image_url = raw.poster_path.map(|p| format!("{image_base_url}{p}"));

    Ok(movie::Model {
        id: raw.id,
        title: raw.title,
        description: raw.overview,
        image_url,
        rating: raw.vote_average,
        year: i32::from(date.year()),
        genres: crate::models::join_genres(&names),
        created_at: now,
    })
}

#[derive(Debug, Deserialize)]
struct PopularResponse {
    results: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: i32,
    title: String,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: f64,
    release_date: Option<String>,
    genre_ids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    id: i32,
    name: String,
}
