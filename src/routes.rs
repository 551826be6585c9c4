use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    auth::RequireAuth,
    error::{AppError, AppResult},
    models::{MovieResponse, PreferenceRequest, PreferenceResponse},
};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serves the cached popular-movies list, populating the cache first if it is
/// empty. The refresh sits behind a single-flight mutex so concurrent readers
/// of an empty cache trigger at most one upstream round trip; emptiness is
/// re-checked under the lock.
pub async fn list_movies(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let mut movies = state.movies.list_all().await?;

    if movies.is_empty() {
        let _guard = state.refresh_lock.lock().await;
        movies = state.movies.list_all().await?;
        if movies.is_empty() {
            state.catalog.fetch_and_store(&state.movies).await?;
            movies = state.movies.list_all().await?;
        }
    }

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

pub async fn save_preference(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreferenceRequest>,
) -> AppResult<Json<Value>> {
    // Presence check only; a rating of 0 is a legitimate value.
    let (user_id, movie_id, rating) = match (req.user_id, req.movie_id, req.rating) {
        (Some(user_id), Some(movie_id), Some(rating)) if !user_id.is_empty() => {
            (user_id, movie_id, rating)
        }
        _ => return Err(AppError::Validation("Missing required fields")),
    };

    // movie_id is deliberately not checked against the movie cache.
    state.preferences.upsert(&user_id, movie_id, rating).await?;

    Ok(Json(json!({ "message": "Preference saved successfully" })))
}

pub async fn list_preferences(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    let rows = state.preferences.list_by_user(&user_id).await?;
    let prefs = rows
        .into_iter()
        .map(|p| PreferenceResponse { movie_id: p.movie_id, rating: p.rating })
        .collect();
    Ok(Json(prefs))
}
