pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tmdb;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    store::{MovieStore, PreferenceStore},
    tmdb::CatalogClient,
};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: CatalogClient,
    pub movies: MovieStore,
    pub preferences: PreferenceStore,
    /// Single-flight guard for the fetch-on-empty refresh.
    pub refresh_lock: Mutex<()>,
}

pub fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/movies", get(routes::list_movies))
        .route("/api/preferences", post(routes::save_preference))
        .route("/api/preferences/{user_id}", get(routes::list_preferences))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
