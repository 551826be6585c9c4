//! Shared helpers for the HTTP integration tests: a test app wired exactly
//! like production (same router, same middleware), backed by a throwaway
//! SQLite file, plus a tiny in-process stand-in for the upstream catalog.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use reelcache::{
    AppState,
    config::Config,
    db, router,
    store::{MovieStore, PreferenceStore},
    tmdb::CatalogClient,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub struct TestApp {
    pub app: Router,
    pub movies: MovieStore,
    pub preferences: PreferenceStore,
    // Holds the SQLite file for the lifetime of the test.
    _tmp: TempDir,
}

/// Builds the production router against a fresh database, pointing the
/// catalog client at `upstream_base` (use `spawn_upstream` or a dead address).
pub async fn build_test_app(upstream_base: &str) -> TestApp {
    let tmp = TempDir::new().expect("create temp dir");
    let database_url =
        format!("sqlite://{}?mode=rwc", tmp.path().join("test.db").display());

    let config = Arc::new(Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        tmdb_api_key: "upstream-key".to_string(),
        tmdb_base_url: upstream_base.to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        api_token: TOKEN.to_string(),
        allowed_origin: "http://localhost:5173".to_string(),
        database_url: database_url.clone(),
    });

    let db = db::connect_and_migrate(&database_url).await.expect("connect db");
    let movies = MovieStore::new(db.clone());
    let preferences = PreferenceStore::new(db);

    let catalog = CatalogClient::new(
        reqwest::Client::new(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_image_base_url.clone(),
    );

    let state = Arc::new(AppState {
        config,
        catalog,
        movies: movies.clone(),
        preferences: preferences.clone(),
        refresh_lock: Mutex::new(()),
    });

    TestApp { app: router(state).expect("build router"), movies, preferences, _tmp: tmp }
}

/// Starts an in-process catalog stand-in serving the two endpoints the
/// fetcher calls, each with a fixed status and body. Returns its base URL.
pub async fn spawn_upstream(
    popular: (StatusCode, Value),
    genres: (StatusCode, Value),
) -> String {
    let upstream = Router::new()
        .route(
            "/movie/popular",
            axum::routing::get(move || {
                let (status, body) = popular.clone();
                async move { (status, Json(body)) }
            }),
        )
        .route(
            "/genre/movie/list",
            axum::routing::get(move || {
                let (status, body) = genres.clone();
                async move { (status, Json(body)) }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.expect("serve upstream");
    });
    format!("http://{addr}")
}

/// Two popular movies and a matching genre taxonomy, shaped like the real
/// catalog responses.
pub fn popular_payload() -> Value {
    json!({
        "results": [
            {
                "id": 550,
                "title": "Fight Club",
                "overview": "An insomniac office worker...",
                "poster_path": "/fight-club.jpg",
                "vote_average": 8.4,
                "release_date": "1999-10-15",
                "genre_ids": [18]
            },
            {
                "id": 603,
                "title": "The Matrix",
                "overview": "A computer hacker learns...",
                "poster_path": "/matrix.jpg",
                "vote_average": 8.2,
                "release_date": "1999-03-30",
                "genre_ids": [28, 878]
            }
        ]
    })
}

pub fn genres_payload() -> Value {
    json!({
        "genres": [
            { "id": 18, "name": "Drama" },
            { "id": 28, "name": "Action" },
            { "id": 878, "name": "Science Fiction" }
        ]
    })
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, path: &str, token: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
