//! Keyboard smashing service.
//!
//! Users post arbitrary strings to `POST /api/smashing`; each one is stored
//! with its length, per-character counts, a random sentiment in `[0, 1)` and
//! the UTC date it arrived. `GET /api/smashings` lists the stored records,
//! narrowed by any of `lengthGt`, `lengthLt`, `sentimentGt`, `sentimentLt`,
//! `dateGt` and `dateLt`. All supplied filters must hold.
//!
//! Everything else is served from the static public directory.

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

use std::path::Path;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use routes::{create_smashing, list_smashings};
use state::SharedState;

pub fn app(state: SharedState, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/smashings", get(list_smashings))
        .route("/api/smashing", post(create_smashing))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(cors)
        .with_state(state)
}
