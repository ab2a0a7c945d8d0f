//! `/auth` route group.
//!
//! - `POST /auth/login` → [`post::login`]
//! - `GET /auth/me` → [`get::get_me`]

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(post::login))
        .route("/me", get(get::get_me))
}
