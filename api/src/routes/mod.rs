//! HTTP route entry point for `/api/...`.
//!
//! - `/health` → health check (public)
//! - `/auth` → login (public) and the current account (authenticated)
//! - `/students` → student records; every route is authenticated and the
//!   write routes additionally require an admin

use crate::routes::{auth::auth_routes, health::health_routes, students::students_routes};
use axum::Router;
use util::state::AppState;

pub mod auth;
pub mod health;
pub mod students;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", students_routes())
        .with_state(app_state)
}
