//! `/students` route group.
//!
//! | Method | Path | Gate |
//! |---|---|---|
//! | GET | `/` | authenticated |
//! | POST | `/` | admin |
//! | GET | `/{id}` | authenticated, owner or admin (checked in the handler) |
//! | GET | `/{id}/photo` | authenticated, owner or admin (checked in the handler) |
//! | PUT | `/{id}` | admin |
//! | DELETE | `/{id}` | admin |

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Multipart updates carry a photo of up to 2 MB plus the text fields.
const UPDATE_BODY_LIMIT: usize = 4 * 1024 * 1024;

pub fn students_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get::get_students))
        .route("/{id}", get(get::get_student))
        .route("/{id}/photo", get(get::get_student_photo))
        .route_layer(from_fn(allow_authenticated));

    let write = Router::new()
        .route("/", post(post::create_student))
        .route(
            "/{id}",
            put(put::update_student).layer(DefaultBodyLimit::max(UPDATE_BODY_LIMIT)),
        )
        .route("/{id}", delete(delete::delete_student))
        .route_layer(from_fn(allow_admin));

    read.merge(write)
}
