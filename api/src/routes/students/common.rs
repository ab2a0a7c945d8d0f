use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::StudentError;

/// Maps a service failure to its status and the error envelope.
///
/// Only a missing record (404) and a foreign record (403) get their own
/// status; validation, duplicates and datastore failures all answer 400.
pub fn error_response(err: StudentError) -> Response {
    let status = match &err {
        StudentError::NotFound => StatusCode::NOT_FOUND,
        StudentError::Forbidden => StatusCode::FORBIDDEN,
        StudentError::Database(e) => {
            tracing::error!(error = %e, "student datastore error");
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::BAD_REQUEST,
    };

    (status, Json(ApiResponse::<Empty>::error(err.to_string()))).into_response()
}

/// A path id that is not an integer.
pub fn bad_id(rejection: PathRejection) -> Response {
    tracing::debug!(reason = %rejection.body_text(), "rejected student id");
    bad_request("Invalid student id")
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(message)),
    )
        .into_response()
}
