use super::common::{bad_id, error_response};
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::student_service::StudentService;
use util::state::AppState;

/// DELETE /api/students/{id}
///
/// Removes the student's login account and then the record itself.
///
/// ### Responses
/// - `200 OK` with `"data": {}`
/// - `404 Not Found` with `Student not found`
/// - `400 Bad Request` with `Invalid student id` when the id is not an integer
pub async fn delete_student(
    State(app_state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_id(rejection),
    };

    match StudentService::delete(app_state.db(), id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Student deleted successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
