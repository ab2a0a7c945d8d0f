use super::common::{bad_id, error_response};
use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use common::students::{DEFAULT_PROFILE_PHOTO, StudentRecord};
use mime_guess::from_path;
use services::student_service::StudentService;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use util::{paths::profile_photo_path, state::AppState};

/// GET /api/students
///
/// Every student record, in insertion order.
///
/// ```json
/// { "success": true, "count": 1, "data": [ { "id": 1, "rollNo": "CS101", ... } ], "message": "..." }
/// ```
pub async fn get_students(State(app_state): State<AppState>) -> Response {
    match StudentService::list(app_state.db()).await {
        Ok(students) => {
            let data: Vec<StudentRecord> = students.into_iter().map(StudentRecord::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::list(data, "Students retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/students/{id}
///
/// Admins may read any record; a student only the one linked to their account.
///
/// ### Responses
/// - `200 OK` with the record
/// - `403 Forbidden` with `Not authorized to access this student's information`
/// - `404 Not Found` with `Student not found` (checked before ownership)
pub async fn get_student(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_id(rejection),
    };

    match StudentService::get_for(app_state.db(), id, &claims.caller()).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentRecord::from(student),
                "Student retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/students/{id}/photo
///
/// Streams the stored profile photo under the same ownership rule as
/// [`get_student`]. `404` while the record still uses the default photo.
pub async fn get_student_photo(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_id(rejection),
    };

    let student = match StudentService::get_for(app_state.db(), id, &claims.caller()).await {
        Ok(student) => student,
        Err(e) => return error_response(e),
    };

    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Profile photo not found")),
        )
            .into_response()
    };

    if student.profile_photo == DEFAULT_PROFILE_PHOTO {
        return not_found();
    }

    let path = profile_photo_path(student.id, &student.profile_photo);
    let file = match File::open(&path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(student_id = id, path = %path.display(), error = %e, "profile photo missing on disk");
            return not_found();
        }
    };

    let mime = from_path(&path).first_or_octet_stream();
    let body = Body::from_stream(ReaderStream::new(file));

    ([(CONTENT_TYPE, mime.to_string())], body).into_response()
}
