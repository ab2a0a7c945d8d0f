use super::common::{bad_request, error_response};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::students::{CreateStudentRequest, StudentRecord};
use services::student_service::StudentService;
use util::state::AppState;

/// POST /api/students
///
/// Creates a student record and its `student` login account. The account's
/// password is the configured temporary password.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Asha Rao", "rollNo": "CS101", "email": "a@b.com",
///   "department": "Computer Science", "year": 2, "section": "A",
///   "phone": "9876543210", "address": "12 Hill Road",
///   "attendance": { "present": 0, "total": 0 },
///   "marks": [ { "subject": "Math", "score": 80 } ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the record
/// - `400 Bad Request` with the joined validation messages, or
///   `Email already exists` / `Roll number already exists`
pub async fn create_student(
    State(app_state): State<AppState>,
    body: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match StudentService::create(app_state.db(), req).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StudentRecord::from(student),
                "Student created successfully",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
