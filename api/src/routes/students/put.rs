use super::common::{bad_id, bad_request, error_response};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Request, State, rejection::PathRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use common::students::{StudentRecord, UpdateStudentRequest};
use serde_json::{Map, Value};
use services::student_service::{PhotoUpload, StudentService};
use util::state::AppState;

/// PUT /api/students/{id}
///
/// Partial update. Accepts either a JSON body or `multipart/form-data`.
///
/// In the multipart form every field is text: `year` as digits, `attendance`
/// and `marks` as JSON. A file in the `profilePhoto` field (jpeg, png or gif,
/// at most 2 MB) is stored and its filename written to `profilePhoto`.
///
/// ### Responses
/// - `200 OK` with the updated record (unchanged when no field was sent)
/// - `400 Bad Request` with the joined validation messages, a duplicate
///   key message, `File type not supported` or `File too large`
/// - `404 Not Found` with `Student not found`
pub async fn update_student(
    State(app_state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    req: Request,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_id(rejection),
    };

    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let (changes, photo) = if is_multipart {
        let multipart = match Multipart::from_request(req, &app_state).await {
            Ok(m) => m,
            Err(rejection) => return bad_request(rejection.body_text()),
        };
        match read_form(multipart).await {
            Ok(parsed) => parsed,
            Err(message) => return bad_request(message),
        }
    } else {
        match Json::<UpdateStudentRequest>::from_request(req, &app_state).await {
            Ok(Json(changes)) => (changes, None),
            Err(rejection) => return bad_request(rejection.body_text()),
        }
    };

    match StudentService::update(app_state.db(), id, changes, photo).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentRecord::from(student),
                "Student updated successfully",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Collects the text fields into an update body and pulls out the photo file.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(UpdateStudentRequest, Option<PhotoUpload>), String> {
    let mut fields = Map::new();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "profilePhoto" && field.file_name().is_some() {
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await.map_err(|e| e.body_text())?;
            photo = Some(PhotoUpload {
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let text = field.text().await.map_err(|e| e.body_text())?;
        let value = form_value(&name, text)?;
        fields.insert(name, value);
    }

    let changes = serde_json::from_value(Value::Object(fields))
        .map_err(|e| format!("Invalid form data: {e}"))?;

    Ok((changes, photo))
}

fn form_value(name: &str, text: String) -> Result<Value, String> {
    match name {
        "year" => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| "Year must be between 1 and 4".to_string()),
        "attendance" | "marks" => {
            serde_json::from_str(&text).map_err(|_| format!("Invalid {name} data"))
        }
        _ => Ok(Value::String(text)),
    }
}
