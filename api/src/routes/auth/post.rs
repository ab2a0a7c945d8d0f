use crate::auth::generate_jwt;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{format_validation_errors, validation::EMAIL_REGEX};
use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::user_service::UserService;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(regex(path = *EMAIL_REGEX, message = "Please add a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please add a password"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub student_id: Option<i64>,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Exchanges an email and password for a bearer token.
///
/// ### Request Body
/// ```json
/// { "email": "admin@college.com", "password": "Admin@123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ id, email, role, studentId, token, expiresAt }`
/// - `400 Bad Request` when the body is malformed or fails validation
/// - `401 Unauthorized` with `Invalid credentials`
pub async fn login(
    State(app_state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let user = match UserService::verify_credentials(app_state.db(), &req.email, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(email = %req.email, "login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<Empty>::error("Invalid credentials")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "login lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Database error")),
            )
                .into_response();
        }
    };

    let (token, expires_at) = match generate_jwt(&user) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "token encoding failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to issue token")),
            )
                .into_response();
        }
    };

    let response = LoginResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        student_id: user.student_id,
        token,
        expires_at,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    )
        .into_response()
}
