use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use db::models::user::{Entity as UserEntity, Role};
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub student_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// GET /api/auth/me
///
/// Returns the account behind the bearer token. `404` if it has since been deleted.
pub async fn get_me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> Response {
    match UserEntity::find_by_id(claims.sub).one(app_state.db()).await {
        Ok(Some(user)) => {
            let me = MeResponse {
                id: user.id,
                email: user.email,
                role: user.role,
                student_id: user.student_id,
                created_at: user.created_at,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(me, "User data retrieved successfully")),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("User not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "failed to load current user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Database error")),
            )
                .into_response()
        }
    }
}
