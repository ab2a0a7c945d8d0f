use api::auth::{generate_jwt, middleware::log_request};
use api::routes::routes;
use axum::{Router, middleware::from_fn, response::Response};
use common::students::CreateStudentRequest;
use db::models::{
    student::Model as StudentModel,
    user::{Model as UserModel, Role},
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::student_service::StudentService;
use tempfile::TempDir;
use util::{config::AppConfig, state::AppState, test_helpers::setup_test_storage_root};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Router mounted exactly like the binary mounts it, over a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_student_temp_password("changeme123");

    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .layer(from_fn(log_request));

    (app, app_state)
}

/// Same as [`make_test_app`], with uploads going to a temporary storage root.
pub async fn make_test_app_with_storage() -> (Router, AppState, TempDir) {
    let tmp = setup_test_storage_root();
    let (app, app_state) = make_test_app().await;
    (app, app_state, tmp)
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn admin_token(app_state: &AppState) -> String {
    let admin = UserModel::create(app_state.db(), "admin@college.com", "Admin@123", Role::Admin, None)
        .await
        .expect("Failed to create admin");
    generate_jwt(&admin).expect("Failed to sign token").0
}

pub fn student_body(roll_no: &str, email: &str) -> Value {
    serde_json::json!({
        "name": "Asha Rao",
        "rollNo": roll_no,
        "email": email,
        "department": "Computer Science",
        "year": 2,
        "section": "A",
        "phone": "9876543210",
        "address": "12 Hill Road"
    })
}

/// Creates a student through the service and returns it with a token for its account.
pub async fn student_with_token(app_state: &AppState, roll_no: &str, email: &str) -> (StudentModel, String) {
    let req: CreateStudentRequest = serde_json::from_value(student_body(roll_no, email)).unwrap();
    let student = StudentService::create(app_state.db(), req)
        .await
        .expect("Failed to create student");
    let account = UserModel::find_by_student_id(app_state.db(), student.id)
        .await
        .unwrap()
        .expect("student account");
    let token = generate_jwt(&account).expect("Failed to sign token").0;
    (student, token)
}
