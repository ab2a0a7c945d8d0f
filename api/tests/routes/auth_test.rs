#[cfg(test)]
mod tests {
    use crate::helpers::app::{admin_token, student_with_token};
    use crate::helpers::{get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use db::models::user::{Model as UserModel, Role};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn login_request(email: &str, password: &str) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(
                serde_json::to_vec(&json!({"email": email, "password": password})).unwrap(),
            ))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn admin_login_returns_token() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(app_state.db(), "admin@college.com", "Admin@123", Role::Admin, None)
            .await
            .unwrap();

        let response = app
            .oneshot(login_request("admin@college.com", "Admin@123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["role"], "admin");
        assert!(json["data"]["studentId"].is_null());
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expiresAt"].as_str().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn student_logs_in_with_temporary_password() {
        let (app, app_state) = make_test_app().await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(login_request("a@b.com", "changeme123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["role"], "student");
        assert_eq!(json["data"]["studentId"], student.id);
    }

    #[tokio::test]
    #[serial]
    async fn wrong_password_is_unauthorized() {
        let (app, app_state) = make_test_app().await;
        UserModel::create(app_state.db(), "admin@college.com", "Admin@123", Role::Admin, None)
            .await
            .unwrap();

        let response = app
            .oneshot(login_request("admin@college.com", "guess"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[tokio::test]
    #[serial]
    async fn malformed_email_is_rejected_before_lookup() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(login_request("not-an-email", "whatever"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Please add a valid email");
    }

    #[tokio::test]
    #[serial]
    async fn me_returns_current_account() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/auth/me")
            .header("Authorization", format!("Bearer {token}"))
            .body(AxumBody::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["email"], "admin@college.com");
        assert_eq!(json["data"]["role"], "admin");
        assert!(json["data"].get("passwordHash").is_none());
    }

    #[tokio::test]
    #[serial]
    async fn me_without_token_is_unauthorized() {
        let (app, _) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/auth/me")
            .body(AxumBody::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
