#[cfg(test)]
mod tests {
    use crate::helpers::app::{admin_token, student_with_token};
    use crate::helpers::{get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::ServiceExt;

    fn get(uri: &str, token: Option<&str>) -> Request<AxumBody> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(AxumBody::empty()).unwrap()
    }

    // --- GET /api/students ---

    #[tokio::test]
    #[serial]
    async fn list_requires_a_token() {
        let (app, _) = make_test_app().await;

        let response = app.oneshot(get("/api/students", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn list_rejects_a_forged_token() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(get("/api/students", Some("not.a.jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn list_returns_every_record_with_count() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        student_with_token(&app_state, "CS101", "a@b.com").await;
        student_with_token(&app_state, "CS102", "c@d.com").await;

        let response = app
            .oneshot(get("/api/students", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data[0]["rollNo"], "CS101");
        assert_eq!(data[1]["rollNo"], "CS102");
        assert_eq!(data[0]["attendancePercentage"], 0);
        assert_eq!(data[0]["averageMarks"], 0);
    }

    #[tokio::test]
    #[serial]
    async fn students_may_list_too() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(get("/api/students", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_json_body(response).await["count"], 1);
    }

    // --- GET /api/students/{id} ---

    #[tokio::test]
    #[serial]
    async fn admin_reads_any_record() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(get(&format!("/api/students/{}", student.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["id"], student.id);
        assert_eq!(json["data"]["email"], "a@b.com");
        assert_eq!(json["data"]["profilePhoto"], "default.jpg");
    }

    #[tokio::test]
    #[serial]
    async fn student_reads_own_record() {
        let (app, app_state) = make_test_app().await;
        let (student, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(get(&format!("/api/students/{}", student.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_json_body(response).await["data"]["rollNo"], "CS101");
    }

    #[tokio::test]
    #[serial]
    async fn student_cannot_read_another_record() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = student_with_token(&app_state, "CS101", "a@b.com").await;
        let (other, _) = student_with_token(&app_state, "CS102", "c@d.com").await;

        let response = app
            .oneshot(get(&format!("/api/students/{}", other.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = get_json_body(response).await;
        assert_eq!(
            json["message"],
            "Not authorized to access this student's information"
        );
    }

    #[tokio::test]
    #[serial]
    async fn missing_record_is_not_found_for_every_role() {
        let (app, app_state) = make_test_app().await;
        let admin = admin_token(&app_state).await;
        let (_, student) = student_with_token(&app_state, "CS101", "a@b.com").await;

        for token in [admin, student] {
            let response = app
                .clone()
                .oneshot(get("/api/students/9999", Some(&token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(get_json_body(response).await["message"], "Student not found");
        }
    }

    // --- GET /api/students/{id}/photo ---

    #[tokio::test]
    #[serial]
    async fn non_numeric_id_gets_json_error() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        for uri in ["/api/students/abc", "/api/students/abc/photo"] {
            let response = app.clone().oneshot(get(uri, Some(&token))).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = get_json_body(response).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "Invalid student id");
        }
    }

    #[tokio::test]
    #[serial]
    async fn default_photo_is_not_served() {
        let (app, app_state) = make_test_app().await;
        let (student, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(get(&format!("/api/students/{}/photo", student.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_json_body(response).await["message"],
            "Profile photo not found"
        );
    }
}
