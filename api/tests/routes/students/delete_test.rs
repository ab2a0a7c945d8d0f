#[cfg(test)]
mod tests {
    use crate::helpers::app::{admin_token, student_body, student_with_token};
    use crate::helpers::{get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use db::models::user::Model as UserModel;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, token: &str) -> Request<AxumBody> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(AxumBody::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn delete_removes_record_and_account() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(request("DELETE", &format!("/api/students/{}", student.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], json!({}));

        assert!(UserModel::find_by_email(app_state.db(), "a@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn delete_of_missing_record_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let response = app
            .oneshot(request("DELETE", "/api/students/77", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn delete_with_non_numeric_id_gets_json_error() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let response = app
            .oneshot(request("DELETE", "/api/students/abc", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid student id");
    }

    #[tokio::test]
    #[serial]
    async fn student_cannot_delete() {
        let (app, app_state) = make_test_app().await;
        let (student, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(request("DELETE", &format!("/api/students/{}", student.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    /// Create, read back, delete, then read again.
    #[tokio::test]
    #[serial]
    async fn create_read_delete_round() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let create = Request::builder()
            .method("POST")
            .uri("/api/students")
            .header("Authorization", format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(
                serde_json::to_vec(&student_body("CS101", "a@b.com")).unwrap(),
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = get_json_body(response).await["data"].clone();
        let uri = format!("/api/students/{}", created["id"]);

        let response = app.clone().oneshot(request("GET", &uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_json_body(response).await["data"], created);

        let response = app.clone().oneshot(request("DELETE", &uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_json_body(response).await["data"], json!({}));

        let response = app.oneshot(request("GET", &uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
