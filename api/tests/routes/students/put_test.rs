#[cfg(test)]
mod tests {
    use crate::helpers::app::{admin_token, student_with_token};
    use crate::helpers::{get_json_body, make_test_app, make_test_app_with_storage};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use db::models::user::Model as UserModel;
    use serde_json::{Value, json};
    use serial_test::serial;
    use services::student_service::MAX_PHOTO_SIZE;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----student-form-boundary";

    fn put_json(id: i64, token: &str, body: &Value) -> Request<AxumBody> {
        Request::builder()
            .method("PUT")
            .uri(format!("/api/students/{id}"))
            .header("Authorization", format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    /// Builds a multipart body from text fields and an optional `profilePhoto` file.
    fn form_body(fields: &[(&str, &str)], photo: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, content_type, bytes)) = photo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"profilePhoto\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn put_form(id: i64, token: &str, body: Vec<u8>) -> Request<AxumBody> {
        Request::builder()
            .method("PUT")
            .uri(format!("/api/students/{id}"))
            .header("Authorization", format!("Bearer {token}"))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(AxumBody::from(body))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn json_update_changes_only_sent_fields() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let body = json!({"section": "C", "attendance": {"present": 3, "total": 4}});
        let response = app.oneshot(put_json(student.id, &token, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["section"], "C");
        assert_eq!(json["data"]["name"], "Asha Rao");
        assert_eq!(json["data"]["attendancePercentage"], "75.00");
    }

    #[tokio::test]
    #[serial]
    async fn email_change_moves_the_login_too() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let body = json!({"email": "asha@college.com"});
        let response = app.oneshot(put_json(student.id, &token, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let account = UserModel::find_by_student_id(app_state.db(), student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.email, "asha@college.com");
    }

    #[tokio::test]
    #[serial]
    async fn empty_update_returns_record_unchanged() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(put_json(student.id, &token, &json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_json_body(response).await["data"]["rollNo"], "CS101");
    }

    #[tokio::test]
    #[serial]
    async fn update_of_missing_record_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let response = app
            .oneshot(put_json(4242, &token, &json!({"section": "B"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(get_json_body(response).await["message"], "Student not found");
    }

    #[tokio::test]
    #[serial]
    async fn invalid_field_is_rejected() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(put_json(student.id, &token, &json!({"year": 0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_json_body(response).await["message"],
            "Year must be between 1 and 4"
        );
    }

    #[tokio::test]
    #[serial]
    async fn update_with_non_numeric_id_gets_json_error() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let request = Request::builder()
            .method("PUT")
            .uri("/api/students/abc")
            .header("Authorization", format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(r#"{"section":"B"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid student id");
    }

    #[tokio::test]
    #[serial]
    async fn email_taken_by_admin_login_is_rejected_without_changes() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(put_json(student.id, &token, &json!({"email": "admin@college.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_json_body(response).await["message"], "Email already exists");

        let account = UserModel::find_by_student_id(app_state.db(), student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.email, "a@b.com");
        let record = services::student_service::StudentService::find(app_state.db(), student.id)
            .await
            .unwrap();
        assert_eq!(record.email, "a@b.com");
    }

    #[tokio::test]
    #[serial]
    async fn student_cannot_update_even_own_record() {
        let (app, app_state) = make_test_app().await;
        let (student, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(put_json(student.id, &token, &json!({"section": "D"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn multipart_update_stores_photo_and_serves_it() {
        let (app, app_state, _tmp) = make_test_app_with_storage().await;
        let token = admin_token(&app_state).await;
        let (student, student_token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let png: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let body = form_body(
            &[("section", "B"), ("year", "3"), ("marks", r#"[{"subject":"Math","score":70}]"#)],
            Some(("me.png", "image/png", png)),
        );

        let response = app
            .clone()
            .oneshot(put_form(student.id, &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["section"], "B");
        assert_eq!(json["data"]["year"], 3);
        assert_eq!(json["data"]["averageMarks"], "70.00");
        let photo = json["data"]["profilePhoto"].as_str().unwrap();
        assert!(photo.starts_with("photo_") && photo.ends_with(".png"), "{photo}");

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/students/{}/photo", student.id))
            .header("Authorization", format!("Bearer {student_token}"))
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "image/png");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], png);
    }

    #[tokio::test]
    #[serial]
    async fn multipart_rejects_unsupported_file_type() {
        let (app, app_state, _tmp) = make_test_app_with_storage().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let body = form_body(&[], Some(("cv.pdf", "application/pdf", b"%PDF-1.7")));
        let response = app.oneshot(put_form(student.id, &token, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_json_body(response).await["message"],
            "File type not supported"
        );
    }

    #[tokio::test]
    #[serial]
    async fn multipart_rejects_oversized_photo() {
        let (app, app_state, _tmp) = make_test_app_with_storage().await;
        let token = admin_token(&app_state).await;
        let (student, _) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let huge = vec![0u8; MAX_PHOTO_SIZE + 1];
        let body = form_body(&[], Some(("big.jpg", "image/jpeg", &huge)));
        let response = app.oneshot(put_form(student.id, &token, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_json_body(response).await["message"], "File too large");
    }
}
