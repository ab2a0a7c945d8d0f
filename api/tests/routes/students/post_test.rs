#[cfg(test)]
mod tests {
    use crate::helpers::app::{admin_token, student_body, student_with_token};
    use crate::helpers::{get_json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use db::models::user::{Model as UserModel, Role};
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn post(token: &str, body: &Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri("/api/students")
            .header("Authorization", format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn admin_creates_student_and_account() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let mut body = student_body("CS101", "a@b.com");
        body["attendance"] = json!({"present": 3, "total": 4});
        body["marks"] = json!([{"subject": "Math", "score": 80}, {"subject": "Sci", "score": 100}]);

        let response = app.oneshot(post(&token, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["rollNo"], "CS101");
        assert_eq!(json["data"]["attendancePercentage"], "75.00");
        assert_eq!(json["data"]["averageMarks"], "90.00");
        assert_eq!(json["data"]["profilePhoto"], "default.jpg");

        let id = json["data"]["id"].as_i64().unwrap();
        let account = UserModel::find_by_student_id(app_state.db(), id)
            .await
            .unwrap()
            .expect("companion account");
        assert_eq!(account.role, Role::Student);
        assert_eq!(account.email, "a@b.com");
    }

    #[tokio::test]
    #[serial]
    async fn student_cannot_create() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(post(&token, &student_body("CS102", "c@d.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            get_json_body(response).await["message"],
            "Not authorized to access this route"
        );
    }

    #[tokio::test]
    #[serial]
    async fn email_collision_reported_even_when_roll_number_collides() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(post(&token, &student_body("CS101", "a@b.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_json_body(response).await["message"], "Email already exists");
    }

    #[tokio::test]
    #[serial]
    async fn roll_number_collision_alone() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;
        student_with_token(&app_state, "CS101", "a@b.com").await;

        let response = app
            .oneshot(post(&token, &student_body("CS101", "fresh@b.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_json_body(response).await["message"],
            "Roll number already exists"
        );
    }

    #[tokio::test]
    #[serial]
    async fn validation_messages_are_joined() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let mut body = student_body("CS101", "a@b.com");
        body["email"] = json!("nope");
        body["year"] = json!(9);

        let response = app.oneshot(post(&token, &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(
            json["message"],
            "Please add a valid email, Year must be between 1 and 4"
        );
    }

    #[tokio::test]
    #[serial]
    async fn malformed_json_is_a_bad_request() {
        let (app, app_state) = make_test_app().await;
        let token = admin_token(&app_state).await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/students")
            .header("Authorization", format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .body(AxumBody::from("{\"name\": "))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_json_body(response).await["success"], false);
    }
}
