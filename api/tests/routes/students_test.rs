#[cfg(test)]
mod tests {
    use crate::helpers::app::{make_test_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    fn ada() -> serde_json::Value {
        json!({ "full_name": "Ada Lovelace", "email": "ada@example.com", "student_id": "S001" })
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "POST", "/api/students", Some(ada())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["lifecycle"], "active");

        let (status, json) = send(&app, "POST", "/api/students", Some(ada())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn malformed_email_is_a_bad_request() {
        let (app, _) = make_test_app().await;
        let body = json!({ "full_name": "Ada Lovelace", "email": "nope", "student_id": "S001" });

        let (status, json) = send(&app, "POST", "/api/students", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Email address is invalid");
    }

    #[tokio::test]
    async fn enrollment_lifecycle() {
        let (app, _) = make_test_app().await;
        let mut quarters = Vec::new();
        for (name, start, end) in [
            ("Winter 2026", "2026-01-05", "2026-03-20"),
            ("Spring 2026", "2026-04-01", "2026-06-12"),
        ] {
            let (_, json) = send(
                &app,
                "POST",
                "/api/quarters",
                Some(json!({ "name": name, "start_date": start, "end_date": end })),
            )
            .await;
            quarters.push(json["data"]["id"].as_i64().unwrap());
        }
        let (_, json) = send(&app, "POST", "/api/students", Some(ada())).await;
        let id = json["data"]["id"].as_i64().unwrap();
        let enrollments = format!("/api/students/{id}/enrollments");

        let (status, _) = send(&app, "POST", &enrollments, Some(json!({ "quarter_id": quarters[0] }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&app, "POST", &enrollments, Some(json!({ "quarter_id": quarters[0] }))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, "PUT", &enrollments, Some(json!({ "quarter_id": quarters[1] }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, json) = send(&app, "GET", &enrollments, None).await;
        assert_eq!(json["data"], json!([quarters[1]]));

        let (_, json) = send(&app, "GET", &format!("/api/students?quarter_id={}", quarters[1]), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &format!("{enrollments}/{}", quarters[1]), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("{enrollments}/{}", quarters[1]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleted_student_disappears_from_listing() {
        let (app, _) = make_test_app().await;
        let (_, json) = send(&app, "POST", "/api/students", Some(ada())).await;
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, _) = send(&app, "DELETE", &format!("/api/students/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&app, "GET", "/api/students", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
        let (status, _) = send(&app, "GET", &format!("/api/students/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
