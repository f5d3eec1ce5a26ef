#[cfg(test)]
mod tests {
    use crate::helpers::app::{make_test_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    fn winter() -> serde_json::Value {
        json!({ "name": "Winter 2026", "start_date": "2026-01-05", "end_date": "2026-03-20" })
    }

    #[tokio::test]
    async fn create_and_fetch_quarter() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "POST", "/api/quarters", Some(winter())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "Winter 2026");
        assert_eq!(json["data"]["lifecycle"], "active");
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(&app, "GET", &format!("/api/quarters/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["start_date"], "2026-01-05");
    }

    #[tokio::test]
    async fn inverted_dates_are_a_bad_request() {
        let (app, _) = make_test_app().await;
        let body = json!({ "name": "Backwards", "start_date": "2026-03-20", "end_date": "2026-01-05" });

        let (status, json) = send(&app, "POST", "/api/quarters", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "End date must not be before start date");
    }

    #[tokio::test]
    async fn unknown_quarter_is_not_found() {
        let (app, _) = make_test_app().await;
        let (status, json) = send(&app, "GET", "/api/quarters/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn delete_hides_and_restore_brings_back() {
        let (app, _) = make_test_app().await;
        let (_, json) = send(&app, "POST", "/api/quarters", Some(winter())).await;
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(&app, "DELETE", &format!("/api/quarters/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["lifecycle"]["deleted"].is_string());

        let (_, json) = send(&app, "GET", "/api/quarters", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (_, json) = send(&app, "GET", "/api/quarters?include_deleted=true", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) = send(&app, "POST", &format!("/api/quarters/{id}/restore"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["lifecycle"], "active");
    }

    #[tokio::test]
    async fn duplicate_session_number_is_a_conflict() {
        let (app, _) = make_test_app().await;
        let (_, json) = send(&app, "POST", "/api/quarters", Some(winter())).await;
        let id = json["data"]["id"].as_i64().unwrap();
        let session = json!({
            "session_number": 1,
            "session_date": "2026-01-12",
            "start_time": "09:00:00",
            "end_time": "11:00:00"
        });

        let uri = format!("/api/quarters/{id}/sessions");
        let (status, _) = send(&app, "POST", &uri, Some(session.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, json) = send(&app, "POST", &uri, Some(session)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let (_, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_quarter_report_is_unknown() {
        let (app, _) = make_test_app().await;
        let (_, json) = send(&app, "POST", "/api/quarters", Some(winter())).await;
        let id = json["data"]["id"].as_i64().unwrap();
        let student = json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "student_id": "S001",
            "quarter_id": id
        });
        send(&app, "POST", "/api/students", Some(student)).await;

        let (status, json) = send(&app, "GET", &format!("/api/quarters/{id}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        let row = &json["data"]["attendance"][0];
        assert_eq!(row["attendance_percentage"], 0.0);
        assert_eq!(row["attendance_status"], "unknown");
        assert_eq!(row["total_sessions_in_quarter"], 0);
        let contributions = &json["data"]["contributions"][0];
        assert_eq!(contributions["total_sessions_in_quarter"], 0);
        assert_eq!(contributions["high_quality_count"], 0);
        assert_eq!(json["data"]["overview"]["total_students"], 1);

        let (_, json) = send(&app, "GET", "/api/quarters/overview", None).await;
        assert_eq!(json["data"][0]["stats"]["total_sessions"], 0);
    }
}
