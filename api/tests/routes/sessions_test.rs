#[cfg(test)]
mod tests {
    use crate::helpers::app::{make_test_app, send};
    use axum::{Router, http::StatusCode};
    use db::models::check_out;
    use sea_orm::EntityTrait;
    use serde_json::json;

    struct Ids {
        quarter: i64,
        session: i64,
        student: i64,
    }

    async fn seed(app: &Router) -> Ids {
        let (_, json) = send(
            app,
            "POST",
            "/api/quarters",
            Some(json!({ "name": "Winter 2026", "start_date": "2026-01-05", "end_date": "2026-03-20" })),
        )
        .await;
        let quarter = json["data"]["id"].as_i64().unwrap();

        let (_, json) = send(
            app,
            "POST",
            &format!("/api/quarters/{quarter}/sessions"),
            Some(json!({
                "session_number": 1,
                "session_date": "2026-01-12",
                "start_time": "09:00:00",
                "end_time": "11:00:00"
            })),
        )
        .await;
        let session = json["data"]["id"].as_i64().unwrap();

        let (_, json) = send(
            app,
            "POST",
            "/api/students",
            Some(json!({
                "full_name": "Ada Lovelace",
                "email": "ada@example.com",
                "student_id": "S001",
                "quarter_id": quarter
            })),
        )
        .await;
        let student = json["data"]["id"].as_i64().unwrap();

        Ids {
            quarter,
            session,
            student,
        }
    }

    #[tokio::test]
    async fn late_check_in_and_checkout_flow_into_summary() {
        let (app, state) = make_test_app().await;
        let ids = seed(&app).await;
        let base = format!("/api/sessions/{}", ids.session);

        let (status, json) = send(
            &app,
            "POST",
            &format!("{base}/check-ins"),
            Some(json!({ "user_id": ids.student, "status": "late", "observed_at": "2026-01-12T09:20:30Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "late");
        assert_eq!(json["data"]["minutes_late"], 20);

        let (status, _) = send(
            &app,
            "POST",
            &format!("{base}/check-outs"),
            Some(json!({ "user_id": ids.student, "at": "2026-01-12T09:40:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(
            &app,
            "POST",
            &format!("{base}/check-outs"),
            Some(json!({ "user_id": ids.student, "at": "2026-01-12T09:45:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let (status, json) = send(
            &app,
            "POST",
            &format!("{base}/check-outs/close"),
            Some(json!({ "user_id": ids.student, "at": "2026-01-12T09:50:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["duration_minutes"], 10);

        let (status, json) = send(
            &app,
            "POST",
            &format!("{base}/check-outs/close"),
            Some(json!({ "user_id": ids.student, "at": "2026-01-12T10:00:00Z" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "No open checkout to close");

        let rows = check_out::Entity::find().all(state.db()).await.unwrap();
        assert_eq!(rows.len(), 1);

        let (status, json) = send(&app, "GET", &format!("{base}/summary"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["session"]["quarter_id"], ids.quarter);
        let row = &json["data"]["students"][0];
        assert_eq!(row["full_name"], "Ada Lovelace");
        assert_eq!(row["total_absence_minutes"], 30);
        assert_eq!(row["time_remaining"], 15);
        assert_eq!(row["status"], "warning");
        assert_eq!(row["is_currently_checked_out"], false);
    }

    #[tokio::test]
    async fn unknown_status_is_a_bad_request() {
        let (app, _) = make_test_app().await;
        let ids = seed(&app).await;

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/sessions/{}/check-ins", ids.session),
            Some(json!({ "user_id": ids.student, "status": "present" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn contributions_can_be_added_edited_and_deleted() {
        let (app, _) = make_test_app().await;
        let ids = seed(&app).await;

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/sessions/{}/contributions", ids.session),
            Some(json!({ "user_id": ids.student, "quality": "low", "notes": "answered a question" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/contributions/{id}"),
            Some(json!({ "quality": "high" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["quality"], "high");

        let (_, json) = send(&app, "GET", &format!("/api/sessions/{}/summary", ids.session), None).await;
        assert_eq!(json["data"]["students"][0]["contribution_count"], 1);
        assert_eq!(json["data"]["students"][0]["average_contribution_quality"], 5.0);

        let (status, _) = send(&app, "DELETE", &format!("/api/contributions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("/api/contributions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = send(&app, "GET", &format!("/api/sessions/{}/summary", ids.session), None).await;
        assert_eq!(json["data"]["students"][0]["contribution_count"], 0);
        assert!(json["data"]["students"][0]["average_contribution_quality"].is_null());
    }

    #[tokio::test]
    async fn completing_and_deleting_a_session() {
        let (app, _) = make_test_app().await;
        let ids = seed(&app).await;
        let base = format!("/api/sessions/{}", ids.session);

        let (status, json) = send(&app, "PUT", &format!("{base}/completed"), Some(json!({ "completed": true }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["is_completed"], true);

        let (status, _) = send(&app, "DELETE", &base, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &base, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
