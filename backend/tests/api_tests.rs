//! HTTP-level tests for the REST surface over the in-memory store.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::fixtures::{
    attendance_record, booking, certification_upload, future_date, other_veteran, reviewer,
    veteran,
};
use common::TestContext;

// ===========================================================================
// Generic collections
// ===========================================================================

#[tokio::test]
async fn test_empty_collection_lists_as_empty_array() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_then_get_and_list_in_insertion_order() {
    let ctx = TestContext::new();

    let (status, ack) = ctx
        .post("/api/skills", None, json!({"name": "Logistics"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["acknowledged"], true);
    let id = ack["insertedId"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok(), "server id should be a UUID");

    ctx.post("/api/skills", None, json!({"id": "skill-b", "name": "Radio"}))
        .await;

    let (status, doc) = ctx.get(&format!("/api/skills/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["name"], "Logistics");

    let (_, list) = ctx.get("/api/skills", None).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Logistics", "Radio"]);
}

#[tokio::test]
async fn test_client_supplied_id_kept_and_duplicate_conflicts() {
    let ctx = TestContext::new();
    let (_, ack) = ctx
        .post("/api/settings", None, json!({"id": "set9", "key": "theme"}))
        .await;
    assert_eq!(ack["insertedId"], "set9");

    let (status, body) = ctx
        .post("/api/settings", None, json!({"id": "set9", "key": "other"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let ctx = TestContext::new();
    let (status, body) = ctx.post("/api/users", None, json!([1, 2, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_merges_shallowly_and_keeps_id() {
    let ctx = TestContext::seeded().await;
    let (status, doc) = ctx
        .put(
            "/api/users/u5",
            None,
            json!({"id": "hijack", "progress": 75, "rank": "Chief"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["id"], "u5");
    assert_eq!(doc["progress"], 75);
    assert_eq!(doc["rank"], "Chief");
    assert_eq!(doc["name"], "James Wilson");
}

#[tokio::test]
async fn test_missing_document_is_404() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/courses/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = ctx.put("/api/courses/nope", None, json!({"x": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forum_posts_served_under_slug() {
    let ctx = TestContext::seeded().await;
    let (status, posts) = ctx.get("/api/forum-posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts.as_array().unwrap().len(), 2);
}

// ===========================================================================
// Certification workflow
// ===========================================================================

#[tokio::test]
async fn test_veteran_upload_starts_pending_with_single_entry() {
    let ctx = TestContext::new();
    let mut body = certification_upload("CompTIA Network+");
    body["auditTrail"] = json!([{"id": "x", "action": "Approved", "date": "2020-01-01", "actor": "me"}]);
    body["veteranId"] = json!("someone-else");

    let (status, ack) = ctx
        .post("/api/certifications", Some(&veteran()), body)
        .await;
    assert_eq!(status, StatusCode::OK);

    let id = ack["insertedId"].as_str().unwrap();
    let (_, doc) = ctx.get(&format!("/api/certifications/{id}"), None).await;
    assert_eq!(doc["status"], "pending-review");
    assert_eq!(doc["veteranId"], "u1");
    let trail = doc["auditTrail"].as_array().unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0]["action"], "Uploaded");
    assert_eq!(trail[0]["actor"], "Alex Thompson");
}

#[tokio::test]
async fn test_submit_rules() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post("/api/certifications", Some(&reviewer()), certification_upload("PMP"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut completed = certification_upload("PMP");
    completed["status"] = json!("completed");
    let (status, _) = ctx
        .post("/api/certifications", Some(&veteran()), completed)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut planned = certification_upload("AWS SAA");
    planned["status"] = json!("planned");
    let (status, ack) = ctx
        .post("/api/certifications", Some(&veteran()), planned)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, doc) = ctx
        .get(&format!("/api/certifications/{}", ack["insertedId"].as_str().unwrap()), None)
        .await;
    assert_eq!(doc["auditTrail"][0]["action"], "Planned");
}

#[tokio::test]
async fn test_approve_appends_entry_and_second_approve_conflicts() {
    let ctx = TestContext::seeded().await;

    let (status, doc) = ctx
        .post(
            "/api/certifications/cert2/approve",
            Some(&reviewer()),
            json!({"comment": "Verified with CompTIA"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["status"], "completed");
    let trail = doc["auditTrail"].as_array().unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[1]["action"], "Approved");
    assert_eq!(trail[1]["actor"], "Maj. Robert Sterling");
    assert_eq!(trail[1]["comment"], "Verified with CompTIA");

    let (status, body) = ctx
        .post("/api/certifications/cert2/approve", Some(&reviewer()), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, after) = ctx.get("/api/certifications/cert2", None).await;
    assert_eq!(after["auditTrail"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_reject_is_distinct_status() {
    let ctx = TestContext::seeded().await;
    let (status, doc) = ctx
        .post("/api/certifications/cert3/reject", Some(&reviewer()), json!({"comment": "Blurry scan"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["status"], "rejected");
    assert_eq!(doc["auditTrail"][1]["action"], "Rejected");
}

#[tokio::test]
async fn test_review_actions_need_a_reviewer() {
    let ctx = TestContext::seeded().await;

    let (status, _) = ctx
        .post("/api/certifications/cert2/approve", None, json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .post("/api/certifications/cert2/approve", Some(&veteran()), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, doc) = ctx.get("/api/certifications/cert2", None).await;
    assert_eq!(doc["status"], "pending");
    assert_eq!(doc["auditTrail"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_expire_only_from_completed() {
    let ctx = TestContext::seeded().await;

    let (status, _) = ctx
        .post("/api/certifications/cert2/expire", Some(&reviewer()), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // cert1 is seeded with the legacy `active` status.
    let (status, doc) = ctx
        .post("/api/certifications/cert1/expire", Some(&reviewer()), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["status"], "expired");
    assert_eq!(doc["auditTrail"].as_array().unwrap().last().unwrap()["action"], "Expired");
}

#[tokio::test]
async fn test_approve_without_body_is_accepted() {
    let ctx = TestContext::seeded().await;
    let request = common::request(
        axum::http::Method::POST,
        "/api/certifications/cert3/approve",
        Some(&reviewer()),
        None,
    );
    let (status, doc) = ctx.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["auditTrail"][1].get("comment").is_none());
}

#[tokio::test]
async fn test_list_visibility_by_role() {
    let ctx = TestContext::seeded().await;

    let (_, mine) = ctx.get("/api/certifications", Some(&veteran())).await;
    let ids: Vec<&str> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["cert1", "cert2"]);

    let (_, theirs) = ctx.get("/api/certifications", Some(&other_veteran())).await;
    assert_eq!(theirs.as_array().unwrap().len(), 1);

    let (_, all) = ctx.get("/api/certifications", Some(&reviewer())).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, anonymous) = ctx.get("/api/certifications", None).await;
    assert_eq!(anonymous.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_by_id_follows_list_visibility() {
    let ctx = TestContext::seeded().await;

    let (status, _) = ctx.get("/api/certifications/cert1", Some(&other_veteran())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, doc) = ctx.get("/api/certifications/cert1", Some(&veteran())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["veteranId"], "u1");

    let (status, _) = ctx.get("/api/certifications/cert1", Some(&reviewer())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_and_approved_details_cannot_be_rewritten() {
    let ctx = TestContext::seeded().await;
    ctx.post("/api/certifications/cert2/approve", Some(&reviewer()), json!({}))
        .await;

    let (status, _) = ctx
        .put(
            "/api/certifications/cert2",
            Some(&veteran()),
            json!({"name": "CISSP", "issuer": "ISC2", "veteranId": "u2"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .put("/api/certifications/cert2", Some(&veteran()), json!({"name": "CISSP", "issuer": "ISC2"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .put("/api/certifications/cert2", None, json!({"veteranId": "u9"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, doc) = ctx.get("/api/certifications/cert2", Some(&reviewer())).await;
    assert_eq!(doc["veteranId"], "u1");
    assert_ne!(doc["name"], "CISSP");
    assert_eq!(doc["auditTrail"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_update_goes_through_transition_rules() {
    let ctx = TestContext::new();
    let mut planned = certification_upload("Security+");
    planned["status"] = json!("planned");
    let (_, ack) = ctx
        .post("/api/certifications", Some(&veteran()), planned)
        .await;
    let uri = format!("/api/certifications/{}", ack["insertedId"].as_str().unwrap());

    let (status, doc) = ctx
        .put(&uri, Some(&veteran()), json!({"status": "in-progress"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["auditTrail"][1]["action"], "Started");

    let (status, _) = ctx
        .put(&uri, Some(&other_veteran()), json!({"status": "pending-review"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .put(&uri, Some(&veteran()), json!({"status": "completed"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = ctx
        .put(&uri, None, json!({"status": "pending-review"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .put(&uri, Some(&veteran()), json!({"auditTrail": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, doc) = ctx
        .put(&uri, Some(&veteran()), json!({"status": "pending-review", "issuer": "CompTIA Inc"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["status"], "pending-review");
    assert_eq!(doc["issuer"], "CompTIA Inc");
    assert_eq!(doc["auditTrail"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_approve_and_reject_leave_one_entry() {
    let ctx = TestContext::seeded().await;
    let reviewer = reviewer();

    let approve = ctx.post("/api/certifications/cert2/approve", Some(&reviewer), json!({}));
    let reject = ctx.post("/api/certifications/cert2/reject", Some(&reviewer), json!({}));
    let ((a, _), (r, _)) = tokio::join!(approve, reject);

    let statuses = [a, r];
    assert!(statuses.contains(&StatusCode::OK));
    assert!(statuses.contains(&StatusCode::CONFLICT));

    let (_, doc) = ctx.get("/api/certifications/cert2", None).await;
    assert_eq!(doc["auditTrail"].as_array().unwrap().len(), 2);
}

// ===========================================================================
// Attendance
// ===========================================================================

#[tokio::test]
async fn test_toggle_round_trip() {
    let ctx = TestContext::seeded().await;

    let (status, record) = ctx.post("/api/attendance/att3/toggle", None, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "present");

    let (_, record) = ctx.post("/api/attendance/att3/toggle", None, json!({})).await;
    assert_eq!(record["status"], "absent");

    let (_, stored) = ctx.get("/api/attendance/att3", None).await;
    assert_eq!(stored["status"], "absent");
}

#[tokio::test]
async fn test_late_is_reachable_and_toggles_to_present() {
    let ctx = TestContext::new();
    ctx.post("/api/attendance", None, attendance_record("a1", "present"))
        .await;

    let (status, record) = ctx
        .put("/api/attendance/a1", None, json!({"status": "late"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "late");

    let (_, record) = ctx.post("/api/attendance/a1/toggle", None, json!({})).await;
    assert_eq!(record["status"], "present");
}

#[tokio::test]
async fn test_invalid_attendance_status_rejected_and_unchanged() {
    let ctx = TestContext::seeded().await;
    let (status, _) = ctx
        .put("/api/attendance/att1", None, json!({"status": "asleep"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = ctx.get("/api/attendance/att1", None).await;
    assert_eq!(stored["status"], "present");
}

#[tokio::test]
async fn test_toggle_unknown_record_is_404() {
    let ctx = TestContext::new();
    let (status, _) = ctx.post("/api/attendance/ghost/toggle", None, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_record_with_fractional_progress() {
    let ctx = TestContext::new();
    let mut record = attendance_record("a1", "present");
    record["progress"] = json!(82.5);
    let (status, _) = ctx.post("/api/attendance", None, record).await;
    assert_eq!(status, StatusCode::OK);

    let (status, toggled) = ctx.post("/api/attendance/a1/toggle", None, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["status"], "absent");
    assert_eq!(toggled["progress"], 82.5);

    let (_, summary) = ctx.get("/api/attendance/summary", None).await;
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["absent"], 1);
}

#[tokio::test]
async fn test_create_attendance_rejects_invalid_record() {
    let ctx = TestContext::new();
    let mut record = attendance_record("a1", "present");
    record["progress"] = json!("most of it");
    let (status, _) = ctx.post("/api/attendance", None, record).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.get("/api/attendance/a1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_attendance_summary() {
    let ctx = TestContext::seeded().await;
    let (status, summary) = ctx.get("/api/attendance/summary?date=2024-01-27", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({"total": 3, "present": 2, "absent": 1, "late": 0, "rate": 67})
    );

    let (_, empty) = ctx.get("/api/attendance/summary?date=1999-01-01", None).await;
    assert_eq!(empty["total"], 0);
    assert_eq!(empty["rate"], 0);
}

// ===========================================================================
// Bookings and availability
// ===========================================================================

#[tokio::test]
async fn test_booking_stored_and_slot_then_unavailable() {
    let ctx = TestContext::seeded().await;
    let date = future_date();
    let request = serde_json::to_value(booking(date, "10:30")).unwrap();

    let (status, ack) = ctx.post("/api/bookings", None, request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["status"], "requested");

    let (_, stored) = ctx
        .get(&format!("/api/bookings/{}", ack["id"].as_str().unwrap()), None)
        .await;
    assert_eq!(stored["mentorId"], "m1");
    assert!(stored["createdAt"].is_string());

    let (status, body) = ctx.post("/api/bookings", None, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, slots) = ctx
        .get(&format!("/api/mentors/m1/availability?date={date}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 16);
    let taken: Vec<&str> = slots
        .iter()
        .filter(|s| s["available"] == false)
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(taken, ["10:30"]);

    // Another mentor is unaffected.
    let (_, other) = ctx
        .get(&format!("/api/mentors/m2/availability?date={date}"), None)
        .await;
    assert!(other.as_array().unwrap().iter().all(|s| s["available"] == true));
}

#[tokio::test]
async fn test_unpadded_booking_date_blocks_padded_duplicate() {
    let ctx = TestContext::new();
    let date = future_date();
    let mut unpadded = serde_json::to_value(booking(date, "10:30")).unwrap();
    unpadded["date"] = json!(date.format("%Y-%-m-%-d").to_string());

    let (status, ack) = ctx.post("/api/bookings", None, unpadded).await;
    assert_eq!(status, StatusCode::OK);
    let (_, stored) = ctx
        .get(&format!("/api/bookings/{}", ack["id"].as_str().unwrap()), None)
        .await;
    assert_eq!(stored["date"], date.format("%Y-%m-%d").to_string());

    let padded = serde_json::to_value(booking(date, "10:30")).unwrap();
    let (status, _) = ctx.post("/api/bookings", None, padded).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, all) = ctx.get("/api/bookings", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_validation_messages() {
    let ctx = TestContext::new();

    let past = (Utc::now() - Duration::days(3)).date_naive();
    let (status, body) = ctx
        .post("/api/bookings", None, serde_json::to_value(booking(past, "09:00")).unwrap())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Cannot select a past date"));

    let (status, body) = ctx
        .post(
            "/api/bookings",
            None,
            serde_json::to_value(booking(future_date(), "12:00")).unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Please select a valid time slot"));

    let mut long = serde_json::to_value(booking(future_date(), "09:00")).unwrap();
    long["duration"] = json!(60);
    let (status, _) = ctx.post("/api/bookings", None, long).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_requires_date() {
    let ctx = TestContext::seeded().await;
    let (status, _) = ctx.get("/api/mentors/m1/availability", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.get("/api/mentors/m1/availability?date=tomorrow", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mentors_still_listed_generically() {
    let ctx = TestContext::seeded().await;
    let (status, mentors) = ctx.get("/api/mentors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mentors.as_array().unwrap().len(), 3);
}

// ===========================================================================
// Career tools without a completion backend
// ===========================================================================

#[tokio::test]
async fn test_career_tools_degrade_without_backend() {
    let ctx = TestContext::new();

    let (status, paths) = ctx
        .post("/api/career/translate", None, json!({"mosCode": "11B", "description": "Infantry"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paths, json!([]));

    let (status, reply) = ctx
        .post(
            "/api/career/interview",
            None,
            json!({"history": [{"role": "coach", "text": "Tell me about yourself."}, {"role": "user", "text": "I led a squad."}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reply["reply"],
        vetpath_backend::services::career_service::INTERVIEW_ERROR_REPLY
    );
}

#[tokio::test]
async fn test_career_tools_validate_input() {
    let ctx = TestContext::new();
    let (status, _) = ctx
        .post("/api/career/resume", None, json!({"bullet": "   "}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .post("/api/career/assistant", None, json!({"history": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ===========================================================================
// Health and docs
// ===========================================================================

#[tokio::test]
async fn test_health_reports_storage_and_disabled_career_tools() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["career_tools"]["status"], "disabled");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let ctx = TestContext::new();
    let (status, doc) = ctx.get("/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "VetPath API");
}

#[tokio::test]
async fn test_correlation_id_echoed() {
    use tower::ServiceExt;

    let ctx = TestContext::new();
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("X-Correlation-ID", "req-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = ctx.router().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-correlation-id"], "req-123");
}
