mod common;

use axum::http::StatusCode;
use common::{appointment_json, next_weekday, today, TestApp};
use chrono::Duration;
use scheduling_backend::config::SchedulingPolicy;
use serde_json::json;

#[tokio::test]
async fn test_create_appointment_derives_end_time() {
    let app = TestApp::new().await;
    app.open_all_week("club-a").await;
    let date = next_weekday(2, 1);

    let (status, body) = app.book("club-a", appointment_json(date, "09:00", 90)).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["endTime"], "10:30");
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["isPaid"], false);
    assert_eq!(body["date"], date.to_string());

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = app.send("GET", &format!("/api/v1/club-a/appointments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["clientName"], "Ana");
}

#[tokio::test]
async fn test_double_booking_is_rejected_per_tenant() {
    let app = TestApp::new().await;
    app.open_all_week("club-a").await;
    app.open_all_week("club-b").await;
    let date = next_weekday(3, 1);

    let (status, _) = app.book("club-a", appointment_json(date, "10:00", 60)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.book("club-a", appointment_json(date, "10:30", 60)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already booked"));

    // Touching ranges do not overlap.
    let (status, _) = app.book("club-a", appointment_json(date, "11:00", 60)).await;
    assert_eq!(status, StatusCode::OK);

    // Another tenant owns an independent calendar.
    let (status, _) = app.book("club-b", appointment_json(date, "10:00", 60)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_different_instructors_can_share_a_slot() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(4, 1);

    let mut first = appointment_json(date, "17:00", 60);
    first["instructorId"] = json!("coach-1");
    let mut second = appointment_json(date, "17:00", 60);
    second["instructorId"] = json!("coach-2");
    let mut clash = appointment_json(date, "17:30", 30);
    clash["instructorId"] = json!("coach-1");

    assert_eq!(app.book("club", first).await.0, StatusCode::OK);
    assert_eq!(app.book("club", second).await.0, StatusCode::OK);
    assert_eq!(app.book("club", clash).await.0, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancelled_appointment_frees_its_slot() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(5, 1);

    let (_, booked) = app.book("club", appointment_json(date, "08:00", 60)).await;
    let id = booked["id"].as_str().unwrap();

    let (status, _) = app.send(
        "PUT",
        &format!("/api/v1/club/appointments/{}", id),
        Some(json!({"status": "cancelled"})),
    ).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.book("club", appointment_json(date, "08:00", 60)).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_booking_outside_availability() {
    let app = TestApp::new().await;
    let date = next_weekday(1, 1);
    app.add_rule("club", 1, "09:00", "12:00", 60).await;

    let (status, _) = app.book("club", appointment_json(date, "11:30", 60)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.book("club", appointment_json(date, "11:00", 60)).await;
    assert_eq!(status, StatusCode::OK);

    let relaxed = TestApp::with_policy(SchedulingPolicy { enforce_availability: false, ..Default::default() });
    let (status, _) = relaxed.book("club", appointment_json(date, "23:00", 60)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_midnight_rollover_policy() {
    let date = next_weekday(6, 1);

    let lenient = TestApp::with_policy(SchedulingPolicy { enforce_availability: false, ..Default::default() });
    let (status, body) = lenient.book("club", appointment_json(date, "23:30", 60)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endTime"], "00:30");

    let strict = TestApp::with_policy(SchedulingPolicy {
        enforce_availability: false,
        reject_midnight_rollover: true,
        ..Default::default()
    });
    let (status, _) = strict.book("club", appointment_json(date, "23:30", 60)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;

    let yesterday = today() - Duration::days(1);
    let (status, _) = app.book("club", appointment_json(yesterday, "10:00", 60)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let date = next_weekday(2, 1);
    let (status, body) = app.book("club", appointment_json(date, "9:00", 60)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("9:00"));

    let (status, _) = app.book("club", appointment_json(date, "10:00", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut no_client = appointment_json(date, "10:00", 60);
    no_client["clientId"] = json!("");
    let (status, _) = app.book("club", no_client).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_transitions_and_payment() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(3, 1);

    let (_, booked) = app.book("club", appointment_json(date, "14:00", 60)).await;
    let uri = format!("/api/v1/club/appointments/{}", booked["id"].as_str().unwrap());

    let (status, body) = app.send("PUT", &format!("{}/paid", uri), Some(json!({"isPaid": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isPaid"], true);

    let (status, body) = app.send("PUT", &uri, Some(json!({"status": "completed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, _) = app.send("PUT", &uri, Some(json!({"status": "scheduled"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rescheduling_checks_conflicts_but_not_itself() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(4, 1);

    let (_, first) = app.book("club", appointment_json(date, "09:00", 60)).await;
    let (_, second) = app.book("club", appointment_json(date, "11:00", 60)).await;
    let first_uri = format!("/api/v1/club/appointments/{}", first["id"].as_str().unwrap());

    // Extending in place overlaps only itself.
    let (status, body) = app.send("PUT", &first_uri, Some(json!({"duration": 90}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endTime"], "10:30");

    let (status, _) = app.send("PUT", &first_uri, Some(json!({"startTime": "10:30"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, unchanged) = app.send("GET", &first_uri, None).await;
    assert_eq!(unchanged["startTime"], "09:00");
    assert_ne!(second["id"], first["id"]);
}

#[tokio::test]
async fn test_exercises_on_appointment() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(5, 1);

    let (_, booked) = app.book("club", appointment_json(date, "16:00", 60)).await;
    let id = booked["id"].as_str().unwrap().to_string();

    let (status, body) = app.send(
        "PUT",
        &format!("/api/v1/club/appointments/{}/exercises", id),
        Some(json!({"exerciseIds": ["warmup", "serve"]})),
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exerciseIds"], json!(["warmup", "serve"]));

    let scheduler = &app.state.scheduler;
    scheduler.add_exercise("club", &id, "serve").await.unwrap();
    let updated = scheduler.add_exercise("club", &id, "volley").await.unwrap();
    assert_eq!(updated.exercise_ids, vec!["warmup", "serve", "volley"]);

    let updated = scheduler.remove_exercise("club", &id, "warmup").await.unwrap();
    assert_eq!(updated.exercise_ids, vec!["serve", "volley"]);
}

#[tokio::test]
async fn test_list_filters_and_delete() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let monday = next_weekday(1, 1);
    let tuesday = next_weekday(2, 1);

    app.book("club", appointment_json(monday, "09:00", 60)).await;
    let mut other = appointment_json(tuesday, "09:00", 60);
    other["clientId"] = json!("client-2");
    let (_, other) = app.book("club", other).await;

    let (_, by_date) = app.send("GET", &format!("/api/v1/club/appointments?date={}", monday), None).await;
    assert_eq!(by_date.as_array().unwrap().len(), 1);

    let (_, by_client) = app.send("GET", "/api/v1/club/appointments?clientId=client-2", None).await;
    assert_eq!(by_client.as_array().unwrap().len(), 1);
    assert_eq!(by_client[0]["id"], other["id"]);

    let (_, all) = app.send("GET", "/api/v1/club/appointments", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _) = app.send("GET", "/api/v1/club/appointments?date=tomorrow", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/club/appointments/{}", other["id"].as_str().unwrap());
    assert_eq!(app.send("DELETE", &uri, None).await.0, StatusCode::OK);
    assert_eq!(app.send("GET", &uri, None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.send("DELETE", &uri, None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.send("PUT", &uri, Some(json!({"notes": "x"}))).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_durations_longer_than_a_day_are_rejected() {
    let app = TestApp::new().await;
    app.open_all_week("club").await;
    let date = next_weekday(2, 1);

    let (status, body) = app.book("club", appointment_json(date, "10:00", u32::MAX)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("duration"));

    let (status, _) = app.book("club", appointment_json(date, "10:00", 1441)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, booked) = app.book("club", appointment_json(date, "10:00", 60)).await;
    let (status, _) = app.send(
        "PUT",
        &format!("/api/v1/club/appointments/{}", booked["id"].as_str().unwrap()),
        Some(json!({"duration": u32::MAX})),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(
        "POST",
        "/api/v1/club/availability",
        Some(json!({"dayOfWeek": 1, "startTime": "08:00", "endTime": "12:00", "duration": u32::MAX})),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(
        "POST",
        "/api/v1/club/series",
        Some(json!({
            "clientId": "client-1",
            "sportType": "tennis",
            "dayOfWeek": 2,
            "startTime": "10:00",
            "duration": u32::MAX,
            "startDate": date.to_string()
        })),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
