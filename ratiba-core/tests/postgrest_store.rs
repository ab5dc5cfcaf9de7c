use chrono::{TimeZone, Utc};
use ratiba_core::config::RatibaConfig;
use ratiba_core::store::{PostgrestStore, ScheduleStore};
use ratiba_core::{App, RatibaError, ScheduleDraft, ScheduleId, SchedulePatch};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-key";
const TABLE_PATH: &str = "/rest/v1/schedules";

fn store_for(server: &MockServer) -> PostgrestStore {
    let config = RatibaConfig {
        supabase_url: Some(server.uri()),
        supabase_anon_key: Some(KEY.to_string()),
        table: "schedules".to_string(),
        timeout_secs: 5,
    };
    PostgrestStore::new(&config).unwrap()
}

fn standup() -> ScheduleDraft {
    ScheduleDraft {
        title: "Standup".to_string(),
        description: None,
        start_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap(),
    }
}

fn row(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "start_time": "2025-01-06T09:00:00+00:00",
        "end_time": "2025-01-06T09:15:00+00:00"
    })
}

#[tokio::test]
async fn test_list_requests_rows_ordered_by_start_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("select", "*"))
        .and(query_param("order", "start_time.asc"))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(1, "A")])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = store_for(&server).list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ScheduleId::from(1));
    assert_eq!(rows[0].title, "A");
}

#[tokio::test]
async fn test_insert_posts_single_row_and_returns_representation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(header("apikey", KEY))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{
            "title": "Standup",
            "description": null,
            "start_time": "2025-01-06T09:00:00Z",
            "end_time": "2025-01-06T09:15:00Z"
        }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "u1",
            "title": "Standup",
            "description": null,
            "start_time": "2025-01-06T09:00:00+00:00",
            "end_time": "2025-01-06T09:15:00+00:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let created = store_for(&server).insert(&standup()).await.unwrap();
    assert_eq!(created.id, ScheduleId::from("u1"));
    assert_eq!(created.title, "Standup");
}

#[tokio::test]
async fn test_insert_without_returned_row_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = store_for(&server).insert(&standup()).await.unwrap_err();
    assert!(matches!(err, RatibaError::EmptyInsert));
}

#[tokio::test]
async fn test_update_patches_only_given_fields_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "eq.1"))
        .and(header("apikey", KEY))
        .and(body_json(json!({ "title": "New" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .update(&ScheduleId::from(1), &SchedulePatch::title("New"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_error_body_becomes_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23503",
            "details": null,
            "hint": null,
            "message": "fk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server).delete(&ScheduleId::from(1)).await.unwrap_err();
    match err {
        RatibaError::Store { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "fk [23503]");
        }
        other => panic!("expected a store error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_app_keeps_schedule_when_remote_delete_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(1, "A"), row(2, "B")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut app = App::new(store_for(&server));
    app.load().await.unwrap();

    let err = app.delete(&ScheduleId::from(1)).await.unwrap_err();
    assert!(matches!(err, RatibaError::Store { status: 500, .. }));
    assert_eq!(app.schedules().len(), 2);
}
