use std::sync::Arc;

use axum::extract::{Query, State};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_utils::test_utils::TestConfig;
use treatment_cell::handlers::{available_slots, list_services, AvailableQuery};

fn config_for(mock_server: &MockServer) -> Arc<AppConfig> {
    TestConfig::default().with_store_url(&mock_server.uri()).to_arc()
}

fn treatment_rows() -> serde_json::Value {
    json!([
        {
            "name": "Teeth Cleaning",
            "price": 80.0,
            "slots": ["09:00 AM", "10:00 AM"]
        },
        {
            "name": "Cavity Protection",
            "price": 60.0,
            "slots": ["11:00 AM"]
        }
    ])
}

#[tokio::test]
async fn list_services_returns_names_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/treatments"))
        .and(query_param("select", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Teeth Cleaning" },
            { "name": "Cavity Protection" }
        ])))
        .mount(&mock_server)
        .await;

    let result = list_services(State(config_for(&mock_server))).await.unwrap();

    assert_eq!(
        result.0["services"],
        json!(["Teeth Cleaning", "Cavity Protection"])
    );
}

#[tokio::test]
async fn availability_excludes_booked_slot_for_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/treatments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(treatment_rows()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("date", "eq.May 12, 2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "treatment": "Teeth Cleaning", "slot": "09:00 AM" }
        ])))
        .mount(&mock_server)
        .await;

    let result = available_slots(
        State(config_for(&mock_server)),
        Query(AvailableQuery {
            date: "May 12, 2022".to_string(),
        }),
    )
    .await
    .unwrap();

    let treatments = result.0["treatments"].as_array().unwrap();
    assert_eq!(treatments[0]["name"], "Teeth Cleaning");
    assert_eq!(treatments[0]["slots"], json!(["10:00 AM"]));
    // Other treatments untouched
    assert_eq!(treatments[1]["slots"], json!(["11:00 AM"]));
}

#[tokio::test]
async fn availability_for_unbooked_date_returns_full_schedules() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/treatments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(treatment_rows()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = available_slots(
        State(config_for(&mock_server)),
        Query(AvailableQuery {
            date: "not-a-real-date".to_string(),
        }),
    )
    .await
    .unwrap();

    let treatments = result.0["treatments"].as_array().unwrap();
    assert_eq!(treatments[0]["slots"], json!(["09:00 AM", "10:00 AM"]));
    assert_eq!(treatments[1]["slots"], json!(["11:00 AM"]));
}
