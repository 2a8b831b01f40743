use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::handlers::{add_doctor, list_doctors, remove_doctor};
use doctor_cell::models::CreateDoctorRequest;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{test_identity, TestConfig};

fn config_for(mock_server: &MockServer) -> Arc<AppConfig> {
    TestConfig::default().with_store_url(&mock_server.uri()).to_arc()
}

fn doctor_row(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "name": "Dr. Test",
        "specialty": "Dentistry",
        "image_url": null
    })
}

async fn mock_stored_role(mock_server: &MockServer, email: &str, role: Option<&str>) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "email": email,
            "name": "Someone",
            "role": role
        }])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn valid_token_without_admin_role_is_forbidden() {
    let mock_server = MockServer::start().await;
    mock_stored_role(&mock_server, "plain@x.com", None).await;

    let err = list_doctors(
        State(config_for(&mock_server)),
        Extension(test_identity("plain@x.com")),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::Forbidden(_));
}

#[tokio::test]
async fn admin_can_list_doctors() {
    let mock_server = MockServer::start().await;
    mock_stored_role(&mock_server, "boss@x.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_row("dr.a@x.com"),
            doctor_row("dr.b@x.com")
        ])))
        .mount(&mock_server)
        .await;

    let result = list_doctors(
        State(config_for(&mock_server)),
        Extension(test_identity("boss@x.com")),
    )
    .await
    .unwrap();

    assert_eq!(result.0["doctors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn admin_can_add_doctor() {
    let mock_server = MockServer::start().await;
    mock_stored_role(&mock_server, "boss@x.com", Some("admin")).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([doctor_row("dr.new@x.com")])))
        .mount(&mock_server)
        .await;

    let (status, body) = add_doctor(
        State(config_for(&mock_server)),
        Extension(test_identity("boss@x.com")),
        Json(CreateDoctorRequest {
            email: "dr.new@x.com".to_string(),
            name: "Dr. Test".to_string(),
            specialty: "Dentistry".to_string(),
            image_url: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.0["doctor"]["email"], "dr.new@x.com");
}

#[tokio::test]
async fn removing_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;
    mock_stored_role(&mock_server, "boss@x.com", Some("admin")).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let err = remove_doctor(
        State(config_for(&mock_server)),
        Extension(test_identity("boss@x.com")),
        Path("ghost@x.com".to_string()),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::NotFound(_));
}

#[tokio::test]
async fn non_admin_cannot_remove_doctor() {
    let mock_server = MockServer::start().await;
    mock_stored_role(&mock_server, "plain@x.com", None).await;

    let err = remove_doctor(
        State(config_for(&mock_server)),
        Extension(test_identity("plain@x.com")),
        Path("dr.a@x.com".to_string()),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::Forbidden(_));
}
