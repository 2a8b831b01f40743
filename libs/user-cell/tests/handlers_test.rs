use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::jwt::validate_token;
use shared_utils::test_utils::{test_identity, TestConfig};
use user_cell::handlers::{grant_admin, is_admin, list_users, upsert_user};
use user_cell::models::UpsertUserRequest;

fn config_for(mock_server: &MockServer) -> Arc<AppConfig> {
    TestConfig::default().with_store_url(&mock_server.uri()).to_arc()
}

fn user_row(email: &str, role: Option<&str>) -> serde_json::Value {
    json!({
        "email": email,
        "name": "Test User",
        "role": role
    })
}

#[tokio::test]
async fn upsert_returns_user_and_valid_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(query_param("on_conflict", "email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([user_row("a@x.com", None)])))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let result = upsert_user(
        State(config.clone()),
        Path("a@x.com".to_string()),
        Json(UpsertUserRequest {
            name: Some("Test User".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(result.0["user"]["email"], "a@x.com");

    // The returned token must validate against our own secret and carry the
    // upserted identity
    let token = result.0["token"].as_str().unwrap();
    let identity = validate_token(token, &config.jwt_secret).unwrap();
    assert_eq!(identity.email, "a@x.com");
}

#[tokio::test]
async fn admin_flag_reflects_stored_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.boss@x.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_row("boss@x.com", Some("admin"))])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.plain@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_row("plain@x.com", None)])))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);

    let result = is_admin(State(config.clone()), Path("boss@x.com".to_string()))
        .await
        .unwrap();
    assert_eq!(result.0["admin"], json!(true));

    let result = is_admin(State(config), Path("plain@x.com".to_string()))
        .await
        .unwrap();
    assert_eq!(result.0["admin"], json!(false));
}

#[tokio::test]
async fn unknown_email_is_not_admin() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = is_admin(State(config_for(&mock_server)), Path("ghost@x.com".to_string()))
        .await
        .unwrap();
    assert_eq!(result.0["admin"], json!(false));
}

#[tokio::test]
async fn grant_admin_requires_stored_admin_role() {
    let mock_server = MockServer::start().await;

    // Caller has a valid token but no admin role on their stored record
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.plain@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_row("plain@x.com", None)])))
        .mount(&mock_server)
        .await;

    let err = grant_admin(
        State(config_for(&mock_server)),
        Extension(test_identity("plain@x.com")),
        Path("target@x.com".to_string()),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::Forbidden(_));
}

#[tokio::test]
async fn admin_can_grant_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.boss@x.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_row("boss@x.com", Some("admin"))])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.target@x.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_row("target@x.com", Some("admin"))])),
        )
        .mount(&mock_server)
        .await;

    let result = grant_admin(
        State(config_for(&mock_server)),
        Extension(test_identity("boss@x.com")),
        Path("target@x.com".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(result.0["user"]["role"], "admin");
}

#[tokio::test]
async fn list_users_returns_all_accounts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_row("a@x.com", None),
            user_row("boss@x.com", Some("admin"))
        ])))
        .mount(&mock_server)
        .await;

    let result = list_users(
        State(config_for(&mock_server)),
        Extension(test_identity("a@x.com")),
    )
    .await
    .unwrap();

    assert_eq!(result.0["users"].as_array().unwrap().len(), 2);
}
