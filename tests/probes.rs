//! Probe behavior against a stub Ollama server

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ollama_settings::Settings;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(base_url: &str, extra: &[(&str, &str)]) -> Settings {
    let mut vars: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert("OLLAMA_BASE_URL".into(), base_url.into());
    assert_ok!(Settings::from_lookup(|key| vars.get(key).cloned()))
}

async fn stub_tags(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_reachable_server_lists_models_in_order() {
    let server = stub_tags(ResponseTemplate::new(200).set_body_json(json!({
        "models": [{"name": "a"}, {"name": "b"}]
    })))
    .await;
    let settings = settings_for(&server.uri(), &[]);

    assert!(settings.check_service_reachable().await);
    assert_eq!(
        settings.list_available_models().await,
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let server = stub_tags(ResponseTemplate::new(500)).await;
    let settings = settings_for(&server.uri(), &[]);

    assert!(!settings.check_service_reachable().await);
    assert_eq!(settings.list_available_models().await, None);
}

#[tokio::test]
async fn test_non_200_success_is_not_reachable() {
    let server = stub_tags(ResponseTemplate::new(204)).await;
    let settings = settings_for(&server.uri(), &[]);

    assert!(!settings.check_service_reachable().await);
    assert_eq!(settings.list_available_models().await, None);
}

#[tokio::test]
async fn test_unreachable_base_url() {
    // Port 1 is reserved and nothing listens on it.
    let settings = settings_for("http://127.0.0.1:1", &[]);

    assert!(!settings.check_service_reachable().await);
    assert_eq!(settings.list_available_models().await, None);
}

#[tokio::test]
async fn test_malformed_body_is_absent() {
    let server = stub_tags(ResponseTemplate::new(200).set_body_json(json!({"tags": []}))).await;
    let settings = settings_for(&server.uri(), &[]);

    assert!(settings.check_service_reachable().await);
    assert_eq!(settings.list_available_models().await, None);

    let server = stub_tags(ResponseTemplate::new(200).set_body_string("not json")).await;
    let settings = settings_for(&server.uri(), &[]);
    assert_eq!(settings.list_available_models().await, None);
}

#[tokio::test]
async fn test_empty_model_list() {
    let server = stub_tags(ResponseTemplate::new(200).set_body_json(json!({"models": []}))).await;
    let settings = settings_for(&server.uri(), &[]);

    assert_eq!(settings.list_available_models().await, Some(vec![]));
}

#[tokio::test]
async fn test_api_key_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .expect(1)
        .mount(&server)
        .await;

    let settings = settings_for(&server.uri(), &[("OPENAI_API_KEY", "sk-test")]);
    assert!(settings.check_service_reachable().await);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = stub_tags(
        ResponseTemplate::new(200)
            .set_body_json(json!({"models": [{"name": "a"}]}))
            .set_delay(Duration::from_secs(8)),
    )
    .await;
    // Configured timeouts do not govern the probe.
    let settings = settings_for(&server.uri(), &[("OLLAMA_TIMEOUT", "600")]);

    let started = Instant::now();
    assert!(!settings.check_service_reachable().await);
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_secs(4), "returned too early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(7), "timeout not enforced: {:?}", elapsed);
}
