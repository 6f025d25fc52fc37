//! Integration tests for GatewayClient using wiremock.
//!
//! Every endpoint is exercised once on the happy path and once against a
//! failing server to check that failures degrade to empty data.

use uvg_core::{Gender, NetworkError};
use uvg_weather::{GatewayClient, GatewayError, RecordId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn weather_body(locality: &str, uvi: f64) -> serde_json::Value {
    serde_json::json!({
        "location": {"locality": locality},
        "weather": {"current": {
            "temp": 24.3,
            "uvi": uvi,
            "weather": [{"description": "clear sky"}]
        }}
    })
}

async fn failing_server(status: u16) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_fetch_cancer_history_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cancer"))
        .and(query_param("datatype", "history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"year": 1982, "rate": 27.1, "gender": "Male"},
            {"year": 1983, "rate": 28.4, "gender": "Male"},
        ])))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let points = client.fetch_cancer_history().await;

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].year, 1982);
    assert_eq!(points[1].rate, 28.4);
    assert_eq!(points[1].gender, "Male");
}

#[tokio::test]
async fn test_fetch_cancer_by_gender_maps_to_chart_slices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cancer"))
        .and(query_param("datatype", "gender"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"gender": "Male", "rate": 63.0},
            {"gender": "Female", "rate": 37.0},
        ])))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let slices = client.fetch_cancer_by_gender().await;

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Male");
    assert_eq!(slices[0].value, 63.0);
    assert_eq!(slices[1].name, "Female");
}

#[tokio::test]
async fn test_string_encoded_numbers_decode_for_both_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cancer"))
        .and(query_param("datatype", "history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"year": "1982", "rate": "27.5", "gender": "Male"},
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cancer"))
        .and(query_param("datatype", "gender"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"gender": "Male", "rate": "63.0"},
            {"gender": "Female", "rate": 37},
        ])))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();

    let history = client.try_fetch_cancer_history().await.unwrap();
    assert_eq!(history[0].year, 1982);
    assert_eq!(history[0].rate, 27.5);

    let slices = client.try_fetch_cancer_by_gender().await.unwrap();
    assert_eq!(slices[0].value, 63.0);
    assert_eq!(slices[1].value, 37.0);
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/location"))
        .and(query_param("place", "Clayton"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Clayton", 8.5)))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let snapshot = client.fetch_weather("Clayton").await.unwrap();

    assert_eq!(snapshot.suburb, "Clayton");
    assert_eq!(snapshot.temperature_c, 24.3);
    assert_eq!(snapshot.uv_index, 8.5);
    assert_eq!(snapshot.description, "clear sky");
}

#[tokio::test]
async fn test_fetch_weather_encodes_place() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/location"))
        .and(query_param("place", "Box Hill & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Box Hill", 2.0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let snapshot = client.fetch_weather("Box Hill & Co").await.unwrap();
    assert_eq!(snapshot.suburb, "Box Hill");
}

#[tokio::test]
async fn test_fetch_weather_empty_place_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("Nowhere", 1.0)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    assert!(client.fetch_weather("").await.is_none());
    assert!(client.fetch_weather("   ").await.is_none());
}

#[tokio::test]
async fn test_fetch_protection_items_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protection"))
        .and(query_param("gender", "Female"))
        .and(query_param("uv", "6.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"record_id": 1, "item_name": "Wide-brim hat", "img_link": "https://img.example/hat.png"},
            {"record_id": "s-2", "item_name": "Sunglasses", "img_link": "https://img.example/glasses.png"},
        ])))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let items = client.fetch_protection_items(Gender::Female, 6.5).await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].record_id, RecordId::Number(1));
    assert_eq!(items[0].item_name, "Wide-brim hat");
    assert_eq!(items[1].record_id, RecordId::Text("s-2".into()));
}

#[tokio::test]
async fn test_whole_uv_index_sent_without_fraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protection"))
        .and(query_param("uv", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    assert!(client.fetch_protection_items(Gender::Male, 3.0).await.is_empty());
}

#[tokio::test]
async fn test_cancer_history_failure_is_empty() {
    let mock_server = failing_server(500).await;
    let client = GatewayClient::new(&mock_server.uri()).unwrap();

    assert!(client.fetch_cancer_history().await.is_empty());
    let err = client.try_fetch_cancer_history().await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Network(NetworkError::ServerError { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_cancer_by_gender_failure_is_empty() {
    let mock_server = failing_server(503).await;
    let client = GatewayClient::new(&mock_server.uri()).unwrap();

    assert!(client.fetch_cancer_by_gender().await.is_empty());
}

#[tokio::test]
async fn test_weather_failure_is_none() {
    let mock_server = failing_server(404).await;
    let client = GatewayClient::new(&mock_server.uri()).unwrap();

    assert!(client.fetch_weather("Atlantis").await.is_none());
}

#[tokio::test]
async fn test_protection_failure_is_empty() {
    let mock_server = failing_server(502).await;
    let client = GatewayClient::new(&mock_server.uri()).unwrap();

    assert!(client.fetch_protection_items(Gender::Male, 9.0).await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/location"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"location\": "))
        .mount(&mock_server)
        .await;

    let client = GatewayClient::new(&mock_server.uri()).unwrap();
    let err = client.try_fetch_weather("Clayton").await.unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
    assert!(client.fetch_weather("Clayton").await.is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = GatewayClient::new("http://127.0.0.1:9").unwrap();

    let err = client.try_fetch_cancer_history().await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
    assert!(client.fetch_cancer_history().await.is_empty());
}
