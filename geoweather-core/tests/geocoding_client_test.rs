//! Contract tests for GeocodingClient against a mocked OpenWeatherMap geocoding API.
//!
//! | Endpoint | Test |
//! |----------|------|
//! | `GET /geo/1.0/zip` | `postal_code_*` |
//! | `GET /geo/1.0/direct` | `city_*`, `free_text_*`, `direct_*` |

use geoweather_core::{
    ClassifiedInput, ErrorKind, GeocodingClient, GeocodingError, Geocoder, ServiceConfig,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> GeocodingClient {
    let config = ServiceConfig::new("test-key")
        .unwrap()
        .with_geocoding_url(format!("{}/geo/1.0/", mock_server.uri()));
    GeocodingClient::new(config)
}

// ── GET /zip ─────────────────────────────────────────────────────────

#[tokio::test]
async fn postal_code_issues_one_zip_request_and_drops_zip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "10001,US"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "zip": "10001",
            "name": "New York",
            "lat": 40.7484,
            "lon": -73.9967,
            "country": "US"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).locate("10001").await.unwrap();
    assert_eq!(result.name, "New York");
    assert_eq!(result.lat, 40.7484);
    assert_eq!(result.lon, -73.9967);
    assert_eq!(result.country, "US");

    let body = serde_json::to_value(&result).unwrap();
    assert!(body.get("zip").is_none());
}

#[tokio::test]
async fn postal_code_with_country_uses_that_country() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "K1A 0B1,CA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "zip": "K1A",
            "name": "Ottawa",
            "lat": 45.42,
            "lon": -75.69,
            "country": "CA"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).locate("K1A 0B1, CA").await.unwrap();
    assert_eq!(result.name, "Ottawa");
}

#[tokio::test]
async fn postal_code_response_without_zip_is_a_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "New York",
            "lat": 40.7484,
            "lon": -73.9967,
            "country": "US"
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("10001").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
    assert!(err.to_string().contains("zip"), "{err}");
}

#[tokio::test]
async fn postal_code_not_found_surfaces_upstream_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "not found"})),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("99999").await.unwrap_err();
    match err {
        GeocodingError::UpstreamHttp { status, ref status_text } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("expected UpstreamHttp, got {other:?}"),
    }
}

#[tokio::test]
async fn postal_code_null_body_is_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("10001").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResults);
}

#[tokio::test]
async fn postal_code_empty_array_is_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/zip"))
        .and(query_param("zip", "10001,US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("10001").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResults);
    assert_eq!(err.to_string(), "No results found for query: 10001,US");
}

// ── GET /direct ──────────────────────────────────────────────────────

#[tokio::test]
async fn city_state_sends_comma_joined_query_with_limit_one() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "New York,NY,US"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "New York",
            "local_names": {"en": "New York", "es": "Nueva York"},
            "lat": 40.7127281,
            "lon": -74.0060152,
            "country": "US",
            "state": "New York"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).locate("New York, NY, US").await.unwrap();
    assert_eq!(result.state.as_deref(), Some("New York"));
    assert_eq!(
        result.local_names.as_ref().and_then(|n| n.get("es")).map(String::as_str),
        Some("Nueva York")
    );
}

#[tokio::test]
async fn city_country_takes_first_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris,FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Paris", "lat": 48.8588897, "lon": 2.3200410, "country": "FR", "state": "Ile-de-France"},
            {"name": "Paris", "lat": 33.66, "lon": -95.55, "country": "US", "state": "Texas"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).locate("Paris, FR").await.unwrap();
    assert_eq!(result.country, "FR");
}

#[tokio::test]
async fn free_text_empty_array_is_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("Atlantis").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResults);
    assert_eq!(err.to_string(), "No results found for query: Atlantis");
}

#[tokio::test]
async fn direct_result_with_wrong_types_is_a_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Nowhere", "lat": "12.5", "lon": 1.0, "country": "ZZ"}
        ])))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("Nowhere").await.unwrap_err();
    assert!(matches!(err, GeocodingError::InvalidResponseShape(_)));
}

#[tokio::test]
async fn direct_response_that_is_not_an_array_is_a_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "x", "lat": 1, "lon": 2, "country": "US"})),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("Somewhere").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
    assert!(err.to_string().contains("expected an array"));
}

#[tokio::test]
async fn direct_unauthorized_is_upstream_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).locate("London").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamHttp);
    assert_eq!(err.upstream_status(), Some(401));
}

// ── transport / local ────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_upstream_is_unavailable() {
    let config = ServiceConfig::new("test-key")
        .unwrap()
        .with_geocoding_url("http://127.0.0.1:1/geo/1.0/");
    let err = GeocodingClient::new(config).locate("London").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn coordinates_make_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let input = ClassifiedInput::Coordinates { lat: 10.0, lon: 20.0 };
    let result = test_client(&mock_server).resolve(&input).await.unwrap();
    assert_eq!(result.name, "Location at 10.0000, 20.0000");
    assert_eq!(result.country, "");
}
