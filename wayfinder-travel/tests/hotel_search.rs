//! Hotel search against a mocked Geoapify server.

use serde_json::json;
use wayfinder_travel::{HotelFinder, HotelSearchResult, TravelConfig, DEFAULT_LIMIT, DEFAULT_RADIUS_M};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TravelConfig {
    TravelConfig::new(Some("geo-key".into()), Some("otm-key".into()))
        .with_geoapify_base_url(server.uri())
}

async fn mount_geocode(server: &MockServer, lon: f64, lat: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                { "geometry": { "coordinates": [lon, lat] } }
            ]
        })))
        .mount(server)
        .await;
}

fn place(name: &str, lon: f64, lat: f64) -> serde_json::Value {
    json!({
        "properties": { "name": name, "formatted": format!("{name} street") },
        "geometry": { "coordinates": [lon, lat] }
    })
}

#[tokio::test]
async fn search_returns_every_mocked_hotel() {
    let server = MockServer::start().await;
    mount_geocode(&server, 2.3522, 48.8566).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                place("Hotel A", 2.35, 48.85),
                place("Hotel B", 2.36, 48.86),
                place("Hotel C", 2.37, 48.87),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    let result = finder.search("Paris", DEFAULT_RADIUS_M, DEFAULT_LIMIT).await;

    match result {
        HotelSearchResult::Success { hotels } => {
            assert_eq!(hotels.len(), 3);
            assert_eq!(hotels[0].name, "Hotel A");
            assert_eq!(hotels[0].address, "Hotel A street");
        }
        HotelSearchResult::Error { error_message } => panic!("unexpected error: {error_message}"),
    }
}

#[tokio::test]
async fn geojson_coordinates_are_read_as_lon_lat() {
    let server = MockServer::start().await;
    // Paris on the wire: [lon, lat]. The places filter must put lon first
    // and use the latitude as latitude.
    mount_geocode(&server, 2.3522, 48.8566).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("filter", "circle:2.3522,48.8566,5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    let result = finder.search("Paris", 5000, 10).await;
    assert!(matches!(result, HotelSearchResult::Success { .. }));
}

#[tokio::test]
async fn empty_places_response_is_a_success() {
    let server = MockServer::start().await;
    mount_geocode(&server, 12.49, 41.89).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    match finder.search("Rome", 5000, 10).await {
        HotelSearchResult::Success { hotels } => assert!(hotels.is_empty()),
        HotelSearchResult::Error { error_message } => panic!("unexpected error: {error_message}"),
    }
}

#[tokio::test]
async fn empty_city_string_still_succeeds() {
    let server = MockServer::start().await;
    mount_geocode(&server, 2.3522, 48.8566).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    match finder.search("", 5000, 10).await {
        HotelSearchResult::Success { hotels } => assert!(hotels.is_empty()),
        HotelSearchResult::Error { error_message } => panic!("unexpected error: {error_message}"),
    }
}

#[tokio::test]
async fn unknown_city_error_names_the_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    match finder.search("Atlantis", 5000, 10).await {
        HotelSearchResult::Error { error_message } => {
            assert!(error_message.contains("Atlantis"), "got: {error_message}");
        }
        HotelSearchResult::Success { .. } => panic!("expected an error result"),
    }
}

#[tokio::test]
async fn missing_key_reports_error_without_calling_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let config = TravelConfig::new(None, Some("otm-key".into()))
        .with_geoapify_base_url(server.uri());
    let finder = HotelFinder::new(&config).unwrap();

    match finder.search("Paris", 5000, 10).await {
        HotelSearchResult::Error { error_message } => {
            assert!(error_message.contains("Missing"), "got: {error_message}");
            assert!(error_message.contains("Geoapify"), "got: {error_message}");
        }
        HotelSearchResult::Success { .. } => panic!("expected an error result"),
    }
}

#[tokio::test]
async fn upstream_failure_becomes_an_error_result() {
    let server = MockServer::start().await;
    mount_geocode(&server, 2.3522, 48.8566).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    assert!(matches!(
        finder.search("Paris", 5000, 10).await,
        HotelSearchResult::Error { .. }
    ));
}

#[tokio::test]
async fn repeated_searches_return_identical_results() {
    let server = MockServer::start().await;
    mount_geocode(&server, 2.3522, 48.8566).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [place("Hotel A", 2.35, 48.85)]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let finder = HotelFinder::new(&config_for(&server)).unwrap();
    let first = finder.search("Paris", 5000, 10).await;
    let second = finder.search("Paris", 5000, 10).await;
    assert_eq!(first, second);
}
