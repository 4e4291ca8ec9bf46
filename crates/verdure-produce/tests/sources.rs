//! Integration tests for the outbound produce clients using wiremock.

use verdure_produce::{FoodFactsClient, ImageSearchClient, ProduceError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn food_client(base_url: &str) -> FoodFactsClient {
    FoodFactsClient::new(base_url, 30, "verdure-test/0.1", 0, 0).expect("client builds")
}

fn image_client(base_url: &str) -> ImageSearchClient {
    ImageSearchClient::new(base_url, "test-access-key", 30, "verdure-test/0.1")
        .expect("client builds")
}

#[tokio::test]
async fn fetch_candidates_parses_products() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "count": 2,
        "products": [
            {
                "product_name": "Fresh Carrots",
                "categories_tags_en": ["Plant-based foods", "Vegetables"]
            },
            {
                "product_name": "Tomato Passata",
                "categories_tags_en": ["Vegetables", "Tomatoes"]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .and(query_param("categories_tags_en", "vegetables"))
        .and(query_param("page_size", "600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let candidates = food_client(&server.uri())
        .fetch_candidates(600)
        .await
        .expect("should parse candidates");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "Fresh Carrots");
    assert_eq!(
        candidates[0].category.as_deref(),
        Some("Plant-based foods, Vegetables")
    );
    assert_eq!(candidates[1].name, "Tomato Passata");
}

#[tokio::test]
async fn fetch_candidates_keeps_nameless_products_as_empty_names() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            { "categories_tags_en": ["Vegetables"] },
            { "product_name": "Leek" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let candidates = food_client(&server.uri())
        .fetch_candidates(100)
        .await
        .expect("should parse candidates");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "");
    assert_eq!(candidates[1].name, "Leek");
    assert!(candidates[1].category.is_none());
}

#[tokio::test]
async fn fetch_candidates_maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "120"))
        .mount(&server)
        .await;

    let err = food_client(&server.uri())
        .fetch_candidates(600)
        .await
        .expect_err("expected rate limited");

    assert!(
        matches!(err, ProduceError::RateLimited { retry_after_secs, .. } if retry_after_secs == 120),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_candidates_maps_500_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = food_client(&server.uri())
        .fetch_candidates(600)
        .await
        .expect_err("expected unexpected status");

    assert!(
        matches!(err, ProduceError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_candidates_maps_bad_body_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = food_client(&server.uri())
        .fetch_candidates(600)
        .await
        .expect_err("expected deserialize error");

    assert!(
        matches!(err, ProduceError::Deserialize { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn search_photo_returns_first_small_url() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total": 2,
        "results": [
            { "urls": { "small": "https://images.example.com/leek-small.jpg" } },
            { "urls": { "small": "https://images.example.com/leek-other.jpg" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("query", "leek vegetable"))
        .and(header("authorization", "Client-ID test-access-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let url = image_client(&server.uri())
        .search_photo("leek")
        .await
        .expect("should parse photo search");

    assert_eq!(
        url.as_deref(),
        Some("https://images.example.com/leek-small.jpg")
    );
}

#[tokio::test]
async fn search_photo_empty_results_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    let url = image_client(&server.uri())
        .search_photo("parsnip")
        .await
        .expect("should parse empty search");

    assert!(url.is_none());
}

#[tokio::test]
async fn search_photo_maps_403_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = image_client(&server.uri())
        .search_photo("leek")
        .await
        .expect_err("expected unexpected status");

    assert!(
        matches!(err, ProduceError::UnexpectedStatus { status: 403, .. }),
        "got: {err:?}"
    );
}
