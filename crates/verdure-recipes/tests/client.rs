//! Integration tests for `SpoonacularClient` using wiremock HTTP mocks.

use verdure_recipes::{MealSuggestion, RecipesError, SpoonacularClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SpoonacularClient {
    SpoonacularClient::with_base_url("test-key", 30, "verdure-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn find_by_ingredients_returns_parsed_recipes() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 641803,
            "title": "Easy Tomato Basil Soup",
            "usedIngredients": [
                { "id": 11529, "name": "tomato" }
            ],
            "missedIngredients": [
                { "id": 2044, "name": "basil" },
                { "id": 11215, "name": "garlic" }
            ]
        },
        {
            "id": 715769,
            "title": "Broccoli Stir Fry",
            "usedIngredients": [
                { "id": 11090, "name": "broccoli" }
            ],
            "missedIngredients": []
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .and(query_param("ingredients", "tomato,broccoli"))
        .and(query_param("number", "5"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let recipes = test_client(&server.uri())
        .find_by_ingredients(&["tomato".to_string(), "broccoli".to_string()], 5)
        .await
        .expect("should parse recipes");

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "Easy Tomato Basil Soup");
    assert_eq!(recipes[0].used_ingredients[0].name, "tomato");
    assert_eq!(recipes[0].missed_ingredients.len(), 2);

    let meal = MealSuggestion::from_recipe(recipes[0].clone());
    assert_eq!(meal.ingredients, vec!["tomato", "basil", "garlic"]);
    assert!(meal.tags.contains(&"vegan".to_string()));
}

#[tokio::test]
async fn find_by_ingredients_maps_402_to_quota_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .find_by_ingredients(&["tomato".to_string()], 5)
        .await
        .expect_err("expected quota error");

    assert!(matches!(err, RecipesError::QuotaExhausted), "got: {err:?}");
}

#[tokio::test]
async fn find_by_ingredients_maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "45"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .find_by_ingredients(&["tomato".to_string()], 5)
        .await
        .expect_err("expected rate limited");

    assert!(
        matches!(err, RecipesError::RateLimited { retry_after_secs: 45 }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn find_by_ingredients_redacts_key_in_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .find_by_ingredients(&["tomato".to_string()], 5)
        .await
        .expect_err("expected unexpected status");

    match err {
        RecipesError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(!url.contains("test-key"), "api key leaked into {url}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn find_by_ingredients_maps_bad_body_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .find_by_ingredients(&["tomato".to_string()], 5)
        .await
        .expect_err("expected deserialize error");

    assert!(
        matches!(err, RecipesError::Deserialize { .. }),
        "got: {err:?}"
    );
}
