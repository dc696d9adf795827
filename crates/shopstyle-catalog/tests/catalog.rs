//! Integration tests for the catalog caches against a wiremock catalog API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use shopstyle_catalog::{CatalogClient, CatalogError, Fetch, SsData};
use shopstyle_core::SortOrder;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 30, "shopstyle-test/0.1")
        .expect("client construction should not fail")
}

fn success(message: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"action": "success", "message": message}))
}

#[tokio::test]
async fn get_json_returns_raw_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/colors"))
        .respond_with(success(json!([{"id": 1, "name": "Red"}])))
        .mount(&server)
        .await;

    let body = test_client(&server.uri())
        .get_json("/ss/colors")
        .await
        .expect("request should succeed");
    assert_eq!(body["action"], "success");
    assert_eq!(body["message"][0]["name"], "Red");
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_json("/ss/brands")
        .await
        .expect_err("500 should fail");
    assert!(
        matches!(err, CatalogError::UnexpectedStatus { status: 500, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_json("/ss/brands")
        .await
        .expect_err("html should not parse");
    assert!(matches!(err, CatalogError::Deserialize { .. }));
}

#[tokio::test]
async fn retries_recover_from_transient_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/colors"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ss/colors"))
        .respond_with(success(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retries(2, 1);
    client
        .get_json("/ss/colors")
        .await
        .expect("second attempt should succeed");
}

#[tokio::test]
async fn reference_data_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/brands"))
        .respond_with(success(json!([
            {"id": 10, "name": "Acme"},
            {"id": 11, "name": "Globex"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let data = SsData::new(test_client(&server.uri()));
    let first = data.require_brands().await.unwrap();
    let second = data.require_brands().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(data.brand_by_id("11").unwrap().name, "Globex");
}

#[tokio::test]
async fn concurrent_first_loads_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/retailers"))
        .respond_with(
            success(json!([{"id": "r1", "name": "Shop One"}]))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let data = SsData::new(test_client(&server.uri()));
    let results =
        futures::future::join_all((0..5).map(|_| data.require_retailers())).await;

    let lists: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    for list in &lists[1..] {
        assert!(Arc::ptr_eq(&lists[0], list));
    }
}

#[tokio::test]
async fn failed_load_is_retried_on_next_require() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/wCategories"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ss/wCategories"))
        .respond_with(success(json!([{"id": "dresses", "name": "Dresses"}])))
        .mount(&server)
        .await;

    let data = SsData::new(test_client(&server.uri()));
    assert!(data.require_categories().await.is_err());
    assert!(!data.categories().is_loaded());

    let list = data.require_categories().await.unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn product_identity_survives_overlapping_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ss/products"))
        .and(query_param("category", "dresses"))
        .respond_with(success(json!([
            {"id": 1, "name": "Wrap", "price": 120},
            {"id": 2, "name": "Shift", "price": 80}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ss/products"))
        .and(query_param("category", "womens-clothes"))
        .and(query_param("fl", "c7"))
        .respond_with(success(json!([
            {"id": 2, "name": "Shift", "price": 80},
            {"id": 3, "name": "Maxi", "price": 60}
        ])))
        .mount(&server)
        .await;

    let data = SsData::new(test_client(&server.uri()));
    let dresses = data
        .query_products("dresses", None, SortOrder::Relevance)
        .await
        .unwrap();
    assert!(data.choose(2));

    let red = data
        .query_products("womens-clothes", Some("fl=c7"), SortOrder::PriceAscending)
        .await
        .unwrap();

    let ids: Vec<i64> = red.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert!(Arc::ptr_eq(&dresses[1], &red[1]));
    assert!(data.is_chosen(&red[1]));
    assert_eq!(data.products().len(), 3);
}
