use shopstyle_core::query_string::get_parameter;

use super::*;

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 30, "shopstyle-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_url_joins_under_base_path() {
    let client = test_client("http://catalog.test/api");
    let url = client.endpoint_url("/ss/brands").unwrap();
    assert_eq!(url.as_str(), "http://catalog.test/api/ss/brands");
}

#[test]
fn endpoint_url_strips_trailing_slash() {
    let client = test_client("http://catalog.test/");
    let url = client
        .endpoint_url("/ss/products?category=dresses&fl=c7&fl=b12")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://catalog.test/ss/products?category=dresses&fl=c7&fl=b12"
    );
}

#[test]
fn endpoint_url_adds_cache_buster_when_enabled() {
    let client = test_client("http://catalog.test").with_cache_busting(true);
    let url = client.endpoint_url("/ss/colors").unwrap();
    let token = get_parameter(url.as_str(), CACHE_BUSTER_PARAM).expect("zzcb present");
    let token: u32 = token.parse().expect("numeric token");
    assert!(token < 10_000);
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = CatalogClient::new("not a url", 30, "shopstyle-test/0.1");
    assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
}
