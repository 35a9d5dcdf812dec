use super::*;

fn test_client(base_url: &str) -> TechmartClient {
    TechmartClient::with_base_url(base_url, 5, "techmart-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_segments_to_api_prefix() {
    let client = test_client("http://localhost:8000/api");
    let url = client.endpoint(&["products", "p-1"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/api/products/p-1");
}

#[test]
fn endpoint_ignores_trailing_slash_on_base() {
    let client = test_client("http://localhost:8000/api/");
    let url = client.endpoint(&["categories"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/api/categories");
}

#[test]
fn endpoint_percent_encodes_ids() {
    let client = test_client("http://localhost:8000/api");
    let url = client.endpoint(&["admin", "products", "a/b c"]).unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/admin/products/a%2Fb%20c"
    );
}

#[test]
fn endpoint_with_empty_query_has_no_question_mark() {
    let client = test_client("http://localhost:8000/api");
    let url = client.endpoint_with_query(&["products"], &[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/api/products");
}

#[test]
fn endpoint_with_query_encodes_values() {
    let client = test_client("http://localhost:8000/api");
    let url = client
        .endpoint_with_query(&["products"], &[("search", "usb c & hdmi".to_owned())])
        .unwrap();
    assert!(
        url.as_str().contains("search=usb+c+%26+hdmi"),
        "query param should be form-encoded: {url}"
    );
}

#[test]
fn rejects_non_http_base_url() {
    let result = TechmartClient::with_base_url("ftp://example.com/api", 5, "ua", 0, 0);
    assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
}

#[test]
fn rejects_unparseable_base_url() {
    let result = TechmartClient::with_base_url("not a url", 5, "ua", 0, 0);
    assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
}

#[test]
fn extract_detail_reads_fastapi_message() {
    assert_eq!(
        extract_detail(r#"{"detail":"Product not found"}"#),
        "Product not found"
    );
}

#[test]
fn extract_detail_renders_structured_detail() {
    let detail = extract_detail(r#"{"detail":[{"loc":["body","price"],"msg":"field required"}]}"#);
    assert!(detail.contains("field required"), "got: {detail}");
}

#[test]
fn extract_detail_handles_plain_and_empty_bodies() {
    assert_eq!(extract_detail("Bad Gateway"), "Bad Gateway");
    assert_eq!(extract_detail("   "), "no response body");
    let long = "x".repeat(500);
    assert!(extract_detail(&long).ends_with("..."));
}
