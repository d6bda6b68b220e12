use super::*;

fn test_client(base_url: &str) -> NewsApiClient {
    NewsApiClient::with_base_url(Some("test-key"), 30, "finsent-test", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_constructs_correct_query_string() {
    let client = test_client("https://newsapi.org/v2");
    let url = client
        .build_url(
            "everything",
            &[("q", "ai"), ("language", "en"), ("pageSize", "50")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://newsapi.org/v2/everything?q=ai&language=en&pageSize=50"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://newsapi.org/v2/");
    let url = client.build_url("everything", &[("q", "ai")]).unwrap();
    assert_eq!(url.as_str(), "https://newsapi.org/v2/everything?q=ai");
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://newsapi.org/v2");
    let url = client
        .build_url("everything", &[("q", "artificial intelligence OR AI")])
        .unwrap();
    assert!(
        url.as_str().contains("q=artificial+intelligence+OR+AI"),
        "query param should be form-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = NewsApiClient::with_base_url(Some("k"), 30, "ua", "not a url");
    assert!(matches!(result, Err(NewsError::InvalidBaseUrl { .. })));
}

#[test]
fn check_api_error_passes_ok_envelope() {
    let body = serde_json::json!({ "status": "ok", "articles": [] });
    assert!(NewsApiClient::check_api_error(&body).is_ok());
}

#[test]
fn check_api_error_surfaces_code_and_message() {
    let body = serde_json::json!({
        "status": "error",
        "code": "apiKeyInvalid",
        "message": "Your API key is invalid or incorrect."
    });
    let err = NewsApiClient::check_api_error(&body).unwrap_err();
    assert!(
        matches!(err, NewsError::Api { ref code, .. } if code == "apiKeyInvalid"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn missing_key_fails_without_request() {
    // Port 9 (discard) is never contacted: the key check happens first.
    let client = NewsApiClient::with_base_url(None, 30, "ua", "http://127.0.0.1:9").unwrap();
    let err = client.fetch_everything("ai", "en", 10).await.unwrap_err();
    assert!(matches!(err, NewsError::MissingApiKey), "got: {err:?}");
}
