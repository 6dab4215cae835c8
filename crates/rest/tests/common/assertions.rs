//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts the uniform 404 used for every hidden or missing article.
pub fn assert_article_not_found(response: &TestResponse) {
    let status = response.status_code().as_u16();
    assert_eq!(status, 404, "Expected status 404, got {}", status);

    let body: Value = response.json();
    assert_eq!(body["error"], "not-found");
    assert_eq!(body["message"], "article not found");
    assert_eq!(body.as_object().map(|o| o.len()), Some(2), "Unexpected fields in {}", body);
}

/// Asserts a 200 and returns the JSON body.
pub fn ok_json(response: &TestResponse) -> Value {
    let status = response.status_code().as_u16();
    assert_eq!(status, 200, "Expected status 200, got {}: {}", status, response.text());
    response.json()
}

/// Asserts that the body never exposes the stored hash.
pub fn assert_no_hash(body: &Value) {
    assert!(body.get("passwordHash").is_none(), "Hash leaked in {}", body);
}
