//! In-process API test harness.
//!
//! Serves a small axum application that answers unknown routes with the
//! standard error envelope, plus a few routes that deliberately break the
//! contract. Tests receive the harness explicitly and get captures back.

use apicheck_contract::{ErrorEnvelope, HarnessConfig, HttpResponseCapture, MatcherRegistry};
use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use axum_test::{TestResponse, TestServer};

/// Test harness for error-contract testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_unknown_route() {
///     let harness = ApiHarness::new();
///     let response = harness.get("/missing").await;
///     assert_be_a_404(&response);
/// }
/// ```
pub struct ApiHarness {
    /// The test server instance.
    pub server: TestServer,

    /// Harness configuration.
    pub config: HarnessConfig,

    /// Registered assertions.
    pub registry: MatcherRegistry,
}

impl ApiHarness {
    /// Creates a harness with the default registry.
    pub fn new() -> Self {
        let server = TestServer::new(api_router()).expect("Failed to create test server");

        Self {
            server,
            config: HarnessConfig::for_testing(),
            registry: MatcherRegistry::with_defaults(),
        }
    }

    /// Makes a GET request and captures the response.
    pub async fn get(&self, path: &str) -> HttpResponseCapture {
        let response = self.server.get(path).await;
        capture(&response)
    }

    /// Makes a DELETE request and captures the response.
    pub async fn delete(&self, path: &str) -> HttpResponseCapture {
        let response = self.server.delete(path).await;
        capture(&response)
    }
}

/// Converts an axum-test response into a capture.
pub fn capture(response: &TestResponse) -> HttpResponseCapture {
    HttpResponseCapture::new(response.status_code().as_u16(), response.text())
}

/// The API under test.
fn api_router() -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/legacy",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorEnvelope::new(9999, "Unknown request")),
                )
            }),
        )
        .route(
            "/html",
            get(|| async { (StatusCode::NOT_FOUND, "<html>Not Found</html>") }),
        )
        .route(
            "/vague",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorEnvelope::new(10000, "Something else")),
                )
            }),
        )
        .fallback(unknown_request)
}

async fn unknown_request(uri: Uri) -> (StatusCode, Json<ErrorEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::unknown_request(uri.path())),
    )
}
