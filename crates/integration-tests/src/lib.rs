//! Integration tests for Tasty Eats.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tasty-eats-integration-tests
//! ```
//!
//! Tests drive the storefront router in-process with `tower::ServiceExt::oneshot`;
//! no server or network is needed. Each [`TestContext`] gets its own temporary
//! data directory, instant catalog latency, and no checkout delay.
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP API behaviour
//! - `cart_persistence` - cart state across restarts

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tasty_eats_storefront::cart::RecordingNotifier;
use tasty_eats_storefront::catalog::{Catalog, Latency};
use tasty_eats_storefront::config::StorefrontConfig;
use tasty_eats_storefront::routes;
use tasty_eats_storefront::state::AppState;
use tasty_eats_storefront::storage::FileStore;
use tempfile::TempDir;
use tower::ServiceExt;

/// A response read fully into memory.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A storefront wired to a temporary data directory.
pub struct TestContext {
    pub app: Router,
    pub notifier: Arc<RecordingNotifier>,
    data_dir: TempDir,
}

impl TestContext {
    /// Fresh storefront with the built-in menu and an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self::with_data_dir(data_dir)
    }

    /// Storefront over an existing data directory, as after a restart.
    #[must_use]
    pub fn with_data_dir(data_dir: TempDir) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let state = build_state(data_dir.path(), notifier.clone());
        Self {
            app: routes::app(state),
            notifier,
            data_dir,
        }
    }

    /// Stop this storefront and start another over the same data directory.
    #[must_use]
    pub fn restart(self) -> Self {
        Self::with_data_dir(self.data_dir)
    }

    /// The data directory backing the cart.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a request with optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    #[allow(clippy::expect_used)]
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    /// Send a prepared request.
    ///
    /// # Panics
    ///
    /// Panics if the body cannot be read.
    #[allow(clippy::expect_used)]
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn build_state(data_dir: &Path, notifier: Arc<RecordingNotifier>) -> AppState {
    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        catalog_latency: Latency::Instant,
        checkout_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    };
    AppState::new(
        config,
        Catalog::seeded(),
        Arc::new(FileStore::new(data_dir)),
        notifier,
    )
}
