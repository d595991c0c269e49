//! Shared test harness: an application instance backed by in-memory SQLite

use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use serde_json::Value;

use advisor_common::{db, Config};

/// A fully wired application router over a fresh in-memory database
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            app_name: "Cloud Advisor API".to_string(),
            app_version: "0.1.0".to_string(),
            debug: false,
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 0,
        };

        let pool = db::connect(&config.database_url, config.debug).await?;
        let router = advisor_app::create_app(config, pool).await?;

        Ok(Self { router })
    }

    /// A clone of the router for driving one request with `oneshot`
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build a request, attaching a JSON body when one is given
pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(b) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Parse a response body as JSON
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Parse an RFC 3339 timestamp out of a JSON string field
pub fn parse_timestamp(value: &Value) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc)
}
