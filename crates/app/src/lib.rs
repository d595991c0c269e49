//! Cloud Advisor application composition root
//!
//! Composes the domain router with the service info and health endpoints.

use axum::{routing::get, Json, Router};
use serde_json::json;
use sqlx::SqlitePool;

use advisor_common::{db, Config};
use advisor_conversations::{ConversationsRepositories, ConversationsState};

/// Create the main application router.
///
/// Creates the database schema if it does not exist, then wires the
/// conversations routes together with the root and health endpoints.
pub async fn create_app(config: Config, pool: SqlitePool) -> Result<Router, anyhow::Error> {
    db::create_schema(&pool).await?;

    let conversations_state = ConversationsState {
        repos: ConversationsRepositories::new(pool),
    };

    let root_info = json!({
        "name": config.app_name,
        "version": config.app_version,
        "description": "Cloud Advisor API - Backend for the Interactive Q&A System",
        "health": "/health",
        "api": {
            "conversations": "/api/conversations",
        },
    });

    let health_info = json!({
        "status": "healthy",
        "service": config.app_name,
        "version": config.app_version,
    });

    let app = Router::new()
        .route("/", get(move || async move { Json(root_info) }))
        .route("/health", get(move || async move { Json(health_info) }))
        .merge(advisor_conversations::routes().with_state(conversations_state));

    Ok(app)
}
