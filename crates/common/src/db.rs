//! Database pool setup and schema creation
//!
//! The schema is created at startup with `CREATE TABLE IF NOT EXISTS`;
//! there is no migration versioning.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;

use crate::Result;

/// Connect to the database addressed by `database_url`.
///
/// The database file is created if missing, and foreign key enforcement is
/// enabled on every connection (SQLite does not enforce it by default).
pub async fn connect(database_url: &str, debug: bool) -> Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if !debug {
        options = options.disable_statement_logging();
    }

    // An in-memory database exists per connection, so pooling more than one
    // connection would hand out empty databases. Pin those to a single
    // connection; file-backed databases get a small pool.
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let max_connections = if in_memory { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the `conversations` and `messages` tables if they do not exist.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS conversations (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            conversation_id TEXT NOT NULL
                REFERENCES conversations(id) ON DELETE CASCADE,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_conversation_id ON messages (conversation_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema ready");
    Ok(())
}
