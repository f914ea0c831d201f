use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::Settings;

/// Opens the connection pool described by `settings`.
///
/// An in-memory database lives only as long as its connection, so those
/// URLs get exactly one connection that is never recycled.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, sqlx::Error> {
    let url = settings.database_url.as_str();
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.db_max_connections)
    };

    tracing::info!(url, in_memory, "opening alert database");
    pool_options.connect_with(options).await
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // AUTOINCREMENT: ids of deleted alerts are never handed out again
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alerts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            commodity_id TEXT    NOT NULL,
            mandi_id     TEXT    NOT NULL,
            target_price INTEGER NOT NULL,
            condition    TEXT    NOT NULL CHECK (condition IN ('Above', 'Below')),
            created_at   TEXT    NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
