#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, initialize, DatabaseConfig};

/// Fresh in-memory database with the schema applied.
///
/// Each call gets its own database; the pool is pinned to one connection
/// because every SQLite `:memory:` connection is a separate database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    initialize(&db).await?;
    Ok(db)
}
