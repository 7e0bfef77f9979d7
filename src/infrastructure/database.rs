use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

/// Opens and prepares the SQLite connection pool. SQLite does not
/// enforce declared foreign keys unless told to per-connection, so
/// `PRAGMA foreign_keys = ON` is issued right after connecting — without
/// it cascade deletes would silently stop propagating.
pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url);
        opt.max_connections(20)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(30))
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .context("failed to connect to the todoit database")?;

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA foreign_keys = ON".to_string(),
        ))
        .await
        .context("failed to enable foreign key enforcement")?;

        Ok(db)
    }

    pub async fn connect_from_config(config: &crate::infrastructure::Config) -> Result<DatabaseConnection> {
        Self::connect(&config.database_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = ConnectionManager::connect("sqlite::memory:").await.unwrap();
        assert!(db.ping().await.is_ok());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = ConnectionManager::connect("sqlite::memory:").await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "PRAGMA foreign_keys".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        let enabled: i32 = row.try_get("", "foreign_keys").unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn rejects_invalid_url() {
        let result = ConnectionManager::connect("not-a-real-scheme://nope").await;
        assert!(result.is_err());
    }
}
