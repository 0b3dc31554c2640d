use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

use crate::core::config::DatabaseConfig;

/// Process-wide handle to the storage backend.
///
/// Cloning is cheap and shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// A pooled connection scoped to one unit of work.
///
/// The connection goes back to the pool when the session is dropped,
/// whichever way the owning scope exits.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // Writers queue on the file lock for as long as they may wait for a connection
        .busy_timeout(Duration::from_secs(config.acquire_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect_with(options)
        .await
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        Ok(Self::from_pool(create_pool(config).await?))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquire a fresh session from the pool.
    pub async fn session(&self) -> Result<Session, sqlx::Error> {
        let conn = self.pool.acquire().await?;
        tracing::trace!("Session acquired (pool size={})", self.pool.size());
        Ok(Session { conn })
    }

    /// Apply pending migrations from `./migrations`.
    ///
    /// Already applied migrations are skipped, so this runs on every startup.
    pub async fn init_schema(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Deref for Session {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!("Session released");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::shared::test_helpers::test_database;

    async fn table_columns(db: &Database, table: &str) -> Vec<String> {
        let mut session = db.session().await.unwrap();
        sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?) ORDER BY cid")
            .bind(table)
            .fetch_all(&mut *session)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_schema_creates_both_tables() {
        let db = test_database().await;

        assert_eq!(
            table_columns(&db, "users").await,
            vec![
                "id",
                "email",
                "username",
                "hashed_password",
                "is_active",
                "created_at"
            ]
        );
        assert_eq!(
            table_columns(&db, "content_items").await,
            vec![
                "id",
                "title",
                "description",
                "content_type",
                "status",
                "scheduled_date",
                "published_date",
                "created_at",
                "updated_at",
                "user_id"
            ]
        );
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = test_database().await;
        db.init_schema().await.unwrap();
        db.init_schema().await.unwrap();

        let mut session = db.session().await.unwrap();
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'content_items')",
        )
        .fetch_one(&mut *session)
        .await
        .unwrap();
        assert_eq!(tables, 2);

        let applied: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
                .fetch_one(&mut *session)
                .await
                .unwrap();
        assert_eq!(applied, 1);
    }

    async fn failing_unit_of_work(db: &Database) -> Result<(), sqlx::Error> {
        let mut session = db.session().await?;
        sqlx::query("SELECT * FROM no_such_table")
            .execute(&mut *session)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_session_released_after_success_and_error() {
        // Single-connection pool: a leaked session would make the next acquire time out.
        let db = test_database().await;

        {
            let mut session = db.session().await.unwrap();
            sqlx::query("SELECT 1").execute(&mut *session).await.unwrap();
        }

        assert!(failing_unit_of_work(&db).await.is_err());

        let next = tokio::time::timeout(Duration::from_secs(2), db.session()).await;
        assert!(matches!(next, Ok(Ok(_))));
    }
}
