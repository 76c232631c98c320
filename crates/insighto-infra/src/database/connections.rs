use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseTransaction, DbConn, DbErr,
    Statement, TransactionError, TransactionTrait,
};

use insighto_core::error::RepoError;

use super::postgres_base::map_db_err;

/// Connection settings for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement; meant for development only.
    pub sql_logging: bool,
}

/// Connection pool, constructed once and shared with the repositories.
#[derive(Clone)]
pub struct Database {
    conn: Arc<DbConn>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sql_logging)
            .to_owned();

        let conn = SeaDatabase::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: DbConn) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    /// Handle for a repository; every clone uses the same pool.
    pub fn shared(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), RepoError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
            .map_err(|e| RepoError::Connection(e.to_string()))
    }

    /// `true` when the database answers; failures are logged, not returned.
    pub async fn is_connected(&self) -> bool {
        match self.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed");
                false
            }
        }
    }
}

/// Run `callback` inside a single transaction, committing on `Ok`.
///
/// There is no retry; any error rolls back and is returned as-is.
pub async fn with_transaction<F, T>(db: &DbConn, callback: F) -> Result<T, RepoError>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>
        + Send,
    T: Send,
{
    db.transaction::<F, T, DbErr>(callback)
        .await
        .map_err(|e| match e {
            TransactionError::Connection(e) | TransactionError::Transaction(e) => map_db_err(e),
        })
}
