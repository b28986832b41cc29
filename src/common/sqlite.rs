//! sqlite connection handle
//! opened once at startup and handed to every dao, all statements run on the
//! single tokio-rusqlite worker thread so each `call` is serialized

use crate::common::error::ServiceError;
use crate::{debug, info};

const LOG_TAG: &str = "sqlite";

#[derive(Clone)]
pub struct SqliteConnection {
    conn: tokio_rusqlite::Connection,
}

/// strip the scheme from a connection string, `None` means in-memory
fn database_path(url: &str) -> Option<&str> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

impl SqliteConnection {
    /// open the database named by a connection string
    pub async fn open(url: &str) -> Result<Self, ServiceError> {
        match database_path(url) {
            Some(path) => {
                let conn = tokio_rusqlite::Connection::open(path).await
                    .map_err(|e| ServiceError::internal(format!("cannot open sqlite database {path}: {e}")))?;
                info!(LOG_TAG, "sqlite database opened: {}", path);
                Ok(SqliteConnection { conn })
            }
            None => Self::open_in_memory().await,
        }
    }

    pub async fn open_in_memory() -> Result<Self, ServiceError> {
        let conn = tokio_rusqlite::Connection::open_in_memory().await
            .map_err(|e| ServiceError::internal(format!("cannot open in-memory sqlite database: {e}")))?;
        debug!(LOG_TAG, "in-memory sqlite database opened");
        Ok(SqliteConnection { conn })
    }

    /// run a closure against the raw connection on the worker thread
    pub async fn call<F, R>(&self, function: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        self.conn.call(function).await.map_err(ServiceError::from)
    }

    /// round trip a trivial query
    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<usize, i64>(0))).await?;
        Ok(())
    }
}
