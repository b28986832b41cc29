//! led state log
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::common::dao::Dao;
use crate::common::error::ServiceError;
use crate::common::sqlite::SqliteConnection;
use crate::entity::dto::LedStateDto;
use crate::entity::po::LedPo;

#[derive(Clone)]
pub struct LedDao {
    conn: SqliteConnection,
}

#[async_trait]
impl Dao for LedDao {
    fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    fn table_name(&self) -> &'static str {
        "led"
    }

    fn columns(&self) -> &'static str {
        "id              INTEGER PRIMARY KEY AUTOINCREMENT,
        status          TEXT NOT NULL,
        color           TEXT NOT NULL,
        brightness      INTEGER NOT NULL,
        created_at      TEXT NOT NULL"
    }
}

fn map_row(row: &Row) -> rusqlite::Result<LedPo> {
    Ok(LedPo {
        id: row.get(0)?,
        status: row.get(1)?,
        color: row.get(2)?,
        brightness: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl LedDao {
    pub fn new(conn: SqliteConnection) -> Self {
        LedDao { conn }
    }

    /// append a new state row
    pub async fn insert(&self, state: LedStateDto) -> Result<LedPo, ServiceError> {
        self.conn.call(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO led (status, color, brightness, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![state.status, state.color, state.brightness, created_at],
            )?;
            Ok(LedPo {
                id: conn.last_insert_rowid(),
                status: state.status,
                color: state.color,
                brightness: state.brightness,
                created_at,
            })
        }).await
    }

    /// row with the highest id
    pub async fn latest(&self) -> Result<Option<LedPo>, ServiceError> {
        self.conn.call(|conn| {
            conn.query_row(
                "SELECT id, status, color, brightness, created_at FROM led ORDER BY id DESC LIMIT 1",
                [],
                map_row,
            ).optional()
        }).await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.conn.call(|conn| conn.query_row("SELECT count(*) FROM led", [], |row| row.get(0))).await
    }
}
