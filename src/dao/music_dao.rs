//! music state log
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::common::dao::Dao;
use crate::common::error::ServiceError;
use crate::common::sqlite::SqliteConnection;
use crate::entity::dto::MusicStateDto;
use crate::entity::po::MusicPo;

const SELECT_LATEST: &str = "SELECT id, status, mode, volume, created_at FROM music ORDER BY id DESC LIMIT 1";

#[derive(Clone)]
pub struct MusicDao {
    conn: SqliteConnection,
}

#[async_trait]
impl Dao for MusicDao {
    fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    fn table_name(&self) -> &'static str {
        "music"
    }

    fn columns(&self) -> &'static str {
        "id              INTEGER PRIMARY KEY AUTOINCREMENT,
        status          TEXT NOT NULL,
        mode            TEXT NOT NULL,
        volume          INTEGER NOT NULL,
        created_at      TEXT NOT NULL"
    }
}

fn map_row(row: &Row) -> rusqlite::Result<MusicPo> {
    Ok(MusicPo {
        id: row.get(0)?,
        status: row.get(1)?,
        mode: row.get(2)?,
        volume: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn insert_row(conn: &rusqlite::Connection, state: MusicStateDto) -> rusqlite::Result<MusicPo> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO music (status, mode, volume, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![state.status, state.mode, state.volume, created_at],
    )?;
    Ok(MusicPo {
        id: conn.last_insert_rowid(),
        status: state.status,
        mode: state.mode,
        volume: state.volume,
        created_at,
    })
}

impl MusicDao {
    pub fn new(conn: SqliteConnection) -> Self {
        MusicDao { conn }
    }

    #[cfg(test)]
    pub async fn insert(&self, state: MusicStateDto) -> Result<MusicPo, ServiceError> {
        self.conn.call(move |conn| insert_row(conn, state)).await
    }

    /// row with the highest id
    pub async fn latest(&self) -> Result<Option<MusicPo>, ServiceError> {
        self.conn.call(|conn| conn.query_row(SELECT_LATEST, [], map_row).optional()).await
    }

    /// read the latest row and append the row derived from it in one transaction
    pub async fn append_relative_to_latest<F>(&self, derive: F) -> Result<MusicPo, ServiceError>
    where
        F: FnOnce(Option<MusicPo>) -> MusicStateDto + Send + 'static,
    {
        self.conn.call(move |conn| {
            let tx = conn.transaction()?;
            let last = tx.query_row(SELECT_LATEST, [], map_row).optional()?;
            let row = insert_row(&tx, derive(last))?;
            tx.commit()?;
            Ok(row)
        }).await
    }
}
