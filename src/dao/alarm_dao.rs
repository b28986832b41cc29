//! alarm table
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Row};

use crate::common::dao::Dao;
use crate::common::error::ServiceError;
use crate::common::sqlite::SqliteConnection;
use crate::entity::dto::NewAlarmDto;
use crate::entity::po::AlarmPo;

#[derive(Clone)]
pub struct AlarmDao {
    conn: SqliteConnection,
}

#[async_trait]
impl Dao for AlarmDao {
    fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    fn table_name(&self) -> &'static str {
        "alarm"
    }

    fn columns(&self) -> &'static str {
        "id              INTEGER PRIMARY KEY AUTOINCREMENT,
        status          TEXT NOT NULL,
        time            TEXT NOT NULL,
        created_at      TEXT NOT NULL"
    }
}

fn map_row(row: &Row) -> rusqlite::Result<AlarmPo> {
    Ok(AlarmPo {
        id: row.get(0)?,
        status: row.get(1)?,
        time: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl AlarmDao {
    pub fn new(conn: SqliteConnection) -> Self {
        AlarmDao { conn }
    }

    pub async fn insert(&self, alarm: NewAlarmDto) -> Result<AlarmPo, ServiceError> {
        self.conn.call(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO alarm (status, time, created_at) VALUES (?1, ?2, ?3)",
                params![alarm.status, alarm.time, created_at],
            )?;
            Ok(AlarmPo {
                id: conn.last_insert_rowid(),
                status: alarm.status,
                time: alarm.time,
                created_at,
            })
        }).await
    }

    /// all alarms matching the given exact values, newest first
    pub async fn list(&self, status: Option<String>, time: Option<String>) -> Result<Vec<AlarmPo>, ServiceError> {
        self.conn.call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, status, time, created_at FROM alarm
                 WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR time = ?2)
                 ORDER BY id DESC",
            )?;
            let rows = stmt.query_map(params![status, time], map_row)?
                .collect::<Result<Vec<AlarmPo>, rusqlite::Error>>()?;
            Ok(rows)
        }).await
    }

    /// delete by id, returns the number of removed rows
    pub async fn delete(&self, id: i64) -> Result<usize, ServiceError> {
        self.conn.call(move |conn| conn.execute("DELETE FROM alarm WHERE id = ?1", params![id])).await
    }
}
