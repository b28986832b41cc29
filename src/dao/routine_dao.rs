//! routine table, actions stored as json text
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::common::dao::Dao;
use crate::common::error::ServiceError;
use crate::common::sqlite::SqliteConnection;
use crate::entity::dto::NewRoutineDto;
use crate::entity::po::{Actions, RoutinePo};

#[derive(Clone)]
pub struct RoutineDao {
    conn: SqliteConnection,
}

#[async_trait]
impl Dao for RoutineDao {
    fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    fn table_name(&self) -> &'static str {
        "routine"
    }

    fn columns(&self) -> &'static str {
        "id              INTEGER PRIMARY KEY AUTOINCREMENT,
        name            TEXT NOT NULL,
        time            TEXT NOT NULL,
        enabled         INTEGER NOT NULL DEFAULT 1,
        actions         TEXT NOT NULL,
        created_at      TEXT NOT NULL"
    }
}

fn map_row(row: &Row) -> rusqlite::Result<RoutinePo> {
    let actions_json: String = row.get(4)?;
    let actions: Actions = serde_json::from_str(actions_json.as_str())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(RoutinePo {
        id: row.get(0)?,
        name: row.get(1)?,
        time: row.get(2)?,
        enabled: row.get(3)?,
        actions,
        created_at: row.get(5)?,
    })
}

impl RoutineDao {
    pub fn new(conn: SqliteConnection) -> Self {
        RoutineDao { conn }
    }

    pub async fn insert(&self, routine: NewRoutineDto) -> Result<RoutinePo, ServiceError> {
        let actions_json = serde_json::to_string(&routine.actions)
            .map_err(|e| ServiceError::internal(format!("cannot serialize actions: {e}")))?;
        self.conn.call(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO routine (name, time, enabled, actions, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![routine.name, routine.time, routine.enabled, actions_json, created_at],
            )?;
            Ok(RoutinePo {
                id: conn.last_insert_rowid(),
                name: routine.name,
                time: routine.time,
                enabled: routine.enabled,
                actions: routine.actions,
                created_at,
            })
        }).await
    }

    pub async fn find(&self, id: i64) -> Result<Option<RoutinePo>, ServiceError> {
        self.conn.call(move |conn| {
            conn.query_row(
                "SELECT id, name, time, enabled, actions, created_at FROM routine WHERE id = ?1",
                params![id],
                map_row,
            ).optional()
        }).await
    }

    /// all routines, newest first
    pub async fn list(&self) -> Result<Vec<RoutinePo>, ServiceError> {
        self.conn.call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, time, enabled, actions, created_at FROM routine ORDER BY id DESC",
            )?;
            let rows = stmt.query_map([], map_row)?
                .collect::<Result<Vec<RoutinePo>, rusqlite::Error>>()?;
            Ok(rows)
        }).await
    }

    pub async fn delete(&self, id: i64) -> Result<usize, ServiceError> {
        self.conn.call(move |conn| conn.execute("DELETE FROM routine WHERE id = ?1", params![id])).await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.conn.call(|conn| conn.query_row("SELECT count(*) FROM routine", [], |row| row.get(0))).await
    }
}
