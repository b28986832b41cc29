//! persisted rows, one struct per table

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// free-form action document stored with a routine, key order preserved
pub type Actions = Map<String, Value>;

/// row of `led`
#[derive(Debug, Clone)]
pub struct LedPo {
    pub id: i64,
    // "on" / "off"
    pub status: String,
    pub color: String,
    // 0-100
    pub brightness: i64,
    pub created_at: DateTime<Utc>,
}

/// row of `music`
#[derive(Debug, Clone)]
pub struct MusicPo {
    pub id: i64,
    pub status: String,
    pub mode: String,
    // 0-100
    pub volume: i64,
    pub created_at: DateTime<Utc>,
}

/// row of `alarm`
#[derive(Debug, Clone)]
pub struct AlarmPo {
    pub id: i64,
    pub status: String,
    // 5 characters, "HH:MM" by convention
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// row of `routine`
#[derive(Debug, Clone)]
pub struct RoutinePo {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub enabled: bool,
    pub actions: Actions,
    pub created_at: DateTime<Utc>,
}
