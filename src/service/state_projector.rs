//! current state of every entity, always read from the store
//!
//! LED and music are append-only logs whose "current" value is the row with
//! the highest id, with a fixed default when the log is empty. Music writes
//! that carry fields forward go through [`StateProjector::apply_music`], which
//! reads the latest row and appends in a single transaction.

use crate::common::dao::Dao;
use crate::common::error::ServiceError;
use crate::common::sqlite::SqliteConnection;
use crate::dao::alarm_dao::AlarmDao;
use crate::dao::led_dao::LedDao;
use crate::dao::music_dao::MusicDao;
use crate::dao::routine_dao::RoutineDao;
use crate::entity::dto::{AlarmDto, LedStateDto, MusicStateDto, RoutineDto};
use crate::entity::po::RoutinePo;
use crate::{debug, info};

const LOG_TAG: &str = "state_projector";

/// a music command, expressed as a change to the previous state
#[derive(Debug, Clone, PartialEq)]
pub enum MusicChange {
    /// start playing `mode` at the fixed start volume
    Play { mode: String },
    /// stop, keeping mode and volume
    Stop,
    /// change volume, keeping status and mode
    Volume(i64),
}

pub const PLAY_VOLUME: i64 = 80;

impl MusicChange {
    /// derive the next state from the previous one
    pub fn apply(self, prev: MusicStateDto) -> MusicStateDto {
        match self {
            MusicChange::Play { mode } => MusicStateDto { status: "on".to_string(), mode, volume: PLAY_VOLUME },
            MusicChange::Stop => MusicStateDto { status: "off".to_string(), ..prev },
            MusicChange::Volume(volume) => MusicStateDto { volume, ..prev },
        }
    }
}

#[derive(Clone)]
pub struct StateProjector {
    conn: SqliteConnection,
    led: LedDao,
    music: MusicDao,
    alarm: AlarmDao,
    routine: RoutineDao,
}

impl StateProjector {
    pub fn new(conn: SqliteConnection) -> Self {
        StateProjector {
            led: LedDao::new(conn.clone()),
            music: MusicDao::new(conn.clone()),
            alarm: AlarmDao::new(conn.clone()),
            routine: RoutineDao::new(conn.clone()),
            conn,
        }
    }

    /// create missing tables
    pub async fn init_tables(&self) -> Result<(), ServiceError> {
        self.led.ensure_table_exist().await?;
        self.music.ensure_table_exist().await?;
        self.alarm.ensure_table_exist().await?;
        self.routine.ensure_table_exist().await?;
        info!(LOG_TAG, "sqlite tables ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.conn.ping().await
    }

    pub fn led_dao(&self) -> &LedDao {
        &self.led
    }

    pub fn alarm_dao(&self) -> &AlarmDao {
        &self.alarm
    }

    pub fn routine_dao(&self) -> &RoutineDao {
        &self.routine
    }

    pub async fn current_led(&self) -> Result<LedStateDto, ServiceError> {
        let state = self.led.latest().await?.map(LedStateDto::from).unwrap_or_default();
        debug!(LOG_TAG, "current led: {:?}", state);
        Ok(state)
    }

    pub async fn current_music(&self) -> Result<MusicStateDto, ServiceError> {
        let state = self.music.latest().await?.map(MusicStateDto::from).unwrap_or_default();
        debug!(LOG_TAG, "current music: {:?}", state);
        Ok(state)
    }

    /// append the state produced by `change` relative to the latest row
    pub async fn apply_music(&self, change: MusicChange) -> Result<MusicStateDto, ServiceError> {
        let po = self.music.append_relative_to_latest(move |last| {
            let prev = last.map(MusicStateDto::from).unwrap_or_default();
            change.apply(prev)
        }).await?;
        info!(LOG_TAG, "music state appended, id: {}", po.id);
        Ok(MusicStateDto::from(po))
    }

    /// alarms matching the given exact filters, newest first
    pub async fn list_alarms(&self, status: Option<String>, time: Option<String>) -> Result<Vec<AlarmDto>, ServiceError> {
        let rows = self.alarm.list(status, time).await?;
        Ok(rows.into_iter().map(AlarmDto::from).collect())
    }

    /// routines, newest first
    pub async fn list_routines(&self) -> Result<Vec<RoutineDto>, ServiceError> {
        let rows = self.routine.list().await?;
        Ok(rows.into_iter().map(RoutineDto::from).collect())
    }

    pub async fn find_routine(&self, id: i64) -> Result<RoutinePo, ServiceError> {
        self.routine.find(id).await?
            .ok_or_else(|| ServiceError::not_found("routine not found"))
    }
}
