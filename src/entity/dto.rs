//! wire objects exchanged over http, shared by the server and the client

use serde_derive::{Deserialize, Serialize};

use super::po::{Actions, AlarmPo, LedPo, MusicPo, RoutinePo};

/// led state as seen by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedStateDto {
    pub status: String,
    pub color: String,
    pub brightness: i64,
}

impl Default for LedStateDto {
    fn default() -> Self {
        LedStateDto {
            status: "off".to_string(),
            color: "#FFFFFF".to_string(),
            brightness: 100,
        }
    }
}

impl From<LedPo> for LedStateDto {
    fn from(po: LedPo) -> Self {
        LedStateDto { status: po.status, color: po.color, brightness: po.brightness }
    }
}

/// music state as seen by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicStateDto {
    pub status: String,
    pub mode: String,
    pub volume: i64,
}

impl Default for MusicStateDto {
    fn default() -> Self {
        MusicStateDto {
            status: "off".to_string(),
            mode: "classic".to_string(),
            volume: 80,
        }
    }
}

impl From<MusicPo> for MusicStateDto {
    fn from(po: MusicPo) -> Self {
        MusicStateDto { status: po.status, mode: po.mode, volume: po.volume }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayMusicDto {
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDto {
    pub volume: i64,
}

/// alarm before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlarmDto {
    pub status: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDto {
    pub id: i64,
    pub status: String,
    pub time: String,
}

impl From<AlarmPo> for AlarmDto {
    fn from(po: AlarmPo) -> Self {
        AlarmDto { id: po.id, status: po.status, time: po.time }
    }
}

/// query string of `GET /alarm`, `id` is accepted but not used for filtering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmQueryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl AlarmQueryDto {
    /// build from raw query pairs, the first value of a repeated key wins
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
        AlarmQueryDto { id: first("id"), status: first("status"), time: first("time") }
    }
}

/// routine before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoutineDto {
    pub name: String,
    pub time: String,
    pub enabled: bool,
    pub actions: Actions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDto {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub enabled: bool,
    pub actions: Actions,
}

impl From<RoutinePo> for RoutineDto {
    fn from(po: RoutinePo) -> Self {
        RoutineDto { id: po.id, name: po.name, time: po.time, enabled: po.enabled, actions: po.actions }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedDto {
    pub deleted: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrExportRequestDto {
    pub routine_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeDto {
    pub qr_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrImportedDto {
    pub imported: RoutineDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerDto {
    pub service: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// body of every 4xx/5xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
