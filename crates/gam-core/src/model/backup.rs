// ── Config backup domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A versioned device configuration backup. Immutable once created;
/// the content blob is fetched on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigBackup {
    pub id: i64,
    pub device_id: i64,
    pub version: u32,
    pub backup_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}
