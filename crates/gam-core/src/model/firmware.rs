// ── Firmware domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// GAM access technology class. Each technology carries exactly one
/// baseline image, enforced server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Mimo,
    Coax,
}

/// A versioned firmware image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmwareImage {
    pub id: i64,
    pub version: String,
    pub revision: Option<String>,
    pub technology: Technology,
    /// Whether this is the designated standard image for its technology.
    pub baseline: bool,
    pub size_bytes: Option<u64>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl FirmwareImage {
    /// Full version label, e.g. `"1.8.1-r5"`.
    pub fn version_label(&self) -> String {
        match self.revision {
            Some(ref rev) => format!("{}-{}", self.version, rev),
            None => self.version.clone(),
        }
    }
}
