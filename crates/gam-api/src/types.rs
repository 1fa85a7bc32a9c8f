// Wire types for the GAM management API.
//
// List endpoints return an `{items, total}` envelope; single-entity
// endpoints return flat objects. Errors arrive as `{detail: string}` or
// `{detail: [{msg}, ...]}`. These structs mirror the wire exactly --
// domain normalization happens in gam-core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

// ── Envelopes ───────────────────────────────────────────────────────

/// The `{items, total}` envelope every list endpoint returns.
///
/// `total` is the server-side count across all pages, not the size of
/// `items`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// The server's error payload: a single message or a validation list.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub msg: String,
}

// ── List request parameters ─────────────────────────────────────────

/// Query parameters for a paged list request.
///
/// `page` is 1-based on the wire (the UI-facing page index is 0-based;
/// the list controller owns that translation). Named filters are appended
/// as plain query pairs so the server can match on any column it indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search: None,
            filters: Vec::new(),
        }
    }

    /// Append all parameters to a URL's query string.
    pub fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &self.page.to_string());
        pairs.append_pair("page_size", &self.page_size.to_string());
        if let Some(ref search) = self.search {
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
        }
        for (name, value) in &self.filters {
            pairs.append_pair(name, value);
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

// ── Session ─────────────────────────────────────────────────────────

/// Response to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub user: UserDto,
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceDto {
    pub id: i64,
    pub serial: String,
    pub mac: String,
    pub ip: Option<String>,
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub product_class: Option<String>,
    pub hardware_version: Option<String>,
    pub software_version: Option<String>,
    pub online: bool,
    pub read_only: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceCreate {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortDto {
    pub id: i64,
    pub device_id: i64,
    pub index: u32,
    pub link_up: bool,
    pub speed_mbps: Option<u32>,
    pub sfp_vendor: Option<String>,
    pub sfp_serial: Option<String>,
    pub sfp_part_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointDto {
    pub id: i64,
    pub device_id: i64,
    pub mac: String,
    pub online: bool,
    pub detected_port: Option<u32>,
    pub configured_port: Option<u32>,
    pub bandwidth_profile_id: Option<i64>,
    pub provisioned: bool,
    pub registered_at: Option<DateTime<Utc>>,
}

// ── Subscribers ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriberDto {
    pub id: i64,
    pub device_id: i64,
    pub name: String,
    pub port1_vlan: Option<u16>,
    pub port1_tagged: bool,
    pub port2_vlan: Option<u16>,
    pub port2_tagged: bool,
    pub trunk_mode: bool,
    pub bandwidth_profile_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriberCreate {
    pub device_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port1_vlan: Option<u16>,
    pub port1_tagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port2_vlan: Option<u16>,
    pub port2_tagged: bool,
    pub trunk_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_profile_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port1_vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port1_tagged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port2_vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port2_tagged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_profile_id: Option<i64>,
}

// ── Bandwidth profiles ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BandwidthDto {
    pub id: i64,
    pub name: String,
    pub device_id: Option<i64>,
    /// Downstream rate in Mbit/s.
    pub ds_bw: u32,
    /// Upstream rate in Mbit/s.
    pub us_bw: u32,
    pub synced: bool,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandwidthCreate {
    pub name: String,
    pub ds_bw: u32,
    pub us_bw: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BandwidthUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ds_bw: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_bw: Option<u32>,
}

// ── Alarms ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlarmDto {
    pub id: i64,
    pub device_id: i64,
    /// CR, MJ, MN, or NA.
    pub severity: String,
    pub condition_type: String,
    pub raised_at: DateTime<Utc>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<String>,
    pub closing_date: Option<DateTime<Utc>>,
}

/// Per-severity counts of active alarms, polled for the badge display.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AlarmCounts {
    pub critical: u64,
    pub major: u64,
    pub minor: u64,
    pub normal: u64,
}

impl AlarmCounts {
    pub fn total(&self) -> u64 {
        self.critical + self.major + self.minor + self.normal
    }
}

// ── Users ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    /// Privilege level 0-15.
    pub privilege: u8,
    pub enabled: bool,
    pub session_timeout_secs: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub privilege: u8,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout_secs: Option<u32>,
}

/// Username is immutable after creation -- it never appears here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout_secs: Option<u32>,
}

// ── Firmware ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirmwareDto {
    pub id: i64,
    pub version: String,
    pub revision: Option<String>,
    /// "mimo" or "coax".
    pub technology: String,
    pub baseline: bool,
    pub size_bytes: Option<u64>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Metadata echoed back after an upload. When a manifest was included,
/// the server populates version/revision/technology from it.
#[derive(Debug, Clone, Deserialize)]
pub struct FirmwareUploadResult {
    pub id: i64,
    pub version: Option<String>,
    pub revision: Option<String>,
    pub technology: Option<String>,
}

/// Files posted as multipart form data for a firmware upload.
#[derive(Debug, Clone, Default)]
pub struct FirmwareUpload {
    pub image: Option<(String, Vec<u8>)>,
    pub manifest: Option<(String, Vec<u8>)>,
    pub checksum: Option<(String, Vec<u8>)>,
    pub signature: Option<(String, Vec<u8>)>,
}

// ── Config backups ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupDto {
    pub id: i64,
    pub device_id: i64,
    pub version: u32,
    pub backup_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}
