// ── Bandwidth profile domain types ──

use serde::{Deserialize, Serialize};

/// A named downstream/upstream rate-limit policy, optionally scoped to
/// a device. `synced` tracks whether the device currently carries this
/// profile's rates; `deleted` is the server's soft-delete flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandwidthProfile {
    pub id: i64,
    pub name: String,
    pub device_id: Option<i64>,
    /// Downstream rate in Mbit/s.
    pub downstream_mbps: u32,
    /// Upstream rate in Mbit/s.
    pub upstream_mbps: u32,
    pub synced: bool,
    pub deleted: bool,
}

impl BandwidthProfile {
    /// Rate summary for list rendering, e.g. `"500/500"`.
    pub fn rate_summary(&self) -> String {
        format!("{}/{}", self.downstream_mbps, self.upstream_mbps)
    }
}
