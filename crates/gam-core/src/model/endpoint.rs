// ── Endpoint (CPE) domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer-premises unit detected on a device port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
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

/// Display status of an endpoint, derived from entity fields at render
/// time and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningStatus {
    /// Provisioned on the device (live or not).
    Provisioned,
    /// Live on a port but not yet provisioned.
    Connected,
    /// Known to the system but currently neither live nor provisioned.
    Unprovisioned,
    /// Freshly detected: no configuration has ever been applied.
    New,
}

impl ProvisioningStatus {
    /// Classify an endpoint. Pure function of the entity fields --
    /// recomputed on every render.
    pub fn classify(endpoint: &Endpoint) -> Self {
        match (endpoint.provisioned, endpoint.online) {
            (true, _) => Self::Provisioned,
            (false, true) => Self::Connected,
            (false, false) => {
                if endpoint.configured_port.is_none() && endpoint.bandwidth_profile_id.is_none() {
                    Self::New
                } else {
                    Self::Unprovisioned
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioned => "provisioned",
            Self::Connected => "connected",
            Self::Unprovisioned => "unprovisioned",
            Self::New => "new",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(provisioned: bool, online: bool) -> Endpoint {
        Endpoint {
            id: 1,
            device_id: 1,
            mac: "aa:bb:cc:00:11:22".into(),
            online,
            detected_port: Some(3),
            configured_port: None,
            bandwidth_profile_id: None,
            provisioned,
            registered_at: None,
        }
    }

    #[test]
    fn provisioned_wins_regardless_of_liveness() {
        assert_eq!(
            ProvisioningStatus::classify(&endpoint(true, true)),
            ProvisioningStatus::Provisioned
        );
        assert_eq!(
            ProvisioningStatus::classify(&endpoint(true, false)),
            ProvisioningStatus::Provisioned
        );
    }

    #[test]
    fn live_unprovisioned_is_connected() {
        assert_eq!(
            ProvisioningStatus::classify(&endpoint(false, true)),
            ProvisioningStatus::Connected
        );
    }

    #[test]
    fn untouched_offline_endpoint_is_new() {
        assert_eq!(
            ProvisioningStatus::classify(&endpoint(false, false)),
            ProvisioningStatus::New
        );
    }

    #[test]
    fn configured_but_offline_is_unprovisioned() {
        let mut e = endpoint(false, false);
        e.configured_port = Some(2);
        assert_eq!(
            ProvisioningStatus::classify(&e),
            ProvisioningStatus::Unprovisioned
        );
    }
}
