// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A managed GAM access device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub serial: String,
    pub mac: String,
    pub ip: Option<IpAddr>,
    pub name: Option<String>,

    // Classification
    pub vendor: Option<String>,
    pub product_class: Option<String>,
    pub hardware_version: Option<String>,
    pub software_version: Option<String>,

    // Operational state
    pub online: bool,
    pub read_only: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

impl Device {
    /// Display name: explicit name if set, otherwise the serial.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.serial)
    }

    /// Whether config-changing operations are permitted on this device.
    /// The server enforces the same gate; checking here lets the UI
    /// disable the controls up front.
    pub fn allows_config_ops(&self) -> bool {
        self.online && !self.read_only
    }
}

/// A physical port on a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: i64,
    pub device_id: i64,
    pub index: u32,
    pub link_up: bool,
    pub speed_mbps: Option<u32>,
    pub sfp_vendor: Option<String>,
    pub sfp_serial: Option<String>,
    pub sfp_part_number: Option<String>,
}

/// Port media type, derived from SFP metadata at render time and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortMedia {
    Copper,
    Fiber,
}

impl Port {
    /// Classify the port's media: any SFP metadata means an optical
    /// module is seated.
    pub fn media(&self) -> PortMedia {
        if self.sfp_vendor.is_some() || self.sfp_part_number.is_some() {
            PortMedia::Fiber
        } else {
            PortMedia::Copper
        }
    }
}

impl PortMedia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copper => "copper",
            Self::Fiber => "fiber",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(sfp_vendor: Option<&str>) -> Port {
        Port {
            id: 1,
            device_id: 1,
            index: 1,
            link_up: true,
            speed_mbps: Some(1000),
            sfp_vendor: sfp_vendor.map(String::from),
            sfp_serial: None,
            sfp_part_number: None,
        }
    }

    #[test]
    fn sfp_metadata_classifies_as_fiber() {
        assert_eq!(port(Some("FS")).media(), PortMedia::Fiber);
        assert_eq!(port(None).media(), PortMedia::Copper);
    }

    #[test]
    fn config_ops_require_online_and_writable() {
        let mut device = Device {
            id: 1,
            serial: "GM1001".into(),
            mac: "00:11:22:33:44:55".into(),
            ip: None,
            name: None,
            vendor: None,
            product_class: None,
            hardware_version: None,
            software_version: None,
            online: true,
            read_only: false,
            last_seen: None,
        };
        assert!(device.allows_config_ops());

        device.read_only = true;
        assert!(!device.allows_config_ops());

        device.read_only = false;
        device.online = false;
        assert!(!device.allows_config_ops());
    }
}
