// ── Subscriber domain types ──

use serde::{Deserialize, Serialize};

/// VLAN assignment for one subscriber port.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VlanAssignment {
    pub vlan: Option<u16>,
    pub tagged: bool,
}

/// A service binding on a device: VLANs per port, optional trunk mode,
/// optional bandwidth profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: i64,
    pub device_id: i64,
    pub name: String,
    pub port1: VlanAssignment,
    pub port2: VlanAssignment,
    pub trunk_mode: bool,
    pub bandwidth_profile_id: Option<i64>,
}

impl Subscriber {
    /// Human-readable VLAN summary for list rendering, e.g. `"100t/200"`.
    pub fn vlan_summary(&self) -> String {
        let fmt = |a: &VlanAssignment| match a.vlan {
            Some(v) if a.tagged => format!("{v}t"),
            Some(v) => v.to_string(),
            None => "-".to_owned(),
        };
        if self.trunk_mode {
            "trunk".to_owned()
        } else {
            format!("{}/{}", fmt(&self.port1), fmt(&self.port2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vlan_summary_formats_tagging_and_trunk() {
        let mut s = Subscriber {
            id: 1,
            device_id: 1,
            name: "cust-1".into(),
            port1: VlanAssignment {
                vlan: Some(100),
                tagged: true,
            },
            port2: VlanAssignment {
                vlan: Some(200),
                tagged: false,
            },
            trunk_mode: false,
            bandwidth_profile_id: None,
        };
        assert_eq!(s.vlan_summary(), "100t/200");

        s.port2.vlan = None;
        assert_eq!(s.vlan_summary(), "100t/-");

        s.trunk_mode = true;
        assert_eq!(s.vlan_summary(), "trunk");
    }
}
