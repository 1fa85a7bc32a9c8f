// ── API-to-domain type conversions ──
//
// Bridges raw `gam_api` wire types into canonical `gam_core::model`
// domain types. Each `From` impl parses strings into strong types and
// fills sensible defaults for missing optional data.

use std::net::IpAddr;

use gam_api::types::{
    AlarmDto, BackupDto, BandwidthDto, DeviceDto, EndpointDto, FirmwareDto, PortDto,
    SubscriberDto, UserDto,
};

use crate::model::{
    Alarm, AlarmSeverity, BandwidthProfile, ConfigBackup, Device, Endpoint, FirmwareImage, Port,
    Subscriber, Technology, User, VlanAssignment,
};

/// Parse an optional string to an `IpAddr`, dropping unparseable values.
fn parse_ip(raw: &Option<String>) -> Option<IpAddr> {
    raw.as_deref().and_then(|s| s.parse().ok())
}

impl From<DeviceDto> for Device {
    fn from(dto: DeviceDto) -> Self {
        Self {
            id: dto.id,
            serial: dto.serial,
            mac: dto.mac,
            ip: parse_ip(&dto.ip),
            name: dto.name,
            vendor: dto.vendor,
            product_class: dto.product_class,
            hardware_version: dto.hardware_version,
            software_version: dto.software_version,
            online: dto.online,
            read_only: dto.read_only,
            last_seen: dto.last_seen,
        }
    }
}

impl From<PortDto> for Port {
    fn from(dto: PortDto) -> Self {
        Self {
            id: dto.id,
            device_id: dto.device_id,
            index: dto.index,
            link_up: dto.link_up,
            speed_mbps: dto.speed_mbps,
            sfp_vendor: dto.sfp_vendor,
            sfp_serial: dto.sfp_serial,
            sfp_part_number: dto.sfp_part_number,
        }
    }
}

impl From<EndpointDto> for Endpoint {
    fn from(dto: EndpointDto) -> Self {
        Self {
            id: dto.id,
            device_id: dto.device_id,
            mac: dto.mac,
            online: dto.online,
            detected_port: dto.detected_port,
            configured_port: dto.configured_port,
            bandwidth_profile_id: dto.bandwidth_profile_id,
            provisioned: dto.provisioned,
            registered_at: dto.registered_at,
        }
    }
}

impl From<SubscriberDto> for Subscriber {
    fn from(dto: SubscriberDto) -> Self {
        Self {
            id: dto.id,
            device_id: dto.device_id,
            name: dto.name,
            port1: VlanAssignment {
                vlan: dto.port1_vlan,
                tagged: dto.port1_tagged,
            },
            port2: VlanAssignment {
                vlan: dto.port2_vlan,
                tagged: dto.port2_tagged,
            },
            trunk_mode: dto.trunk_mode,
            bandwidth_profile_id: dto.bandwidth_profile_id,
        }
    }
}

impl From<BandwidthDto> for BandwidthProfile {
    fn from(dto: BandwidthDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            device_id: dto.device_id,
            downstream_mbps: dto.ds_bw,
            upstream_mbps: dto.us_bw,
            synced: dto.synced,
            deleted: dto.deleted,
        }
    }
}

impl From<AlarmDto> for Alarm {
    fn from(dto: AlarmDto) -> Self {
        Self {
            id: dto.id,
            device_id: dto.device_id,
            // Unknown severity codes degrade to NA rather than failing
            // the whole list fetch.
            severity: dto
                .severity
                .parse()
                .unwrap_or(AlarmSeverity::Normal),
            condition_type: dto.condition_type,
            raised_at: dto.raised_at,
            acknowledged_at: dto.acknowledged_at,
            acknowledged_by: dto.acknowledged_by,
            closing_date: dto.closing_date,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            privilege: dto.privilege.min(User::MAX_PRIVILEGE),
            enabled: dto.enabled,
            session_timeout_secs: dto.session_timeout_secs,
        }
    }
}

impl From<FirmwareDto> for FirmwareImage {
    fn from(dto: FirmwareDto) -> Self {
        Self {
            id: dto.id,
            version: dto.version,
            revision: dto.revision,
            technology: dto.technology.parse().unwrap_or(Technology::Mimo),
            baseline: dto.baseline,
            size_bytes: dto.size_bytes,
            uploaded_at: dto.uploaded_at,
        }
    }
}

impl From<BackupDto> for ConfigBackup {
    fn from(dto: BackupDto) -> Self {
        Self {
            id: dto.id,
            device_id: dto.device_id,
            version: dto.version,
            backup_type: dto.backup_type,
            size_bytes: dto.size_bytes,
            created_at: dto.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn alarm_severity_parses_wire_codes() {
        let dto = AlarmDto {
            id: 1,
            device_id: 2,
            severity: "CR".into(),
            condition_type: "LOS".into(),
            raised_at: Utc::now(),
            acknowledged_at: None,
            acknowledged_by: None,
            closing_date: None,
        };
        let alarm: Alarm = dto.into();
        assert_eq!(alarm.severity, AlarmSeverity::Critical);
    }

    #[test]
    fn unknown_severity_degrades_to_normal() {
        let dto = AlarmDto {
            id: 1,
            device_id: 2,
            severity: "??".into(),
            condition_type: "LOS".into(),
            raised_at: Utc::now(),
            acknowledged_at: None,
            acknowledged_by: None,
            closing_date: None,
        };
        let alarm: Alarm = dto.into();
        assert_eq!(alarm.severity, AlarmSeverity::Normal);
    }

    #[test]
    fn device_ip_parses_or_drops() {
        let mut dto = DeviceDto {
            id: 1,
            serial: "GM1001".into(),
            mac: "00:11:22:33:44:55".into(),
            ip: Some("10.0.0.2".into()),
            name: None,
            vendor: None,
            product_class: None,
            hardware_version: None,
            software_version: None,
            online: true,
            read_only: false,
            last_seen: None,
        };
        let device: Device = dto.clone().into();
        assert_eq!(device.ip.map(|ip| ip.to_string()).as_deref(), Some("10.0.0.2"));

        dto.ip = Some("not-an-ip".into());
        let device: Device = dto.into();
        assert!(device.ip.is_none());
    }
}
