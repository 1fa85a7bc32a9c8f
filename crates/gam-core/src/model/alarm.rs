// ── Alarm domain types and lifecycle ──
//
// The one true state machine in this domain:
//
//   active-unacknowledged --ack--> active-acknowledged --close--> closed
//                        \_________________close________________/
//
// Closed is terminal. No transition is ever reversed by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// Alarm severity as reported by the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
pub enum AlarmSeverity {
    /// NA -- normal/informational.
    #[strum(serialize = "NA")]
    Normal,
    /// MN -- minor.
    #[strum(serialize = "MN")]
    Minor,
    /// MJ -- major.
    #[strum(serialize = "MJ")]
    Major,
    /// CR -- critical.
    #[strum(serialize = "CR")]
    Critical,
}

/// Lifecycle state, derived from the transition timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmState {
    ActiveUnacknowledged,
    ActiveAcknowledged,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: i64,
    pub device_id: i64,
    pub severity: AlarmSeverity,
    pub condition_type: String,
    pub raised_at: DateTime<Utc>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<String>,
    pub closing_date: Option<DateTime<Utc>>,
}

impl Alarm {
    /// Current lifecycle state. `closing_date` takes precedence: a
    /// closed alarm stays closed whether or not it was acknowledged.
    pub fn state(&self) -> AlarmState {
        if self.closing_date.is_some() {
            AlarmState::Closed
        } else if self.acknowledged_at.is_some() {
            AlarmState::ActiveAcknowledged
        } else {
            AlarmState::ActiveUnacknowledged
        }
    }

    pub fn is_active(&self) -> bool {
        self.closing_date.is_none()
    }

    /// Record an acknowledgment. Only valid from the unacknowledged
    /// state; closed alarms reject it.
    pub fn acknowledge(&mut self, actor: &str, at: DateTime<Utc>) -> Result<(), CoreError> {
        match self.state() {
            AlarmState::Closed => Err(CoreError::AlarmClosed {
                id: self.id,
                attempted: "acknowledged",
            }),
            AlarmState::ActiveAcknowledged => Ok(()), // already there, no-op
            AlarmState::ActiveUnacknowledged => {
                self.acknowledged_at = Some(at);
                self.acknowledged_by = Some(actor.to_owned());
                Ok(())
            }
        }
    }

    /// Record closure. Valid from either active state; terminal once set.
    pub fn close(&mut self, at: DateTime<Utc>) -> Result<(), CoreError> {
        match self.state() {
            AlarmState::Closed => Err(CoreError::AlarmClosed {
                id: self.id,
                attempted: "closed again",
            }),
            _ => {
                self.closing_date = Some(at);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alarm() -> Alarm {
        Alarm {
            id: 1,
            device_id: 1,
            severity: AlarmSeverity::Major,
            condition_type: "LOS".into(),
            raised_at: Utc::now(),
            acknowledged_at: None,
            acknowledged_by: None,
            closing_date: None,
        }
    }

    #[test]
    fn severity_round_trips_wire_codes() {
        assert_eq!(AlarmSeverity::Critical.to_string(), "CR");
        assert_eq!("MN".parse::<AlarmSeverity>().ok(), Some(AlarmSeverity::Minor));
        assert!("XX".parse::<AlarmSeverity>().is_err());
    }

    #[test]
    fn ack_then_close_sets_both_timestamps() {
        let mut a = alarm();
        assert_eq!(a.state(), AlarmState::ActiveUnacknowledged);

        a.acknowledge("operator", Utc::now()).unwrap();
        assert_eq!(a.state(), AlarmState::ActiveAcknowledged);
        assert_eq!(a.acknowledged_by.as_deref(), Some("operator"));

        a.close(Utc::now()).unwrap();
        assert_eq!(a.state(), AlarmState::Closed);
        assert!(a.acknowledged_at.is_some());
        assert!(a.closing_date.is_some());
        assert!(!a.is_active());
    }

    #[test]
    fn close_straight_from_unacknowledged() {
        let mut a = alarm();
        a.close(Utc::now()).unwrap();
        assert_eq!(a.state(), AlarmState::Closed);
        assert!(a.acknowledged_at.is_none());
    }

    #[test]
    fn closed_is_terminal() {
        let mut a = alarm();
        a.close(Utc::now()).unwrap();

        assert!(matches!(
            a.acknowledge("operator", Utc::now()),
            Err(CoreError::AlarmClosed { .. })
        ));
        assert!(matches!(
            a.close(Utc::now()),
            Err(CoreError::AlarmClosed { .. })
        ));
        // And the state never moved.
        assert_eq!(a.state(), AlarmState::Closed);
    }

    #[test]
    fn double_acknowledge_is_a_noop() {
        let mut a = alarm();
        let first = Utc::now();
        a.acknowledge("one", first).unwrap();
        a.acknowledge("two", Utc::now()).unwrap();
        // First acknowledgment is preserved.
        assert_eq!(a.acknowledged_by.as_deref(), Some("one"));
        assert_eq!(a.acknowledged_at, Some(first));
    }
}
