// ── Domain model ──
//
// Canonical entity types consumed by the console. Derived display
// fields (endpoint status, port media) are pure functions of entity
// state, recomputed at render time and never persisted.

pub mod alarm;
pub mod backup;
pub mod bandwidth;
pub mod device;
pub mod endpoint;
pub mod firmware;
pub mod subscriber;
pub mod user;

pub use alarm::{Alarm, AlarmSeverity, AlarmState};
pub use backup::ConfigBackup;
pub use bandwidth::BandwidthProfile;
pub use device::{Device, Port, PortMedia};
pub use endpoint::{Endpoint, ProvisioningStatus};
pub use firmware::{FirmwareImage, Technology};
pub use subscriber::{Subscriber, VlanAssignment};
pub use user::User;
