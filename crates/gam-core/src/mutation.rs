// ── Mutations ──
//
// Every write against the controller is an [`Action`]. Actions know
// which cached queries they make stale and where the console should
// land afterwards; [`MutationHandle`] serializes them so a slow write
// cannot be doubled by an impatient operator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::CoreError;
use crate::query::{InvalidationScope, Resource};

/// Where the console navigates after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Stay on the current view.
    Stay,
    /// The mutated entity no longer exists; return to its list.
    List(Resource),
}

/// A write operation against the management server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDevice,
    UpdateDevice(i64),
    DeleteDevice(i64),
    SyncDevice(i64),
    RebootDevice(i64),
    ProvisionEndpoints(i64),
    BackupDevice(i64),

    CreateSubscriber { device_id: i64 },
    UpdateSubscriber { id: i64, device_id: i64 },
    DeleteSubscriber { id: i64, device_id: i64 },

    CreateBandwidth { device_id: i64 },
    UpdateBandwidth { id: i64, device_id: i64 },
    DeleteBandwidth { id: i64, device_id: i64 },
    PushBandwidth { id: i64, device_id: i64 },

    AcknowledgeAlarm(i64),
    CloseAlarm(i64),

    CreateUser,
    UpdateUser(i64),
    DeleteUser(i64),

    UploadFirmware,
    SetFirmwareBaseline(i64),
    DeleteFirmware(i64),

    RestoreBackup { id: i64, device_id: i64 },
    DeleteBackup { id: i64, device_id: i64 },
}

impl Action {
    /// Scopes to invalidate once the server has accepted the write.
    pub fn invalidations(&self) -> Vec<InvalidationScope> {
        use InvalidationScope::{Device, Entity, Resource as All};
        match *self {
            Action::CreateDevice => vec![All(Resource::Devices)],
            Action::UpdateDevice(id) => vec![Entity(Resource::Devices, id)],
            Action::DeleteDevice(id) => vec![Device(id), All(Resource::Devices)],
            // Sync pushes pending config; every device-scoped view may
            // have changed server-side.
            Action::SyncDevice(id) | Action::RebootDevice(id) => {
                vec![Device(id), Entity(Resource::Devices, id)]
            }
            Action::ProvisionEndpoints(id) => {
                vec![Device(id), All(Resource::Subscribers)]
            }
            Action::BackupDevice(id) => vec![Device(id)],

            Action::CreateSubscriber { device_id } => {
                vec![All(Resource::Subscribers), Device(device_id)]
            }
            Action::UpdateSubscriber { id, device_id }
            | Action::DeleteSubscriber { id, device_id } => {
                vec![Entity(Resource::Subscribers, id), Device(device_id)]
            }

            Action::CreateBandwidth { device_id } => {
                vec![All(Resource::Bandwidths), Device(device_id)]
            }
            Action::UpdateBandwidth { id, device_id }
            | Action::DeleteBandwidth { id, device_id }
            | Action::PushBandwidth { id, device_id } => {
                vec![Entity(Resource::Bandwidths, id), Device(device_id)]
            }

            Action::AcknowledgeAlarm(id) | Action::CloseAlarm(id) => vec![
                Entity(Resource::Alarms, id),
                All(Resource::AlarmCounts),
            ],

            Action::CreateUser => vec![All(Resource::Users)],
            Action::UpdateUser(id) | Action::DeleteUser(id) => {
                vec![Entity(Resource::Users, id)]
            }

            Action::UploadFirmware => vec![All(Resource::Firmware)],
            Action::SetFirmwareBaseline(_) => vec![All(Resource::Firmware)],
            Action::DeleteFirmware(id) => vec![Entity(Resource::Firmware, id)],

            Action::RestoreBackup { device_id, .. } => vec![Device(device_id)],
            Action::DeleteBackup { id, device_id } => {
                vec![Entity(Resource::Backups, id), Device(device_id)]
            }
        }
    }

    /// Post-success navigation. Deletes leave the entity's detail view.
    pub fn navigation(&self) -> Navigation {
        match *self {
            Action::DeleteDevice(_) => Navigation::List(Resource::Devices),
            Action::DeleteSubscriber { .. } => Navigation::List(Resource::Subscribers),
            Action::DeleteBandwidth { .. } => Navigation::List(Resource::Bandwidths),
            Action::DeleteUser(_) => Navigation::List(Resource::Users),
            Action::DeleteFirmware(_) => Navigation::List(Resource::Firmware),
            _ => Navigation::Stay,
        }
    }

    /// Short human label for progress and error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Action::CreateDevice => "create device",
            Action::UpdateDevice(_) => "update device",
            Action::DeleteDevice(_) => "delete device",
            Action::SyncDevice(_) => "sync device",
            Action::RebootDevice(_) => "reboot device",
            Action::ProvisionEndpoints(_) => "provision endpoints",
            Action::BackupDevice(_) => "back up device",
            Action::CreateSubscriber { .. } => "create subscriber",
            Action::UpdateSubscriber { .. } => "update subscriber",
            Action::DeleteSubscriber { .. } => "delete subscriber",
            Action::CreateBandwidth { .. } => "create bandwidth profile",
            Action::UpdateBandwidth { .. } => "update bandwidth profile",
            Action::DeleteBandwidth { .. } => "delete bandwidth profile",
            Action::PushBandwidth { .. } => "push bandwidth profile",
            Action::AcknowledgeAlarm(_) => "acknowledge alarm",
            Action::CloseAlarm(_) => "close alarm",
            Action::CreateUser => "create user",
            Action::UpdateUser(_) => "update user",
            Action::DeleteUser(_) => "delete user",
            Action::UploadFirmware => "upload firmware",
            Action::SetFirmwareBaseline(_) => "set firmware baseline",
            Action::DeleteFirmware(_) => "delete firmware",
            Action::RestoreBackup { .. } => "restore backup",
            Action::DeleteBackup { .. } => "delete backup",
        }
    }
}

/// Serializes mutations: at most one in flight at a time. Starting a
/// second while the first is pending yields [`CoreError::MutationPending`].
#[derive(Clone, Default)]
pub struct MutationHandle {
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag on drop, success or failure alike.
#[derive(Debug)]
pub struct MutationGuard {
    busy: Arc<AtomicBool>,
}

impl MutationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, action: &Action) -> Result<MutationGuard, CoreError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(CoreError::MutationPending {
                action: action.describe().to_owned(),
            });
        }
        Ok(MutationGuard {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_while_pending_is_rejected() {
        let handle = MutationHandle::new();
        let guard = handle.begin(&Action::SyncDevice(1)).expect("first begin");
        let err = handle.begin(&Action::RebootDevice(1)).unwrap_err();
        assert!(matches!(err, CoreError::MutationPending { .. }));
        drop(guard);
        assert!(handle.begin(&Action::RebootDevice(1)).is_ok());
    }

    #[test]
    fn guard_releases_on_drop_even_mid_error() {
        let handle = MutationHandle::new();
        {
            let _guard = handle.begin(&Action::CreateUser).expect("begin");
            assert!(handle.is_busy());
        }
        assert!(!handle.is_busy());
    }

    #[test]
    fn delete_navigates_back_to_list() {
        assert_eq!(
            Action::DeleteDevice(3).navigation(),
            Navigation::List(Resource::Devices)
        );
        assert_eq!(Action::SyncDevice(3).navigation(), Navigation::Stay);
    }

    #[test]
    fn delete_device_invalidates_device_scope_and_list() {
        let scopes = Action::DeleteDevice(3).invalidations();
        assert!(scopes.contains(&InvalidationScope::Device(3)));
        assert!(scopes.contains(&InvalidationScope::Resource(Resource::Devices)));
    }

    #[test]
    fn alarm_actions_invalidate_counts() {
        let scopes = Action::AcknowledgeAlarm(9).invalidations();
        assert!(scopes.contains(&InvalidationScope::Resource(Resource::AlarmCounts)));
    }
}
