// Device endpoints
//
// GAM device CRUD under /gam/devices plus the action verbs (sync,
// reboot, provision, backup) and the per-device sub-collections the
// detail tabs fetch lazily.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    DeviceCreate, DeviceDto, DeviceUpdate, EndpointDto, ListQuery, Paged, PortDto,
};

impl ApiClient {
    /// List devices, paged and filtered.
    ///
    /// `GET /api/gam/devices?page=...&page_size=...`
    pub async fn list_devices(&self, query: &ListQuery) -> Result<Paged<DeviceDto>, Error> {
        let mut url = self.api_url("gam/devices")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Get a single device.
    ///
    /// `GET /api/gam/devices/{id}`
    pub async fn get_device(&self, id: i64) -> Result<DeviceDto, Error> {
        let url = self.api_url(&format!("gam/devices/{id}"))?;
        self.get(url).await
    }

    /// Discover and register a device by management IP.
    ///
    /// `POST /api/gam/devices`
    pub async fn create_device(&self, req: &DeviceCreate) -> Result<DeviceDto, Error> {
        let url = self.api_url("gam/devices")?;
        debug!(ip = %req.ip, "discovering device");
        self.post(url, req).await
    }

    /// Update mutable device fields.
    ///
    /// `PATCH /api/gam/devices/{id}`
    pub async fn update_device(&self, id: i64, req: &DeviceUpdate) -> Result<DeviceDto, Error> {
        let url = self.api_url(&format!("gam/devices/{id}"))?;
        self.patch(url, req).await
    }

    /// Delete a device. The server cascades to its ports, endpoints, and
    /// subscribers.
    ///
    /// `DELETE /api/gam/devices/{id}`
    pub async fn delete_device(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("gam/devices/{id}"))?;
        debug!(id, "deleting device");
        self.delete(url).await
    }

    // ── Device actions ───────────────────────────────────────────────

    /// Re-synchronize the device's configuration state.
    ///
    /// `POST /api/gam/devices/{id}/sync`
    pub async fn sync_device(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("gam/devices/{id}/sync"))?;
        debug!(id, "syncing device");
        self.post_action(url).await
    }

    /// Reboot the device.
    ///
    /// `POST /api/gam/devices/{id}/reboot`
    pub async fn reboot_device(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("gam/devices/{id}/reboot"))?;
        debug!(id, "rebooting device");
        self.post_action(url).await
    }

    /// Provision pending endpoint configuration onto the device.
    ///
    /// `POST /api/gam/devices/{id}/provision`
    pub async fn provision_device(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("gam/devices/{id}/provision"))?;
        debug!(id, "provisioning device");
        self.post_action(url).await
    }

    /// Trigger an immediate config backup on the device.
    ///
    /// `POST /api/gam/devices/{id}/backup`
    pub async fn backup_device(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("gam/devices/{id}/backup"))?;
        debug!(id, "requesting device backup");
        self.post_action(url).await
    }

    // ── Sub-collections (detail tabs) ────────────────────────────────

    /// List a device's ports.
    ///
    /// `GET /api/gam/devices/{id}/ports`
    pub async fn list_device_ports(&self, id: i64) -> Result<Vec<PortDto>, Error> {
        let url = self.api_url(&format!("gam/devices/{id}/ports"))?;
        self.get(url).await
    }

    /// List a device's detected endpoints (CPE units).
    ///
    /// `GET /api/gam/devices/{id}/endpoints`
    pub async fn list_device_endpoints(&self, id: i64) -> Result<Vec<EndpointDto>, Error> {
        let url = self.api_url(&format!("gam/devices/{id}/endpoints"))?;
        self.get(url).await
    }
}
