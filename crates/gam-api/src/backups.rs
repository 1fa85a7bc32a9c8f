// Config backup endpoints
//
// Backups are versioned and immutable once created; the content blob is
// fetched on demand, never inlined in list responses.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::BackupDto;

impl ApiClient {
    /// List a device's config backups, newest first.
    ///
    /// `GET /api/gam/devices/{device_id}/backups`
    pub async fn list_device_backups(&self, device_id: i64) -> Result<Vec<BackupDto>, Error> {
        let url = self.api_url(&format!("gam/devices/{device_id}/backups"))?;
        self.get(url).await
    }

    /// Get a single backup's metadata.
    ///
    /// `GET /api/backups/{id}`
    pub async fn get_backup(&self, id: i64) -> Result<BackupDto, Error> {
        let url = self.api_url(&format!("backups/{id}"))?;
        self.get(url).await
    }

    /// Fetch the backup's content blob.
    ///
    /// `GET /api/backups/{id}/content`
    pub async fn get_backup_content(&self, id: i64) -> Result<Vec<u8>, Error> {
        let url = self.api_url(&format!("backups/{id}/content"))?;
        self.get_bytes(url).await
    }

    /// Restore this backup onto its device. Requires the device to be
    /// online and not read-only; otherwise the server rejects it.
    ///
    /// `POST /api/backups/{id}/restore`
    pub async fn restore_backup(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("backups/{id}/restore"))?;
        debug!(id, "restoring config backup");
        self.post_action(url).await
    }

    /// Delete a backup.
    ///
    /// `DELETE /api/backups/{id}`
    pub async fn delete_backup(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("backups/{id}"))?;
        debug!(id, "deleting backup");
        self.delete(url).await
    }
}
