// Firmware endpoints
//
// Versioned images per technology (mimo/coax) with one designated
// baseline each. Upload posts the image plus optional manifest,
// checksum, and signature as multipart form data; when a manifest is
// present the server fills in version metadata and echoes it back.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{FirmwareDto, FirmwareUpload, FirmwareUploadResult, ListQuery, Paged};

impl ApiClient {
    /// List firmware images, paged and filtered (technology).
    ///
    /// `GET /api/firmware`
    pub async fn list_firmware(&self, query: &ListQuery) -> Result<Paged<FirmwareDto>, Error> {
        let mut url = self.api_url("firmware")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Get a single firmware image.
    ///
    /// `GET /api/firmware/{id}`
    pub async fn get_firmware(&self, id: i64) -> Result<FirmwareDto, Error> {
        let url = self.api_url(&format!("firmware/{id}"))?;
        self.get(url).await
    }

    /// Upload a firmware image with its side files.
    ///
    /// `POST /api/firmware/upload` (multipart form data). The response
    /// echoes version/revision/technology, populated from the manifest
    /// when one was included.
    pub async fn upload_firmware(
        &self,
        upload: FirmwareUpload,
    ) -> Result<FirmwareUploadResult, Error> {
        let url = self.api_url("firmware/upload")?;
        debug!("uploading firmware files");

        let mut form = Form::new();
        for (field, file) in [
            ("image", upload.image),
            ("manifest", upload.manifest),
            ("checksum", upload.checksum),
            ("signature", upload.signature),
        ] {
            if let Some((name, bytes)) = file {
                form = form.part(field, Part::bytes(bytes).file_name(name));
            }
        }

        self.post_multipart(url, form).await
    }

    /// Designate this image as the baseline for its technology. The
    /// server clears the flag on the previous baseline.
    ///
    /// `POST /api/firmware/{id}/baseline`
    pub async fn set_firmware_baseline(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("firmware/{id}/baseline"))?;
        debug!(id, "setting baseline firmware");
        self.post_action(url).await
    }

    /// Delete a firmware image. Deleting the current baseline is
    /// rejected server-side (HTTP 409).
    ///
    /// `DELETE /api/firmware/{id}`
    pub async fn delete_firmware(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("firmware/{id}"))?;
        debug!(id, "deleting firmware image");
        self.delete(url).await
    }
}
