// Bandwidth profile endpoints
//
// Named downstream/upstream rate-limit policies, optionally scoped to a
// device. `push` re-applies a profile to its device when it has drifted
// out of sync.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{BandwidthCreate, BandwidthDto, BandwidthUpdate, ListQuery, Paged};

impl ApiClient {
    /// List bandwidth profiles, paged and filtered.
    ///
    /// `GET /api/bandwidths`
    pub async fn list_bandwidths(&self, query: &ListQuery) -> Result<Paged<BandwidthDto>, Error> {
        let mut url = self.api_url("bandwidths")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Get a single bandwidth profile.
    ///
    /// `GET /api/bandwidths/{id}`
    pub async fn get_bandwidth(&self, id: i64) -> Result<BandwidthDto, Error> {
        let url = self.api_url(&format!("bandwidths/{id}"))?;
        self.get(url).await
    }

    /// Create a bandwidth profile. If `device_id` is omitted the server
    /// scopes the profile to the first available device.
    ///
    /// `POST /api/bandwidths`
    pub async fn create_bandwidth(&self, req: &BandwidthCreate) -> Result<BandwidthDto, Error> {
        let url = self.api_url("bandwidths")?;
        debug!(name = %req.name, ds_bw = req.ds_bw, us_bw = req.us_bw, "creating bandwidth profile");
        self.post(url, req).await
    }

    /// Update a bandwidth profile's rates or name.
    ///
    /// `PATCH /api/bandwidths/{id}`
    pub async fn update_bandwidth(
        &self,
        id: i64,
        req: &BandwidthUpdate,
    ) -> Result<BandwidthDto, Error> {
        let url = self.api_url(&format!("bandwidths/{id}"))?;
        self.patch(url, req).await
    }

    /// Soft-delete a bandwidth profile.
    ///
    /// `DELETE /api/bandwidths/{id}`
    pub async fn delete_bandwidth(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("bandwidths/{id}"))?;
        debug!(id, "deleting bandwidth profile");
        self.delete(url).await
    }

    /// Push the profile to its device, re-synchronizing the rate limits.
    ///
    /// `POST /api/bandwidths/{id}/push`
    pub async fn push_bandwidth(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("bandwidths/{id}/push"))?;
        debug!(id, "pushing bandwidth profile to device");
        self.post_action(url).await
    }
}
