// Subscriber endpoints
//
// Subscribers are VLAN/service bindings on a device. List supports a
// device filter through the generic ListQuery filter pairs.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ListQuery, Paged, SubscriberCreate, SubscriberDto, SubscriberUpdate};

impl ApiClient {
    /// List subscribers, paged and filtered.
    ///
    /// `GET /api/subscribers`
    pub async fn list_subscribers(&self, query: &ListQuery) -> Result<Paged<SubscriberDto>, Error> {
        let mut url = self.api_url("subscribers")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Get a single subscriber.
    ///
    /// `GET /api/subscribers/{id}`
    pub async fn get_subscriber(&self, id: i64) -> Result<SubscriberDto, Error> {
        let url = self.api_url(&format!("subscribers/{id}"))?;
        self.get(url).await
    }

    /// Create a subscriber on a device.
    ///
    /// `POST /api/subscribers`
    pub async fn create_subscriber(&self, req: &SubscriberCreate) -> Result<SubscriberDto, Error> {
        let url = self.api_url("subscribers")?;
        debug!(device_id = req.device_id, name = %req.name, "creating subscriber");
        self.post(url, req).await
    }

    /// Update a subscriber.
    ///
    /// `PATCH /api/subscribers/{id}`
    pub async fn update_subscriber(
        &self,
        id: i64,
        req: &SubscriberUpdate,
    ) -> Result<SubscriberDto, Error> {
        let url = self.api_url(&format!("subscribers/{id}"))?;
        self.patch(url, req).await
    }

    /// Delete a subscriber.
    ///
    /// `DELETE /api/subscribers/{id}`
    pub async fn delete_subscriber(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("subscribers/{id}"))?;
        debug!(id, "deleting subscriber");
        self.delete(url).await
    }
}
