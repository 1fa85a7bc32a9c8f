// Alarm endpoints
//
// Alarms move through active-unacknowledged -> active-acknowledged ->
// closed; the server enforces that closed is terminal. The counts
// endpoint backs the polled badge display.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AlarmCounts, AlarmDto, ListQuery, Paged};

impl ApiClient {
    /// List alarms, paged and filtered (severity, status, device id).
    ///
    /// `GET /api/alarms`
    pub async fn list_alarms(&self, query: &ListQuery) -> Result<Paged<AlarmDto>, Error> {
        let mut url = self.api_url("alarms")?;
        query.apply(&mut url);
        self.get_paged(url).await
    }

    /// Per-severity counts of active alarms.
    ///
    /// `GET /api/alarms/counts`
    pub async fn alarm_counts(&self) -> Result<AlarmCounts, Error> {
        let url = self.api_url("alarms/counts")?;
        self.get(url).await
    }

    /// Acknowledge an active alarm, recording the acting user and time.
    ///
    /// `POST /api/alarms/{id}/acknowledge`
    pub async fn acknowledge_alarm(&self, id: i64) -> Result<AlarmDto, Error> {
        let url = self.api_url(&format!("alarms/{id}/acknowledge"))?;
        debug!(id, "acknowledging alarm");
        self.post(url, &serde_json::json!({})).await
    }

    /// Close an alarm, recording the closing time. Terminal.
    ///
    /// `POST /api/alarms/{id}/close`
    pub async fn close_alarm(&self, id: i64) -> Result<AlarmDto, Error> {
        let url = self.api_url(&format!("alarms/{id}/close"))?;
        debug!(id, "closing alarm");
        self.post(url, &serde_json::json!({})).await
    }
}
