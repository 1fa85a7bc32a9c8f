// CSV export
//
// Selected list views can be exported as a server-rendered CSV blob.
// The client only downloads bytes; filename conventions live with the
// consumer.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::ListQuery;

/// Resources offering server-side CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResource {
    Devices,
    Subscribers,
    Alarms,
}

impl ExportResource {
    fn path(self) -> &'static str {
        match self {
            Self::Devices => "gam/devices/export",
            Self::Subscribers => "subscribers/export",
            Self::Alarms => "alarms/export",
        }
    }
}

impl ApiClient {
    /// Download a CSV export of a list view, honoring the current search
    /// and filter parameters (pagination is ignored server-side: exports
    /// cover the full filtered set).
    ///
    /// `GET /api/{resource}/export`
    pub async fn export_csv(
        &self,
        resource: ExportResource,
        query: &ListQuery,
    ) -> Result<Vec<u8>, Error> {
        let mut url = self.api_url(resource.path())?;
        query.apply(&mut url);
        debug!(?resource, "downloading CSV export");
        self.get_bytes(url).await
    }
}
