// ── Query keys ──

use std::fmt;

use strum::{Display, EnumIter};

/// The server-side resource a query reads from. One variant per
/// endpoint family; device-scoped collections (ports, endpoints,
/// backups) carry the device id in the key params instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Devices,
    Ports,
    Endpoints,
    Subscribers,
    Bandwidths,
    Alarms,
    AlarmCounts,
    Users,
    Firmware,
    Backups,
}

/// Identity of a cached read. Two fetches with the same resource and
/// the same (order-sensitive) params are the same query.
///
/// Params are sorted at construction so callers building the same
/// logical key in a different order still collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Key for a resource collection filtered/paged by `params`.
    pub fn with_params(
        resource: Resource,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut params: Vec<_> = params.into_iter().collect();
        params.sort();
        Self { resource, params }
    }

    /// Key for a single entity by id.
    pub fn entity(resource: Resource, id: i64) -> Self {
        Self::with_params(resource, [("id".to_owned(), id.to_string())])
    }

    /// Key for a collection scoped to one device (ports, endpoints,
    /// backups, per-device subscriber lists).
    pub fn device_scoped(resource: Resource, device_id: i64) -> Self {
        Self::with_params(
            resource,
            [("device_id".to_owned(), device_id.to_string())],
        )
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The entity id this key addresses, if it is an entity key.
    pub fn entity_id(&self) -> Option<i64> {
        self.param("id").and_then(|v| v.parse().ok())
    }

    /// The device this key is scoped to, if any.
    pub fn device_id(&self) -> Option<i64> {
        self.param("device_id").and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (k, v) in &self.params {
            write!(f, ";{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_order_does_not_split_keys() {
        let a = QueryKey::with_params(
            Resource::Devices,
            [
                ("page".to_owned(), "2".to_owned()),
                ("search".to_owned(), "gm".to_owned()),
            ],
        );
        let b = QueryKey::with_params(
            Resource::Devices,
            [
                ("search".to_owned(), "gm".to_owned()),
                ("page".to_owned(), "2".to_owned()),
            ],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn entity_and_device_ids_round_trip() {
        assert_eq!(QueryKey::entity(Resource::Devices, 7).entity_id(), Some(7));
        assert_eq!(
            QueryKey::device_scoped(Resource::Ports, 3).device_id(),
            Some(3)
        );
        assert_eq!(QueryKey::new(Resource::Alarms).entity_id(), None);
    }
}
