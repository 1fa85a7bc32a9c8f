//! Async client for the GAM access-network management REST API.
//!
//! [`ApiClient`] owns no state beyond the base URL and the current
//! session id. Endpoint groups are inherent-method modules (devices,
//! subscribers, bandwidths, alarms, users, firmware, backups, export);
//! wire DTOs live in [`types`]. `gam-core` layers the domain model,
//! query cache, and mutation handling on top.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod alarms;
mod auth;
mod backups;
mod bandwidths;
mod devices;
mod export;
mod firmware;
mod subscribers;
mod users;

pub use client::ApiClient;
pub use error::Error;
pub use export::ExportResource;
pub use transport::{TlsMode, TransportConfig};
