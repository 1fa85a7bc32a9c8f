// ── Core error types ──
//
// User-facing errors from gam-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<gam_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection / session ─────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        fields: Vec<String>,
    },

    /// A mutation was triggered while a previous invocation of the same
    /// action instance is still in flight.
    #[error("'{action}' is already in progress")]
    MutationPending { action: String },

    /// Alarm lifecycle guard: closed is terminal.
    #[error("Alarm {id} is closed and cannot be {attempted}")]
    AlarmClosed { id: i64, attempted: &'static str },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Attach a concrete entity type and id to a generic not-found.
    pub fn for_entity(self, entity_type: &str, id: i64) -> Self {
        match self {
            CoreError::NotFound { .. } => CoreError::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: id.to_string(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<gam_api::Error> for CoreError {
    fn from(err: gam_api::Error) -> Self {
        match err {
            gam_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            gam_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            gam_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            gam_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            gam_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            gam_api::Error::NotFound { path } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: path,
            },
            gam_api::Error::Rejected { detail } => CoreError::Rejected { message: detail },
            gam_api::Error::Api {
                status,
                detail,
                fields,
            } => {
                if status == 422 || !fields.is_empty() {
                    CoreError::ValidationFailed {
                        message: detail,
                        fields,
                    }
                } else {
                    CoreError::Api {
                        message: detail,
                        status: Some(status),
                    }
                }
            }
            gam_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
