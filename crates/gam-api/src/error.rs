use thiserror::Error;

/// Top-level error type for the `gam-api` crate.
///
/// Covers every failure mode of the management API surface: session
/// authentication, transport, and the server's structured error payloads.
/// `gam-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account disabled, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session has expired or was revoked; re-login required.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server errors ───────────────────────────────────────────────
    /// The requested entity does not exist.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Business-rule rejection (HTTP 409), e.g. deleting a baseline image.
    #[error("Rejected by server: {detail}")]
    Rejected { detail: String },

    /// Structured error from the API's `{detail: ...}` payload.
    ///
    /// `fields` holds the individual messages when the server returns a
    /// validation list (`{detail: [{msg}, ...]}`); otherwise it is empty
    /// and `detail` carries the single message.
    #[error("API error (HTTP {status}): {detail}")]
    Api {
        status: u16,
        detail: String,
        fields: Vec<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session is gone and
    /// re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a transient transport error worth a
    /// single read retry. Mutations are never retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }
}
