// GAM management API HTTP client
//
// Wraps `reqwest::Client` with base-path URL construction, the
// `{items, total}` list envelope, and `{detail}` error decoding. All
// endpoint groups (devices, subscribers, etc.) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use std::sync::RwLock;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{ApiErrorBody, ErrorDetail, Paged};

/// Raw HTTP client for the GAM management REST API.
///
/// Owns no state beyond the base URL and the current session id. The
/// session id is an opaque token obtained at login and attached to every
/// request as a bearer header; a 401 on any call surfaces as
/// [`Error::SessionExpired`] so the caller can re-authenticate.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the management server root (e.g.
    /// `https://gam-mgmt.example.net`); all endpoints live under `/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: RwLock::new(None),
        }
    }

    /// The management server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Install a session id to attach to subsequent requests.
    pub fn set_session(&self, session_id: SecretString) {
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session_id);
        }
    }

    /// Drop the session id (after logout or expiry).
    pub fn clear_session(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }

    /// Whether a session id is currently installed.
    pub fn has_session(&self) -> bool {
        self.session.read().map(|g| g.is_some()).unwrap_or(false)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Attach the bearer session header, if a session is installed.
    pub(crate) fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.read().ok().and_then(|g| {
            g.as_ref()
                .map(|s| format!("Bearer {}", s.expose_secret()))
        }) {
            Some(header) => builder.header(reqwest::header::AUTHORIZATION, header),
            None => builder,
        }
    }

    /// Send a GET request and decode a flat JSON body.
    ///
    /// Reads retry once on a transient transport failure; mutations
    /// never do.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let first = self.authorize(self.http.get(url.clone())).send().await;
        let resp = match first {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() || e.is_connect() => {
                debug!("retrying GET {} after transient failure", url);
                self.authorize(self.http.get(url))
                    .send()
                    .await
                    .map_err(Error::Transport)?
            }
            Err(e) => return Err(Error::Transport(e)),
        };

        self.parse_body(resp).await
    }

    /// Send a GET request and decode the `{items, total}` envelope.
    pub(crate) async fn get_paged<T: DeserializeOwned>(&self, url: Url) -> Result<Paged<T>, Error> {
        self.get(url).await
    }

    /// Send a GET request and return the raw body bytes (CSV export,
    /// backup content).
    pub(crate) async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, Error> {
        debug!("GET {} (raw)", url);

        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        let resp = self.check_status(resp).await?;
        Ok(resp.bytes().await.map_err(Error::Transport)?.to_vec())
    }

    /// Send a POST request with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    /// Send a bodyless POST (device actions: sync, reboot, ...), ignoring
    /// any response payload.
    pub(crate) async fn post_action(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);

        let resp = self
            .authorize(self.http.post(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_status(resp).await?;
        Ok(())
    }

    /// Send a PATCH request with a JSON body and decode the response.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);

        let resp = self
            .authorize(self.http.patch(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    /// Send a DELETE request, ignoring any response payload.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_status(resp).await?;
        Ok(())
    }

    /// Send a multipart POST (firmware upload) and decode the response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        debug!("POST {} (multipart)", url);

        let resp = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Map error statuses to `Error` variants, passing successes through.
    pub(crate) async fn check_status(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_owned();
        let body = resp.text().await.unwrap_or_default();
        let (detail, fields) = decode_detail(&body);

        match status {
            StatusCode::UNAUTHORIZED => Err(Error::SessionExpired),
            StatusCode::NOT_FOUND => Err(Error::NotFound { path }),
            StatusCode::CONFLICT => Err(Error::Rejected { detail }),
            _ => Err(Error::Api {
                status: status.as_u16(),
                detail,
                fields,
            }),
        }
    }

    /// Check the status, then deserialize the JSON body.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let resp = self.check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Decode the server's `{detail: ...}` payload into a display message
/// plus the individual field messages (empty for single-string details).
fn decode_detail(body: &str) -> (String, Vec<String>) {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.detail {
            ErrorDetail::Message(msg) => (msg, Vec::new()),
            ErrorDetail::Fields(errors) => {
                let fields: Vec<String> = errors.into_iter().map(|e| e.msg).collect();
                (fields.join("; "), fields)
            }
        },
        // Not the structured shape -- fall back to the raw body.
        Err(_) => {
            let trimmed = body.trim();
            let detail = if trimmed.is_empty() {
                "(no error detail)".to_owned()
            } else {
                trimmed.to_owned()
            };
            (detail, Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decode_detail;

    #[test]
    fn decodes_single_string_detail() {
        let (detail, fields) = decode_detail(r#"{"detail": "device is offline"}"#);
        assert_eq!(detail, "device is offline");
        assert!(fields.is_empty());
    }

    #[test]
    fn decodes_validation_list_detail() {
        let body = r#"{"detail": [{"msg": "name required"}, {"msg": "ds_bw must be positive"}]}"#;
        let (detail, fields) = decode_detail(body);
        assert_eq!(fields, vec!["name required", "ds_bw must be positive"]);
        assert_eq!(detail, "name required; ds_bw must be positive");
    }

    #[test]
    fn falls_back_to_raw_body() {
        let (detail, fields) = decode_detail("Bad Gateway");
        assert_eq!(detail, "Bad Gateway");
        assert!(fields.is_empty());
    }
}
