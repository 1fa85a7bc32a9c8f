// Session authentication
//
// Login exchanges credentials for an opaque session id which the client
// then attaches to every request. Logout is best-effort server-side:
// the local session is dropped even if the server call fails.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::SessionResponse;

impl ApiClient {
    /// Authenticate with username/password.
    ///
    /// `POST /api/login`. On success the returned session id is installed
    /// on this client and also returned so the caller can persist it.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionResponse, Error> {
        let url = self.api_url("login")?;
        debug!("logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let session: SessionResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        self.set_session(SecretString::from(session.session_id.clone()));
        debug!(user = %session.user.username, "login successful");
        Ok(session)
    }

    /// Resume a previously persisted session without logging in again.
    pub fn resume_session(&self, session_id: SecretString) {
        self.set_session(session_id);
    }

    /// End the current session.
    ///
    /// `POST /api/logout`. The local session id is cleared regardless of
    /// whether the server call succeeds.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("logout")?;
        debug!("logging out at {}", url);

        let result = self.post_action(url).await;
        self.clear_session();

        if let Err(ref e) = result {
            warn!(error = %e, "server-side logout failed (session dropped locally)");
        }
        result
    }
}
