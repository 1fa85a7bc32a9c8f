//! CLI configuration -- thin wrapper around `gam_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --insecure, etc.)
//! plus console construction with session restore.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use gam_api::{ApiClient, TlsMode, TransportConfig};
use gam_core::Console;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use gam_config::{
    Config, Profile, StoredSession, clear_session, config_path, load_config_or_default,
    load_session, resolve_credentials, save_config, save_session, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the server URL from CLI flags and the profile.
fn resolve_server_url(
    global: &GlobalOpts,
    profile: Option<&Profile>,
) -> Result<url::Url, CliError> {
    let url_str = match (global.server.as_deref(), profile) {
        (Some(flag), _) => flag.to_owned(),
        (None, Some(profile)) => profile.server.clone(),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}

/// Build a transport from profile + global flags. Flag overrides take
/// priority over profile values.
fn resolve_transport(global: &GlobalOpts, profile: Option<&Profile>) -> TransportConfig {
    let insecure =
        global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(global.timeout),
    }
}

/// The console plus everything needed to persist its session.
pub struct Session {
    pub console: Arc<Console>,
    pub profile_name: String,
    pub server: url::Url,
}

/// Build a console from config + flags, restoring any persisted
/// session for the active profile.
///
/// Commands other than `login` rely on the restored session; if none
/// exists (or the server rejected it) they fail with `NotLoggedIn`
/// when the first request comes back 401.
pub async fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // An explicitly named profile must exist; falling through to bare
    // flags would silently ignore the typo.
    if global.profile.is_some() && profile.is_none() {
        let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
        names.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if names.is_empty() {
                "(none)".into()
            } else {
                names.join(", ")
            },
        });
    }

    let server = resolve_server_url(global, profile)?;
    let transport = resolve_transport(global, profile);
    let api = ApiClient::new(server.clone(), &transport).map_err(|e| CliError::ApiError {
        message: e.to_string(),
        status: None,
    })?;
    let console = Arc::new(Console::new(api));

    // Resume the persisted session, if one matches this server.
    if let Some(stored) = load_session(&profile_name)? {
        if stored.server == server.as_str().trim_end_matches('/') {
            debug!(profile = %profile_name, "resuming persisted session");
            match console
                .restore(SecretString::from(stored.session_id), stored.username)
                .await
            {
                Ok(_) => {}
                Err(gam_core::CoreError::AuthenticationFailed { message }) => {
                    debug!(%message, "persisted session rejected; clearing it");
                    clear_session(&profile_name)?;
                }
                Err(err) => {
                    // Not proven dead (server unreachable, 5xx); keep
                    // the stored session for the next invocation.
                    debug!(%err, "session revalidation failed");
                }
            }
        }
    }

    Ok(Session {
        console,
        profile_name,
        server,
    })
}

/// Persist the console's current session for later invocations.
pub fn persist_session(session: &Session, username: &str) -> Result<(), CliError> {
    match session.console.session().session_id() {
        Some(session_id) => {
            save_session(
                &session.profile_name,
                &StoredSession {
                    session_id,
                    username: username.to_owned(),
                    server: session.server.as_str().trim_end_matches('/').to_owned(),
                },
            )?;
            Ok(())
        }
        None => Err(CliError::NotLoggedIn),
    }
}
