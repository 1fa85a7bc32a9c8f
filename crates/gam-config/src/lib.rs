//! Configuration for the GAM console.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! translation to `gam_api::TransportConfig`, and durable session
//! persistence so a login survives across invocations.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gam_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' (and no default configured)")]
    UnknownProfile { profile: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse session file: {0}")]
    SessionParse(#[from] toml::de::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Resolve a profile by explicit name or the configured default.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.to_owned(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Alarm badge poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub alarm_poll_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            alarm_poll_secs: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    60
}

/// A named management-server profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Management server base URL (e.g., "https://gam-mgmt.example.net").
    pub server: String,

    /// Username for login.
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file paths ───────────────────────────────────────────────

const QUALIFIER: (&str, &str, &str) = ("com", "gamctl", "gamctl");

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from(QUALIFIER.0, QUALIFIER.1, QUALIFIER.2).map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the per-profile session state file path.
pub fn session_path(profile_name: &str) -> PathBuf {
    ProjectDirs::from(QUALIFIER.0, QUALIFIER.1, QUALIFIER.2).map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push(format!("session-{profile_name}.toml"));
            p
        },
        |dirs| {
            dirs.data_local_dir()
                .join(format!("session-{profile_name}.toml"))
        },
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gamctl");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment (`GAM_` prefix).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit path (tests, `--config` override).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GAM_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve login credentials from the chain: env var, keyring,
/// plaintext profile entry.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("GAM_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var (profile-specific name first, then the generic one)
    if let Some(ref env_name) = profile.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok((username, SecretString::from(pw)));
        }
    }
    if let Ok(pw) = std::env::var("GAM_PASSWORD") {
        return Ok((username, SecretString::from(pw)));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("gamctl", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for a profile.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new("gamctl", &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Transport translation ───────────────────────────────────────────

/// Parse a profile's server URL.
pub fn server_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })
}

/// Build a `TransportConfig` from a profile plus global defaults.
pub fn profile_to_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    }
}

// ── Session persistence ─────────────────────────────────────────────

/// Persisted session state: enough to resume without re-entering a
/// password. The session id itself is the only secret; the file is
/// written with the platform's default permissions under the local
/// data directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoredSession {
    pub session_id: String,
    pub username: String,
    pub server: String,
}

/// Write the session state file for a profile.
pub fn save_session(profile_name: &str, session: &StoredSession) -> Result<(), ConfigError> {
    let path = session_path(profile_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(session)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

/// Read the session state file for a profile, if one exists.
pub fn load_session(profile_name: &str) -> Result<Option<StoredSession>, ConfigError> {
    let path = session_path(profile_name);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove the session state file for a profile (logout).
pub fn clear_session(profile_name: &str) -> Result<(), ConfigError> {
    let path = session_path(profile_name);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_resolution() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                server: "https://gam.lab.example.net".into(),
                username: Some("admin".into()),
                password: None,
                password_env: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            },
        );

        assert!(cfg.profile(None).is_err()); // default profile "default" missing
        let (name, profile) = cfg.profile(Some("lab")).unwrap();
        assert_eq!(name, "lab");
        assert_eq!(profile.username.as_deref(), Some("admin"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                server: "https://gam.lab.example.net".into(),
                username: Some("admin".into()),
                password: None,
                password_env: Some("LAB_GAM_PASSWORD".into()),
                ca_cert: None,
                insecure: Some(true),
                timeout: Some(10),
            },
        );

        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        let (_, profile) = parsed.profile(Some("lab")).unwrap();
        assert_eq!(profile.timeout, Some(10));
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn transport_prefers_profile_overrides() {
        let profile = Profile {
            server: "https://gam.example.net".into(),
            username: None,
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: Some(true),
            timeout: Some(5),
        };
        let transport = profile_to_transport(&profile, &Defaults::default());
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn load_config_from_reads_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[profiles.lab]
server = "https://gam.lab.example.net"
username = "admin"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        let (name, profile) = cfg.profile(None).unwrap();
        assert_eq!(name, "lab");
        assert_eq!(profile.server, "https://gam.lab.example.net");
    }

    #[test]
    fn stored_session_round_trips() {
        let session = StoredSession {
            session_id: "abc123".into(),
            username: "admin".into(),
            server: "https://gam.example.net".into(),
        };
        let toml_str = toml::to_string_pretty(&session).unwrap();
        let parsed: StoredSession = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session_id, "abc123");
    }
}
