//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use gam_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(gamctl::connection_failed),
        help(
            "Check that the management server is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(gamctl::auth_failed),
        help(
            "Verify your username and password, then run: gamctl login\n\
             Passwords can be stored with: gamctl config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(gamctl::not_logged_in),
        help("Run: gamctl login")
    )]
    NotLoggedIn,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(gamctl::no_credentials),
        help(
            "Configure credentials with: gamctl config init\n\
             Or set the GAM_USERNAME and GAM_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(gamctl::not_found),
        help("Run: gamctl {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Operation rejected: {message}")]
    #[diagnostic(code(gamctl::rejected))]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(gamctl::validation))]
    ValidationFailed { message: String },

    #[error("'{action}' is already in progress")]
    #[diagnostic(
        code(gamctl::mutation_pending),
        help("Wait for the in-flight request to settle, then retry.")
    )]
    MutationPending { action: String },

    #[error("Alarm {id} is closed and cannot be {attempted}")]
    #[diagnostic(
        code(gamctl::alarm_closed),
        help("Closed alarms are terminal; they can never be reopened or re-worked.")
    )]
    AlarmClosed { id: i64, attempted: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(gamctl::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation / usage ───────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gamctl::invalid_value))]
    Validation { field: String, reason: String },

    #[error("Unknown column(s): {columns}")]
    #[diagnostic(
        code(gamctl::unknown_columns),
        help("Available columns: {available}")
    )]
    UnknownColumns { columns: String, available: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gamctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: gamctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(gamctl::no_config),
        help(
            "Create a profile with: gamctl config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(gamctl::config))]
    Config(#[from] gam_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(gamctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(gamctl::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } | Self::MutationPending { .. } | Self::AlarmClosed { .. } => {
                exit_code::CONFLICT
            }
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::ValidationFailed { .. }
            | Self::UnknownColumns { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::NotLoggedIn => CliError::NotLoggedIn,

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::ValidationFailed { message, fields } => CliError::ValidationFailed {
                message: if fields.is_empty() {
                    message
                } else {
                    fields.join("\n")
                },
            },

            CoreError::MutationPending { action } => CliError::MutationPending { action },

            CoreError::AlarmClosed { id, attempted } => CliError::AlarmClosed {
                id,
                attempted: attempted.to_owned(),
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

/// The list command to suggest when an entity type is missing.
fn list_command_for(entity_type: &str) -> String {
    match entity_type {
        "device" => "devices list".into(),
        "subscriber" => "subscribers list".into(),
        "bandwidth profile" => "bandwidths list".into(),
        "user" => "users list".into(),
        "firmware image" => "firmware list".into(),
        other => format!("{other}s list"),
    }
}
