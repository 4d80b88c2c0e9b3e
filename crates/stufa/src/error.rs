//! CLI error types with miette diagnostics.
//!
//! Maps `stufa_api::Error` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Total Control portal")]
    #[diagnostic(
        code(stufa::connection_failed),
        help(
            "Check your network connection, and the portal URL if you\n\
             overrode it with --base-url / STUFA_BASE_URL."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(stufa::auth_failed),
        help("Verify the email and password you use in the Total Control app.")
    )]
    AuthFailed { message: String },

    #[error("No {field} configured")]
    #[diagnostic(
        code(stufa::no_credentials),
        help(
            "Pass --{field}, set STUFA_{field_env}, or add `{field}` to the\n\
             config file at {config_path}."
        )
    )]
    MissingCredential {
        field: &'static str,
        field_env: &'static str,
        config_path: String,
    },

    // ── Devices & registers ──────────────────────────────────────────
    #[error("Stove '{identifier}' not found on this account")]
    #[diagnostic(
        code(stufa::device_not_found),
        help("Run: stufa devices to see the stoves on the account")
    )]
    DeviceNotFound { identifier: String },

    #[error("No stoves registered on this account")]
    #[diagnostic(
        code(stufa::no_devices),
        help("Pair the stove in the Total Control app first")
    )]
    NoDevices,

    #[error("The account has {count} stoves -- say which one")]
    #[diagnostic(
        code(stufa::ambiguous_device),
        help("Pass a serial number or MAC; run: stufa devices to list them")
    )]
    AmbiguousDevice { count: usize },

    #[error("Unknown register: {key}")]
    #[diagnostic(
        code(stufa::unknown_register),
        help("Run: stufa registers to see the catalog")
    )]
    UnknownRegister { key: String },

    #[error("Cannot write {register}: {reason}")]
    #[diagnostic(code(stufa::validation))]
    Validation { register: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stufa::invalid_value))]
    InvalidValue { field: &'static str, reason: String },

    // ── Portal ───────────────────────────────────────────────────────
    #[error("The portal gave no usable response: {message}")]
    #[diagnostic(
        code(stufa::portal),
        help(
            "The portal folds transport, parsing, and rejection failures\n\
             into one outcome; it usually recovers on the next poll."
        )
    )]
    Portal { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(stufa::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::MissingCredential { .. } => exit_code::AUTH,
            Self::DeviceNotFound { .. } | Self::NoDevices | Self::UnknownRegister { .. } => {
                exit_code::NOT_FOUND
            }
            Self::AmbiguousDevice { .. }
            | Self::Validation { .. }
            | Self::InvalidValue { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── stufa_api::Error → CliError mapping ──────────────────────────────

impl From<stufa_api::Error> for CliError {
    fn from(err: stufa_api::Error) -> Self {
        match err {
            stufa_api::Error::Connect(e) => CliError::ConnectionFailed { source: e.into() },

            stufa_api::Error::CreateClient(e) => CliError::ConnectionFailed { source: e.into() },

            stufa_api::Error::InvalidUrl(e) => CliError::InvalidValue {
                field: "base-url",
                reason: e.to_string(),
            },

            stufa_api::Error::Auth { message } => CliError::AuthFailed { message },

            stufa_api::Error::Protocol { message } => CliError::Portal { message },

            stufa_api::Error::UnknownRegister { key } => CliError::UnknownRegister { key },

            stufa_api::Error::Validation { register, reason } => CliError::Validation {
                register: register.to_owned(),
                reason,
            },
        }
    }
}
