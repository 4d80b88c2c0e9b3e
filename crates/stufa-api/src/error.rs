use thiserror::Error;

/// Top-level error type for the `stufa-api` crate.
///
/// Covers every failure mode of a cloud session: transport trouble,
/// credential rejection, protocol-level rejection, and client-side register
/// validation. The `stufa` CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The portal could not be reached (DNS failure, refused connection,
    /// request timeout).
    #[error("cannot reach the Total Control portal: {0}")]
    Connect(#[source] reqwest::Error),

    /// Could not construct the HTTP client.
    #[error("could not construct the HTTP client: {0}")]
    CreateClient(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// The portal rejected the account credentials.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    // ── Protocol ────────────────────────────────────────────────────
    /// The portal produced no usable response: a non-OK HTTP status, a body
    /// that is not JSON, or a JSON body with a non-zero `resultCode`.
    /// Callers cannot tell these apart; the next polling cycle re-attempts.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    // ── Registers ───────────────────────────────────────────────────
    /// The named key is not part of the register catalog.
    #[error("unknown register: {key}")]
    UnknownRegister { key: String },

    /// Client-side write validation failed; nothing was sent over the wire.
    #[error("cannot write {register}: {reason}")]
    Validation {
        register: &'static str,
        reason: String,
    },
}

impl Error {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns `true` if re-authentication might resolve this error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Returns `true` if the request was stopped before reaching the portal.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::UnknownRegister { .. }
        )
    }
}
