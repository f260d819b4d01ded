use thiserror::Error;

/// Top-level error type for the `edgely-api` crate.
///
/// The first three variants are the local, expected auth outcomes a
/// caller will want to branch on (retry login vs. abort); the rest are
/// transport and data failures propagated unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The router recognized the login attempt and refused the
    /// credentials (its known failure phrase appeared in the 200 body).
    #[error("credentials rejected by the router")]
    CredentialsRejected,

    /// The login exchange did not follow the known EdgeOS protocol,
    /// e.g. a 303 redirect without a `PHPSESSID` cookie. Usually means
    /// the firmware's auth mechanism has changed.
    #[error("authentication protocol violation: {message}")]
    AuthProtocol { message: String },

    /// A CSRF-protected call was attempted without an authenticated
    /// session. No network request is sent in this case.
    #[error("not authenticated -- call login() first")]
    NotAuthenticated,

    /// Login returned a status the protocol defines no behavior for.
    #[error("unexpected login response: HTTP {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error: connection refused, DNS failure, timeout,
    /// or a non-success status from any call other than login.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction failure.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Request body serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was not valid JSON for the expected shape --
    /// likely a firmware/protocol version mismatch.
    #[error("decode error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` for the local auth failures a caller can resolve
    /// by (re-)logging in or fixing credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialsRejected | Self::AuthProtocol { .. } | Self::NotAuthenticated
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
