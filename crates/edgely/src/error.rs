//! CLI error types with miette diagnostics.
//!
//! Maps `edgely_api::Error` variants into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use edgely_api::Error as ApiError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const PROTOCOL: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Local / usage ────────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(edgely::usage), help("Run with --help to see accepted values."))]
    Validation { field: String, reason: String },

    #[error("confirmation required: {0}")]
    #[diagnostic(code(edgely::confirm), help("Re-run with --yes to proceed."))]
    ConfirmationRequired(&'static str),

    #[error("configuration error: {0}")]
    #[diagnostic(code(edgely::config))]
    Config(String),

    // ── Router interaction ──────────────────────────────────────────
    #[error("login to {url} failed")]
    #[diagnostic(
        code(edgely::auth_failed),
        help(
            "Verify the username and password for this router.\n\
             The same credentials you use for the web GUI apply here."
        )
    )]
    AuthFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("the router at {url} is not speaking the expected protocol")]
    #[diagnostic(
        code(edgely::protocol),
        help(
            "A firmware update may have changed the management API.\n\
             Check for a newer edgely release."
        )
    )]
    Protocol {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("could not reach {url}")]
    #[diagnostic(
        code(edgely::connection_failed),
        help(
            "Check that the router is up and the URL is right.\n\
             For self-signed certificates pass --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("the router rejected the change")]
    #[diagnostic(code(edgely::rejected), help("See the per-node messages above."))]
    Rejected,

    // ── Pass-throughs ───────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(edgely::api))]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    #[diagnostic(code(edgely::io))]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    #[diagnostic(code(edgely::json), help("Documents and batch files must be valid JSON."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Classify an API error against the router it came from.
    pub fn from_api(err: ApiError, url: &url::Url) -> Self {
        match &err {
            ApiError::CredentialsRejected | ApiError::NotAuthenticated => Self::AuthFailed {
                url: url.to_string(),
                source: err,
            },
            ApiError::AuthProtocol { .. }
            | ApiError::UnexpectedStatus { .. }
            | ApiError::Decode { .. } => Self::Protocol {
                url: url.to_string(),
                source: err,
            },
            ApiError::Transport(_) | ApiError::Tls(_) => Self::ConnectionFailed {
                url: url.to_string(),
                source: err,
            },
            _ => Self::Api(err),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::ConfirmationRequired(_) => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Protocol { .. } => exit_code::PROTOCOL,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}
