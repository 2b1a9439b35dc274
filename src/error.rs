use std::path::PathBuf;

use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Failures while obtaining a bearer token. Never shown to API callers.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    Configuration(String),

    #[error("failed to read credentials file {}: {source}", path.display())]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to sign JWT assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("token endpoint returned an empty access token")]
    EmptyToken,
}

/// Every way a try-on call can fail. The `Display` text is what the caller sees.
#[derive(Debug, Error)]
pub enum TryOnError {
    #[error("{0} environment variable is not set")]
    Configuration(&'static str),

    #[error("Failed to authenticate with Google Cloud")]
    Authentication(#[source] AuthError),

    #[error("API request failed: {status} {reason}\nDetails: {body}")]
    Upstream {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("No predictions returned from API")]
    NoPredictions,

    #[error("Invalid request body")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("Person image and at least one product image are required")]
    MissingImages,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl TryOnError {
    /// Message placed in the `error` field of a failed response.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<AuthError> for TryOnError {
    fn from(err: AuthError) -> Self {
        TryOnError::Authentication(err)
    }
}
