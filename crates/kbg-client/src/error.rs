use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbgError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response for {context} has no \"{field}\" field")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("login returned a token that is not a valid header value")]
    InvalidToken,

    #[error("no credentials configured; set KBG_EMAIL and KBG_PASSWORD")]
    MissingCredentials,
}

impl KbgError {
    /// HTTP status of the failed response, if the error came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
