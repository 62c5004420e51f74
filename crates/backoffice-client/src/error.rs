use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("login failed: {0}")]
    Auth(AuthFailure),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Why the login endpoint rejected a credential pair.
///
/// The server reports a `code` in the 401 body; known codes get their own
/// message and anything else falls back to a generic one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    UserNotFound,
    InvalidPassword,
    /// Unrecognised or missing code, with the server's message if it sent one.
    Other(Option<String>),
}

impl AuthFailure {
    #[must_use]
    pub fn from_code(code: Option<&str>, message: Option<String>) -> Self {
        match code {
            Some("USER_NOT_FOUND") => AuthFailure::UserNotFound,
            Some("INVALID_PASSWORD") => AuthFailure::InvalidPassword,
            _ => AuthFailure::Other(message),
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFailure::UserNotFound => write!(f, "no account exists for that user id"),
            AuthFailure::InvalidPassword => write!(f, "the password is incorrect"),
            AuthFailure::Other(_) => write!(f, "the user id or password is incorrect"),
        }
    }
}
