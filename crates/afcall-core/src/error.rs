pub use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("no api base url configured: unable to fetch data")]
    MissingBaseUrl,

    #[error("invalid caller configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("encode JSON request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decode JSON response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid serialized transaction: {0}")]
    InvalidTransaction(String),

    #[error("indexer cursor overflow: {prior} + {returned} exceeds u64")]
    CursorOverflow { prior: u64, returned: u64 },
}

/// Failures of the HTTP exchange itself.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response. Displays the raw response body.
    #[error("{body}")]
    Status { status: StatusCode, body: String },

    #[error("request cancelled")]
    Cancelled,
}

impl CoreError {
    /// HTTP status of a non-2xx response, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(ApiError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Api(ApiError::Cancelled))
    }
}
