use thiserror::Error;

/// Result type for pricing API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the pricing API layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The API answered with an error payload or a non-success status.
    #[error("api error{}: {message}", status_suffix(.status))]
    Api {
        status: Option<u16>,
        message: String,
        fallback_to_demo: bool,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The embedded regional fixture failed to parse.
    #[error("fixture error: {0}")]
    Fixture(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl Error {
    /// Text shown in the "Data Error" banner.
    pub fn display_message(&self) -> String {
        match self {
            Error::Transport(_) => "Network error - failed to load products".to_string(),
            Error::Api { message, .. } => message.clone(),
            Error::InvalidPayload(_) => "Invalid data format received".to_string(),
            Error::Fixture(msg) => msg.clone(),
        }
    }

    /// True when the API asked the client to go back to the demo dataset.
    pub fn requests_demo_fallback(&self) -> bool {
        matches!(
            self,
            Error::Api {
                fallback_to_demo: true,
                ..
            }
        )
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Fixture(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidPayload(e.to_string())
    }
}
