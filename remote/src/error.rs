use std::{
    error::Error,
    fmt::{Display, Formatter},
    sync::Arc,
};

use http::StatusCode;
use serde_with::SerializeDisplay;
use url::ParseError;

/// Everything that can go wrong while talking to the users API.
///
/// The view treats every variant the same way (a failed fetch), but the
/// distinction is kept for logging.
#[derive(Debug, Clone, SerializeDisplay)]
pub enum RemoteAccessError {
    FetchError(Arc<reqwest::Error>),
    ParsingError(ParseError),
    InvalidEndpoint,
    InvalidResponse(StatusCode, String),
    UnparseableResponse(String),
}

impl Display for RemoteAccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteAccessError::FetchError(error) => {
                if error.is_connect() {
                    return write!(
                        f,
                        "Failed to connect to the users API. Check your network connection, and then try again."
                    );
                }
                if error.is_timeout() {
                    return write!(f, "request to the users API timed out");
                }

                write!(
                    f,
                    "{}: {}",
                    error,
                    error
                        .source()
                        .map(std::string::ToString::to_string)
                        .unwrap_or("Unknown error".to_string())
                )
            }
            RemoteAccessError::ParsingError(parse_error) => {
                write!(f, "invalid users API url: {parse_error}")
            }
            RemoteAccessError::InvalidEndpoint => write!(f, "invalid users API endpoint"),
            RemoteAccessError::InvalidResponse(status, body) => {
                write!(f, "server returned an invalid response: {status}")?;
                if !body.is_empty() {
                    write!(f, ", {body}")?;
                }
                Ok(())
            }
            RemoteAccessError::UnparseableResponse(error) => {
                write!(f, "server returned an unparseable response: {error}")
            }
        }
    }
}

impl From<reqwest::Error> for RemoteAccessError {
    fn from(err: reqwest::Error) -> Self {
        RemoteAccessError::FetchError(Arc::new(err))
    }
}
impl From<ParseError> for RemoteAccessError {
    fn from(err: ParseError) -> Self {
        RemoteAccessError::ParsingError(err)
    }
}
impl From<serde_json::Error> for RemoteAccessError {
    fn from(err: serde_json::Error) -> Self {
        RemoteAccessError::UnparseableResponse(err.to_string())
    }
}
impl std::error::Error for RemoteAccessError {}
