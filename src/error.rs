use std::fmt;


// The request never produced an HTTP response (connection refused, CORS, aborted, etc.).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportError(pub String);

// Why a completed request cannot be used as a success.
#[derive(Debug)]
pub enum ResponseError {
    Transport(TransportError),
    Status(u16),
    Parse(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.0)
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Transport(err) => err.fmt(f),
            ResponseError::Status(status) => write!(f, "unexpected status {status}"),
            ResponseError::Parse(err) => write!(f, "cannot parse response: {err}"),
        }
    }
}

impl std::error::Error for TransportError {}
impl std::error::Error for ResponseError {}

impl From<TransportError> for ResponseError {
    fn from(err: TransportError) -> Self { ResponseError::Transport(err) }
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self { ResponseError::Parse(err) }
}
