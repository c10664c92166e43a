use std::fmt;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug)]
pub enum ClientError {
    /// The socket closed or errored while a request was in flight.
    ChannelClosed,
    /// The server answered `ok: false`; carries the human-readable reason.
    Refused(String),
    Json(serde_json::Error),
    Io(std::io::Error),
    Client(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ClientError::ChannelClosed => write!(f, "connection closed while request was pending"),
            ClientError::Refused(ref reason) => write!(f, "{}", reason),
            ClientError::Json(ref err) => write!(f, "{}", err),
            ClientError::Io(ref err) => write!(f, "{}", err),
            ClientError::Client(ref msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            ClientError::Json(ref err) => Some(err),
            ClientError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err)
    }
}

impl From<String> for ClientError {
    fn from(msg: String) -> Self {
        ClientError::Client(msg)
    }
}

impl From<&str> for ClientError {
    fn from(msg: &str) -> Self {
        ClientError::from(String::from(msg))
    }
}

impl ClientError {
    /// True for transport-level failures, which are retried by the connection
    /// owner; protocol refusals are surfaced to the user instead.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::ChannelClosed)
    }
}
