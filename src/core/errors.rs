use thiserror::Error as ThisError;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors returned by the Fox IP client, decoder and provider adapter.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Connection, send, receive or timeout failure; no status code was received.
    #[error("request api fail: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status other than `200 OK`.
    #[error("http response not ok: get status: {0}")]
    UnexpectedStatus(u16),

    /// Malformed JSON, a type mismatch or a malformed RFC3339 timestamp.
    #[error("json decode fail: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base address is empty or cannot be parsed as a URL.
    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// A required identifier attribute was empty.
    #[error("{0} is empty")]
    EmptyAttribute(&'static str),

    /// A planned change tried to rename an existing env.
    #[error("env is immutable: cannot change `{from}` to `{to}`")]
    ImmutableEnv { from: String, to: String },

    #[error("csv write fail: {0}")]
    Csv(#[from] csv::Error),

    #[error("io fail: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status code carried by an [Error::UnexpectedStatus] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// True when the error came from the transport (connect, send, receive, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// True when the error came from decoding a response body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
