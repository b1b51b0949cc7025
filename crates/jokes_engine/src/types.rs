use std::fmt;

use jokes_core::{FetchFailure, JokeResponse, RefreshSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JokesFetched {
        seq: RefreshSeq,
        result: Result<JokeResponse, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The body arrived but did not match the expected schema.
    pub fn is_decode(&self) -> bool {
        self.kind == FailureKind::Decode
    }

    /// The request could not be completed at the transport level.
    pub fn is_network(&self) -> bool {
        !self.is_decode()
    }

    pub fn to_failure(&self) -> FetchFailure {
        let message = self.to_string();
        if self.is_decode() {
            FetchFailure::Decode { message }
        } else {
            FetchFailure::Network { message }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "decode error"),
        }
    }
}
