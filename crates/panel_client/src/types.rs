use std::fmt;
use std::time::Duration;

/// Cadence of the log polling session.
pub const LOG_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Snapshot text substituted when a log fetch fails.
pub const LOG_UNAVAILABLE: &str = "Failed to fetch logs";

/// Operator-facing fallback when the service supplies no structured detail.
pub const GENERIC_ERROR_DETAIL: &str = "An error occurred";

/// One operation against the staging service, already validated upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    CreateFile {
        filename: String,
        content: String,
    },
    StageData {
        method: String,
        username: String,
        local_path: String,
        relative_path: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    SubmissionSettled {
        result: Result<serde_json::Value, RequestError>,
    },
    MethodsFetched {
        result: Result<Vec<String>, RequestError>,
    },
    LogSnapshot {
        text: String,
    },
}

/// Lifecycle of one polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Active,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown to the operator: the service's own detail for structured
    /// failures, a fixed fallback for everything else.
    pub fn detail(&self) -> String {
        match self.kind {
            FailureKind::Service { .. } => self.message.clone(),
            _ => GENERIC_ERROR_DETAIL.to_string(),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    MalformedResponse,
    Service { status: u16 },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Service { status } => write!(f, "service rejected request (http {status})"),
        }
    }
}
