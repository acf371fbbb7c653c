use crate::backend::Endpoint;

/// Everything that can go wrong between posting to the backend proxy and
/// holding a decoded response.
///
/// Errors are cloneable so a single failure can be rendered into several
/// regions (the home page shows a market index failure in every widget).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response: connection refused, reset, DNS, etc.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// The proxy answered with a non-2xx status.
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    /// The body was not JSON, or lacked a field the view depends on.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: Endpoint, reason: String },
}

impl FetchError {
    pub fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        FetchError::Malformed {
            endpoint,
            reason: reason.into(),
        }
    }

    /// The endpoint the failing request was sent to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Malformed { endpoint, .. } => *endpoint,
        }
    }
}
