//! Common error types used throughout cinescope.
//!
//! Provider failures fall into three classes (network, malformed body,
//! timeout). The remaining variants are raised by the service layer itself.

/// Common error type for cinescope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status code.
    #[error("Upstream returned {status} for {path}")]
    Status {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Request path (without credentials).
        path: String,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The requested title or resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A newer request for the same slot was issued before this one finished.
    #[error("Request superseded by a newer request")]
    Superseded,
}

/// Coarse classification of an error, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection failures and non-2xx responses.
    Network,
    /// Unexpected or missing fields.
    Malformed,
    /// The request exceeded its deadline.
    Timeout,
    /// Errors raised locally rather than by the provider.
    Local,
}

impl Error {
    /// Create a new Network error.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new Malformed error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a new Timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Which failure class this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Status { .. } => FailureKind::Network,
            Self::Malformed(_) => FailureKind::Malformed,
            Self::Timeout(_) => FailureKind::Timeout,
            Self::NotFound(_) | Self::InvalidInput(_) | Self::Superseded => FailureKind::Local,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::Status {
            status: 503,
            path: "/movie/popular".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned 503 for /movie/popular");

        let err = Error::malformed("missing field `results`");
        assert_eq!(err.to_string(), "Malformed response: missing field `results`");

        let err = Error::Superseded;
        assert_eq!(err.to_string(), "Request superseded by a newer request");
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(Error::network("x").kind(), FailureKind::Network);
        assert_eq!(
            Error::Status {
                status: 500,
                path: "/".into()
            }
            .kind(),
            FailureKind::Network
        );
        assert_eq!(Error::malformed("x").kind(), FailureKind::Malformed);
        assert_eq!(Error::timeout("x").kind(), FailureKind::Timeout);
        assert_eq!(Error::not_found("x").kind(), FailureKind::Local);
        assert_eq!(Error::Superseded.kind(), FailureKind::Local);
    }
}
