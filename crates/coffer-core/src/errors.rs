//! Error types for Coffer

use thiserror::Error;

/// Core errors that can occur in Coffer
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Ledger gateway connection and read errors.
///
/// Read failures never abort the caller; each affected figure falls back to
/// an absent value and the error is logged.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger gateway unreachable at {url}")]
    Unreachable { url: String },

    #[error("Ledger gateway returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse ledger response: {0}")]
    MalformedResponse(String),

    #[error("Transaction not found: {tx_id}")]
    TxNotFound { tx_id: String },
}

/// Errors from the signing/submission step.
///
/// All of these occur before an operation enters the pending state; no
/// lifecycle object exists and the action is safe to re-trigger.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Signing rejected: {reason}")]
    Rejected { reason: String },

    #[error("Signer unavailable: {reason}")]
    ConnectorUnavailable { reason: String },

    #[error("No identity connected")]
    NotConnected,
}

/// Result type alias for Coffer operations
pub type Result<T> = std::result::Result<T, Error>;

impl SubmitError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "submission_rejected",
            Self::ConnectorUnavailable { .. } => "signer_unavailable",
            Self::NotConnected => "not_connected",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Rejected { .. } => 400,
            Self::ConnectorUnavailable { .. } => 502,
            Self::NotConnected => 401,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_error_codes() {
        let err = SubmitError::Rejected {
            reason: "user declined".into(),
        };
        assert_eq!(err.error_code(), "submission_rejected");
        assert_eq!(err.status_code(), 400);

        assert_eq!(SubmitError::NotConnected.status_code(), 401);
    }

    #[test]
    fn test_error_from_ledger() {
        let err: Error = LedgerError::Unreachable {
            url: "http://127.0.0.1:8545".into(),
        }
        .into();
        assert!(err.to_string().contains("unreachable"));
    }
}
