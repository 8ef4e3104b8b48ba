/// Failures raised while signing or verifying.
///
/// None of these are transient: the same inputs fail the same way, so
/// callers should not retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("{0} algorithm not supported")]
    AlgorithmUnavailable(String),
    #[error("signing key caused {method} error: {reason}")]
    InvalidKey { method: String, reason: String },
    #[error("unknown signature method: {0}")]
    UnknownMethod(String),
}

impl SignatureError {
    pub(crate) fn invalid_key(method: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidKey {
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = SignatureError> = std::result::Result<T, E>;
