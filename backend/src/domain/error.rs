//! Domain-level fault type.
//!
//! Faults are transport agnostic. Inbound adapters map them to HTTP
//! responses; the service layer raises them when an operation's contract
//! requires a definite failure signal.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Whether a fault was caused by the caller or by this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FaultClass {
    /// The caller sent something invalid or violated a business rule.
    Client,
    /// The backend failed; detail is logged server-side only.
    Server,
}

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Credentials were missing or wrong.
    Unauthorized,
    /// The referenced resource does not exist.
    NotFound,
    /// The operation conflicts with current state (duplicate user,
    /// already-tracked package).
    Conflict,
    /// The backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

impl ErrorCode {
    /// Client/server classification carried on every serialised fault.
    pub const fn classification(self) -> FaultClass {
        match self {
            Self::InvalidRequest | Self::Unauthorized | Self::NotFound | Self::Conflict => {
                FaultClass::Client
            }
            Self::ServiceUnavailable | Self::InternalError => FaultClass::Server,
        }
    }
}

/// Structured fault returned by remote operations instead of a result.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, ErrorCode, FaultClass};
///
/// let err = DomainError::not_found("package 9 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.code().classification(), FaultClass::Client);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "DomainErrorDto", into = "DomainErrorDto")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// Validation error raised by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    /// The fault message was empty or whitespace.
    #[error("fault message must not be empty")]
    EmptyMessage,
}

impl DomainError {
    /// Construct a fault, panicking on an empty message.
    ///
    /// # Panics
    /// Panics when `message` trims to nothing; fault sites always pass
    /// literal or formatted non-empty text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("fault messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor validating the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to callers.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured detail, if any.
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the fault.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

/// Wire shape for faults. `fault` is derived from the code on the way out
/// and ignored on the way in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct DomainErrorDto {
    fault: FaultClass,
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for DomainErrorDto {
    fn from(value: DomainError) -> Self {
        Self {
            fault: value.code.classification(),
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<DomainErrorDto> for DomainError {
    type Error = DomainErrorValidationError;

    fn try_from(value: DomainErrorDto) -> Result<Self, Self::Error> {
        let DomainErrorDto {
            fault: _,
            code,
            message,
            details,
        } = value;

        let mut error = Self::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, FaultClass::Client)]
    #[case(ErrorCode::Unauthorized, FaultClass::Client)]
    #[case(ErrorCode::NotFound, FaultClass::Client)]
    #[case(ErrorCode::Conflict, FaultClass::Client)]
    #[case(ErrorCode::ServiceUnavailable, FaultClass::Server)]
    #[case(ErrorCode::InternalError, FaultClass::Server)]
    fn classification_follows_code(#[case] code: ErrorCode, #[case] expected: FaultClass) {
        assert_eq!(code.classification(), expected);
    }

    #[test]
    fn serialises_with_fault_classification() {
        let err = DomainError::conflict("username or email already in use");
        let value = serde_json::to_value(&err).expect("fault serialises");

        assert_eq!(value.get("fault").and_then(Value::as_str), Some("client"));
        assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("username or email already in use")
        );
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_survive_a_round_trip() {
        let err = DomainError::invalid_request("missing field")
            .with_details(json!({ "field": "username" }));
        let text = serde_json::to_string(&err).expect("serialise");
        let back: DomainError = serde_json::from_str(&text).expect("deserialise");

        assert_eq!(back, err);
    }

    #[test]
    fn empty_message_is_rejected() {
        let err = DomainError::try_new(ErrorCode::NotFound, "   ");
        assert_eq!(err, Err(DomainErrorValidationError::EmptyMessage));
    }
}
