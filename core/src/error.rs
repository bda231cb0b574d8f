//! Error types for the item API client.
//!
//! # Design
//! `ApiError` describes what went wrong on the wire. `HookError` is the single
//! tagged shape that resource hooks expose to the presentation layer, so a
//! view branches on one enum instead of on strings, maps and status codes.

use thiserror::Error;

use crate::field_errors::FieldErrorMap;
use crate::http::TransportError;

/// Errors returned by `ItemClient` parse methods and the `Gateway`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401. The session has already been cleared.
    #[error("authentication required")]
    Unauthorized,

    /// The server returned 422 with a structured list of field violations.
    #[error("validation failed: {0}")]
    Validation(FieldErrorMap),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status associated with the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Unauthorized => Some(401),
            ApiError::Validation(_) => Some(422),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure state held by a resource hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// Local schema or server 422 violations, keyed by field.
    #[error("{0}")]
    FieldErrors(FieldErrorMap),

    #[error("Item not found")]
    NotFound,

    #[error("Session expired. Please log in again.")]
    Unauthorized,

    /// Rejected on the client before any request was made.
    #[error("Invalid item ID")]
    InvalidIdentifier,

    #[error("{0}")]
    Generic(String),
}

impl HookError {
    /// Status code analogous to the failure. `InvalidIdentifier` reports 400
    /// so callers can tell it apart from a server 404.
    pub fn status(&self) -> Option<u16> {
        match self {
            HookError::FieldErrors(_) => Some(422),
            HookError::NotFound => Some(404),
            HookError::Unauthorized => Some(401),
            HookError::InvalidIdentifier => Some(400),
            HookError::Generic(_) => None,
        }
    }

    /// The failure as a field map; non-field failures land under `general`.
    pub fn field_errors(&self) -> FieldErrorMap {
        match self {
            HookError::FieldErrors(map) => map.clone(),
            other => FieldErrorMap::general(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_codes() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(
            ApiError::HttpError {
                status: 503,
                body: String::new()
            }
            .status(),
            Some(503)
        );
        assert_eq!(
            ApiError::Transport(TransportError("refused".into())).status(),
            None
        );
    }

    #[test]
    fn invalid_identifier_is_distinct_from_not_found() {
        assert_eq!(HookError::InvalidIdentifier.status(), Some(400));
        assert_eq!(HookError::NotFound.status(), Some(404));
        assert_ne!(HookError::InvalidIdentifier, HookError::NotFound);
    }

    #[test]
    fn generic_error_becomes_general_entry() {
        let map = HookError::Generic("Failed".to_string()).field_errors();
        assert_eq!(map.general_message(), Some("Failed"));
    }

    #[test]
    fn field_errors_pass_through() {
        let fields = FieldErrorMap::from_iter([("name", "taken")]);
        let err = HookError::FieldErrors(fields.clone());
        assert_eq!(err.field_errors(), fields);
    }
}
