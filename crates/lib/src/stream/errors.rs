//! Service error classification for stream error events.

use std::fmt;

use thiserror::Error;

use crate::mapper::DecodeError;
use crate::value::{Object, Value};

/// The category of a service-reported failure.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    BadRequest,
    Unauthorized,
    PermissionDenied,
    NotFound,
    Conflict,
    TooManyRequests,
    Internal,
    Unavailable,
    Unknown,
}

impl ServiceErrorKind {
    /// Maps an HTTP status code to an error kind.
    ///
    /// Success and redirect statuses are not errors and return `None`.
    pub fn from_status(status: u16) -> Option<Self> {
        let kind = match status {
            0..=399 => return None,
            400 => ServiceErrorKind::BadRequest,
            401 => ServiceErrorKind::Unauthorized,
            403 => ServiceErrorKind::PermissionDenied,
            404 => ServiceErrorKind::NotFound,
            409 => ServiceErrorKind::Conflict,
            429 => ServiceErrorKind::TooManyRequests,
            500 => ServiceErrorKind::Internal,
            503 => ServiceErrorKind::Unavailable,
            _ => ServiceErrorKind::Unknown,
        };
        Some(kind)
    }

    /// Maps an error code reported inside an error event.
    pub fn from_code(code: &str) -> Self {
        match code {
            "invalid argument" | "invalid expression" | "invalid ref" | "validation failed"
            | "bad request" => ServiceErrorKind::BadRequest,
            "unauthorized" | "invalid token" => ServiceErrorKind::Unauthorized,
            "permission denied" => ServiceErrorKind::PermissionDenied,
            "instance not found" | "not found" => ServiceErrorKind::NotFound,
            "instance already exists" | "contended transaction" => ServiceErrorKind::Conflict,
            "too many requests" | "rate limited" => ServiceErrorKind::TooManyRequests,
            "internal error" => ServiceErrorKind::Internal,
            "unavailable" | "service unavailable" => ServiceErrorKind::Unavailable,
            _ => ServiceErrorKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceErrorKind::BadRequest => "bad request",
            ServiceErrorKind::Unauthorized => "unauthorized",
            ServiceErrorKind::PermissionDenied => "permission denied",
            ServiceErrorKind::NotFound => "not found",
            ServiceErrorKind::Conflict => "conflict",
            ServiceErrorKind::TooManyRequests => "too many requests",
            ServiceErrorKind::Internal => "internal error",
            ServiceErrorKind::Unavailable => "unavailable",
            ServiceErrorKind::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error delivered by the service inside a stream `error` event.
///
/// This is event data, not a failure of the classifier: it arrives wrapped
/// in `StreamEvent::Error`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {description} (code '{code}')")]
pub struct StreamError {
    kind: ServiceErrorKind,
    code: String,
    description: String,
}

impl StreamError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: ServiceErrorKind::from_code(&code),
            code,
            description: description.into(),
        }
    }

    /// Builds the error from an event payload `{"code": .., "description": ..}`.
    ///
    /// A missing `description` is tolerated; a missing `code` is not.
    pub fn from_event(event: &Object) -> Result<Self, DecodeError> {
        let code = match event.get("code") {
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingField {
                    record: "stream error",
                    field: "code",
                    path: String::new(),
                });
            }
            Some(code) => code.get::<String>().map_err(|err| err.within("code"))?,
        };
        let description = match event.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(description) => description
                .get::<String>()
                .map_err(|err| err.within("description"))?,
        };
        Ok(Self::new(code, description))
    }

    pub fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
