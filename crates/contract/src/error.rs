//! Error types for error-contract assertions.
//!
//! Two families of errors live here:
//!
//! - [`AssertionFailure`] is the verdict of a failed check. It is an ordinary
//!   value reported to the enclosing test case, never a process-level fault.
//! - [`ContractError`] covers the harness plumbing around assertions: loading
//!   contract files, registering matchers, and looking them up by name.
//!
//! [`DecodeError`] explains why a response body could not be read as an
//! error envelope and is embedded in [`AssertionFailure::MalformedErrorBody`].

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::assertion::CheckKind;

/// A failed sub-check of an error-response assertion.
///
/// Each variant names the check that failed and carries the observed value so
/// the diagnostic can be reported without re-reading the response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionFailure {
    /// The response status differs from the expected status.
    #[error("expected status code {expected}, got {actual}")]
    UnexpectedStatusCode { expected: u16, actual: u16 },

    /// The response body is not a JSON object.
    #[error("malformed error body ({reason}): {body:?}")]
    MalformedErrorBody { reason: DecodeError, body: String },

    /// The `code` field is missing or has the wrong value.
    #[error("expected error code {expected}, got {}", describe_field(.actual))]
    UnexpectedErrorCode { expected: i64, actual: Option<Value> },

    /// The `description` field is missing or does not match.
    #[error("expected description {expected}, got {}", describe_field(.actual))]
    UnexpectedDescription {
        expected: String,
        actual: Option<Value>,
    },
}

impl AssertionFailure {
    /// Returns the check that produced this failure.
    pub fn kind(&self) -> CheckKind {
        match self {
            AssertionFailure::UnexpectedStatusCode { .. } => CheckKind::StatusCode,
            AssertionFailure::MalformedErrorBody { .. } => CheckKind::BodyDecodable,
            AssertionFailure::UnexpectedErrorCode { .. } => CheckKind::ErrorCode,
            AssertionFailure::UnexpectedDescription { .. } => CheckKind::Description,
        }
    }
}

fn describe_field(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "no such field".to_string(),
    }
}

/// Why a response body could not be decoded as an error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The body is valid JSON but not an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Errors raised by the harness around assertions.
#[derive(Error, Debug)]
pub enum ContractError {
    /// A contract file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A contract file is not valid.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A description matcher holds an invalid regular expression.
    #[error("invalid description pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A matcher with this name is already registered.
    #[error("matcher '{name}' is already registered")]
    DuplicateMatcher { name: String },

    /// No matcher with this name is registered.
    #[error("unknown matcher '{name}'")]
    UnknownMatcher { name: String },
}

/// Result type alias for harness operations.
pub type ContractResult<T> = Result<T, ContractError>;
