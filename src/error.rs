//! Error types for handler registration, binding, and invocation
//!
//! Request-level failures are converted to HTTP responses at the router
//! boundary; none of these escape the accept loop.

use thiserror::Error;

/// Errors raised while populating the handler registry.
///
/// Registration happens before the server starts serving, so these are
/// programming errors in the embedding application and surface immediately.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("handler '{0}' is already registered")]
    DuplicateHandler(String),

    #[error("handler '{handler}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { handler: String, parameter: String },
}

/// Failure to coerce a query value onto a declared parameter.
///
/// Surfaced as a 400-class response; a non-numeric value for an integer
/// parameter must never silently become a default.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BindError {
    #[error("parameter '{parameter}' expects an integer, got '{value}'")]
    InvalidInteger { parameter: String, value: String },
}

/// Failure inside a handler while reading its bound arguments.
///
/// `Missing` is the "declared parameter had no query value and the handler
/// has no default for it" case; it propagates as a handler-invocation
/// failure (500), not a binding failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("missing required argument '{0}'")]
    Missing(String),

    #[error("no argument named '{0}' was declared")]
    Unknown(String),

    #[error("argument '{parameter}' is not {expected}")]
    WrongKind {
        parameter: String,
        expected: &'static str,
    },
}
