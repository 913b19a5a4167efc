//! Typed spam failure signal.
//!
//! A spam rejection is an expected, recoverable outcome: the submission
//! handler renders a rejection message instead of a generic server error.
//! `SpamError` is therefore distinguishable from other failures and carries
//! an origin tag identifying which rule (or field) produced it.

use thiserror::Error;

/// A spam or validation rejection.
///
/// `message` is HTML-escaped before construction so it is safe to render
/// directly. `thrown_by` is a free-form origin tag such as
/// `validation.honeypot` or `field.email`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SpamError {
    message: String,
    thrown_by: String,
}

impl SpamError {
    pub fn new(message: impl Into<String>, thrown_by: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            thrown_by: thrown_by.into(),
        }
    }

    /// The human-readable rejection message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The origin tag identifying which rule or field raised the error.
    pub fn thrown_by(&self) -> &str {
        &self.thrown_by
    }
}

/// Raise a spam rejection, unless the message is empty.
///
/// The empty-message guard lets callers pass through possibly-empty error
/// strings without branching: an empty message is a no-op pass.
pub fn reject(message: &str, thrown_by: &str) -> Result<(), SpamError> {
    if message.is_empty() {
        return Ok(());
    }

    Err(SpamError::new(message, thrown_by))
}

/// Escape a string for safe embedding in HTML, quotes included.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }

    out
}
