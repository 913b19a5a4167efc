//! Formshield: anti-spam validation and email protection for rendered forms.
//!
//! Two loosely related subsystems:
//!
//! - **Validation pipeline**: an ordered set of spam heuristics (honeypot,
//!   minimum time-to-submit) run against a form configuration and a
//!   submission, aborting on the first failure with a typed, attributable
//!   error.
//! - **Email protection transform**: a render-scoped protect/restore
//!   transform that shields email addresses inside form controls from an
//!   external email-cloaking content plugin, then restores them exactly
//!   once in the final page buffer.
//!
//! # Example
//!
//! ```rust
//! use formshield::{FormConfig, Pipeline, Submission};
//! use serde_json::json;
//!
//! let form = FormConfig::from_value(json!({
//!     "params": {
//!         "honeypot": 2,
//!         "enable_min_time_to_submit": false
//!     }
//! }));
//!
//! // A bot filled the hidden honeypot field.
//! let submission = Submission::from_value(json!({
//!     "email": "visitor@example.com",
//!     "cf_field_7": "buy cheap pills",
//!     "env": { "hp": "cf_field_7" }
//! }));
//!
//! let pipeline = Pipeline::new();
//! let err = pipeline.validate(&form, &submission).unwrap_err();
//!
//! assert_eq!(err.thrown_by(), "validation.honeypot");
//! ```

pub mod cloak;
pub mod form;
pub mod spam;
pub mod validation;

// Re-export commonly used types
pub use cloak::{EmailGuard, Host};
pub use form::{FormConfig, Submission};
pub use spam::SpamError;
pub use validation::{Outcome, Pipeline, Rule};
