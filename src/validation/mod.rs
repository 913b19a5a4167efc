//! Spam validation pipeline for form submissions.
//!
//! Rules are small, independent heuristics sharing one capability
//! interface (`Rule`). The pipeline runs them in registration order and
//! aborts on the first failure, so error attribution is deterministic:
//! the surfaced message always belongs to the earliest failing rule.
//!
//! # Example
//!
//! ```rust
//! use formshield::{FormConfig, Pipeline, Submission};
//! use serde_json::json;
//!
//! let form = FormConfig::from_value(json!({
//!     "params": { "honeypot": 2 }
//! }));
//!
//! let submission = Submission::from_value(json!({
//!     "email": "user@example.com",
//!     "cf_field_9": "",
//!     "env": { "hp": "cf_field_9" }
//! }));
//!
//! let pipeline = Pipeline::new();
//! assert!(pipeline.validate(&form, &submission).is_ok());
//! ```

pub mod messages;
pub mod pipeline;
pub mod rule;
pub mod rules;

// Re-export commonly used types
pub use messages::{DefaultMessages, MessageCatalog};
pub use pipeline::Pipeline;
pub use rule::{Outcome, Rule};
pub use rules::{Honeypot, TimeToSubmit};
