//! Form configuration and submission data.
//!
//! This module contains the two inputs every validation rule consumes:
//! - `FormConfig`: the form's parameter tree plus the container attribute
//!   set, the single mutation point rules are allowed to touch.
//! - `Submission`: the submitted field values plus the reserved `env`
//!   channel of ephemeral, client-injected metadata.
//!
//! Lookups never fail: missing keys and type mismatches resolve to a
//! caller-supplied default, so rules stay pure and panic-free.

mod config;
mod submission;

pub use config::FormConfig;
pub use submission::Submission;
