//! Built-in spam heuristics.
//!
//! Each rule is an independent check implementing the `Rule` contract.
//! Registration order in the pipeline is the invocation order, so the
//! list here is deterministic by construction.

mod honeypot;
mod time_to_submit;

pub use honeypot::Honeypot;
pub use time_to_submit::TimeToSubmit;
