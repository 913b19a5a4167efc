//! The validation rule contract.

use crate::form::{FormConfig, Submission};
use crate::spam::{self, SpamError};
use crate::validation::messages::{MessageCatalog, GENERIC_REJECTION};

/// Result of running one rule against a submission.
///
/// The explicit two-value shape replaces an implicit "anything but an
/// exact fail signal counts as pass" convention: a rule either passes or
/// fails, and a failure optionally carries a rule-specific reason. When
/// the reason is absent, the default catalog message for the rule is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The submission cleared this rule.
    Pass,
    /// The submission was flagged, with an optional custom reason.
    Fail(Option<String>),
}

impl Outcome {
    /// A failure using the rule's default catalog message.
    pub fn fail() -> Self {
        Outcome::Fail(None)
    }

    /// A failure carrying a rule-specific reason.
    pub fn fail_with(reason: impl Into<String>) -> Self {
        Outcome::Fail(Some(reason.into()))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }
}

/// Capability interface every validation rule implements.
///
/// Rules are stateless values; the form configuration and submission data
/// are passed into each call. A rule reads its own settings from the
/// form's `params.*` scope and its per-render metadata from the
/// submission's `env` channel under its `alias`.
pub trait Rule: Send + Sync {
    /// Stable lowercase identifier, unique per rule.
    ///
    /// Used for the default message key (`validation.<name>.error`) and
    /// the failure origin tag (`validation.<name>`).
    fn name(&self) -> &'static str;

    /// Short key for the env channel and the container marker attribute.
    fn alias(&self) -> &'static str;

    /// Whether this rule is active for the given form. Pure.
    fn is_enabled(&self, form: &FormConfig) -> bool;

    /// Run the check against one submission.
    fn validate(&self, form: &FormConfig, submission: &Submission) -> Outcome;

    /// Pre-render hook, invoked once per form render.
    ///
    /// When the rule is enabled, adds a `data-cf-<alias>` marker (empty
    /// value) to the form container so client-side script can detect which
    /// protections are active. A no-op when disabled.
    fn on_form_before_render(&self, form: &mut FormConfig) {
        if !self.is_enabled(form) {
            return;
        }

        form.add_container_attr(format!("data-cf-{}", self.alias()), "");
    }

    /// Resolve the failure reason into a display message.
    ///
    /// A custom reason wins; otherwise the catalog entry for this rule,
    /// falling back to a generic rejection text.
    fn resolve_error(&self, reason: Option<String>, catalog: &dyn MessageCatalog) -> String {
        reason.unwrap_or_else(|| {
            catalog
                .resolve(&format!("validation.{}.error", self.name()))
                .unwrap_or_else(|| GENERIC_REJECTION.to_string())
        })
    }

    /// Validate and raise a `SpamError` on failure.
    ///
    /// Produces the same error shape as the pipeline's own failure path:
    /// an HTML-escaped resolved message tagged `validation.<name>`.
    fn validate_or_reject(
        &self,
        form: &FormConfig,
        submission: &Submission,
        catalog: &dyn MessageCatalog,
    ) -> Result<(), SpamError> {
        match self.validate(form, submission) {
            Outcome::Pass => Ok(()),
            Outcome::Fail(reason) => {
                let message = spam::escape_html(&self.resolve_error(reason, catalog));
                spam::reject(&message, &format!("validation.{}", self.name()))
            }
        }
    }
}
