//! Pipeline runner for validation rules.

use crate::form::{FormConfig, Submission};
use crate::spam::{self, SpamError};
use crate::validation::messages::{DefaultMessages, MessageCatalog};
use crate::validation::rule::{Outcome, Rule};
use crate::validation::rules::{Honeypot, TimeToSubmit};
use tracing::{debug, trace};

/// Ordered set of validation rules plus the message catalog used to
/// resolve default rejection texts.
///
/// Rules run in registration order and the pipeline aborts on the first
/// failure, so the order is observable: callers relying on which message
/// surfaces get a deterministic answer across runs.
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
    messages: Box<dyn MessageCatalog>,
}

impl Pipeline {
    /// Pipeline with the built-in rules in their canonical order.
    pub fn new() -> Self {
        Self::with_rules(vec![Box::new(Honeypot), Box::new(TimeToSubmit)])
    }

    /// Pipeline over an explicit ordered rule set.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            messages: Box::new(DefaultMessages),
        }
    }

    /// Replace the message catalog (host localization layer).
    pub fn with_catalog(mut self, catalog: Box<dyn MessageCatalog>) -> Self {
        self.messages = catalog;
        self
    }

    /// Append a rule; it runs after all previously registered rules.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in invocation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validate a submission against every registered rule.
    ///
    /// Rules are invoked in registration order; the first failure resolves
    /// its message (custom reason or catalog default), HTML-escapes it and
    /// returns a `SpamError` tagged `validation.<name>` without invoking
    /// any remaining rule.
    pub fn validate(
        &self,
        form: &FormConfig,
        submission: &Submission,
    ) -> Result<(), SpamError> {
        for rule in &self.rules {
            match rule.validate(form, submission) {
                Outcome::Pass => {}
                Outcome::Fail(reason) => {
                    debug!(rule = rule.name(), "submission rejected");

                    let message =
                        spam::escape_html(&rule.resolve_error(reason, self.messages.as_ref()));

                    spam::reject(&message, &format!("validation.{}", rule.name()))?;
                }
            }
        }

        trace!("all validation rules passed");
        Ok(())
    }

    /// Pre-render phase: let every rule mark the form container.
    ///
    /// Each rule's hook is invoked unconditionally; the hook itself honors
    /// `is_enabled`. The mutated configuration carries the accumulated
    /// `data-cf-*` markers back to the renderer.
    pub fn form_before_render(&self, form: &mut FormConfig) {
        for rule in &self.rules {
            rule.on_form_before_render(form);
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
