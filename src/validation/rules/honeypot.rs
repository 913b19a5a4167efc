//! Honeypot rule.
//!
//! A hidden field is injected into the form client-side after page load.
//! Legitimate users never see or fill it; bots typically complete every
//! field. A filled honeypot, a missing honeypot identifier, or a missing
//! honeypot field are all treated as spam signals of varying strength.

use crate::form::{FormConfig, Submission};
use crate::validation::rule::{Outcome, Rule};

/// The `params.honeypot` level at which this rule activates.
/// Lower levels leave honeypot handling to client-side script only.
const STRICT_LEVEL: i64 = 2;

/// Honeypot spam check.
#[derive(Clone, Copy, Debug, Default)]
pub struct Honeypot;

impl Rule for Honeypot {
    fn name(&self) -> &'static str {
        "honeypot"
    }

    fn alias(&self) -> &'static str {
        "hp"
    }

    fn is_enabled(&self, form: &FormConfig) -> bool {
        form.get_i64("params.honeypot", 0) == STRICT_LEVEL
    }

    fn validate(&self, form: &FormConfig, submission: &Submission) -> Outcome {
        if !self.is_enabled(form) {
            return Outcome::Pass;
        }

        // The honeypot field identifier is injected via client-side script
        // after page load. Bots with limited or no script execution never
        // carry it in the submission data.
        let Some(honeypot_id) = submission.env_str(self.alias()) else {
            return Outcome::fail_with("Honeypot ID not found");
        };

        // The identified field must exist in the submission. Otherwise this
        // might be a direct POST bypassing the rendered page.
        if !submission.contains_field(&honeypot_id) {
            return Outcome::fail_with("Honeypot not found in submission");
        }

        // A filled honeypot strongly indicates automation.
        if !submission.field_is_empty(&honeypot_id) {
            return Outcome::fail();
        }

        Outcome::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strict_form() -> FormConfig {
        FormConfig::from_value(json!({ "params": { "honeypot": 2 } }))
    }

    #[test]
    fn enabled_only_at_strict_level() {
        let rule = Honeypot;

        assert!(rule.is_enabled(&strict_form()));

        for level in [json!(0), json!(1), json!(3), json!(null)] {
            let form = FormConfig::from_value(json!({ "params": { "honeypot": level.clone() } }));
            assert!(!rule.is_enabled(&form), "level {level} should disable");
        }

        assert!(!rule.is_enabled(&FormConfig::new()));
    }

    #[test]
    fn strict_level_accepts_numeric_string() {
        let form = FormConfig::from_value(json!({ "params": { "honeypot": "2" } }));

        assert!(Honeypot.is_enabled(&form));
    }

    #[test]
    fn disabled_rule_passes_without_env() {
        let form = FormConfig::from_value(json!({ "params": { "honeypot": 0 } }));
        let submission = Submission::from_value(json!({}));

        assert_eq!(Honeypot.validate(&form, &submission), Outcome::Pass);
    }

    #[test]
    fn missing_identifier_fails_with_id_message() {
        let submission = Submission::from_value(json!({ "email": "a@b.co" }));

        assert_eq!(
            Honeypot.validate(&strict_form(), &submission),
            Outcome::fail_with("Honeypot ID not found")
        );
    }

    #[test]
    fn field_absent_from_submission_fails_with_distinct_message() {
        let submission = Submission::from_value(json!({
            "email": "a@b.co",
            "env": { "hp": "cf_field_9" }
        }));

        assert_eq!(
            Honeypot.validate(&strict_form(), &submission),
            Outcome::fail_with("Honeypot not found in submission")
        );
    }

    #[test]
    fn the_two_failure_messages_are_distinguishable() {
        let no_id = Submission::from_value(json!({}));
        let no_field = Submission::from_value(json!({ "env": { "hp": "cf_field_9" } }));

        let first = Honeypot.validate(&strict_form(), &no_id);
        let second = Honeypot.validate(&strict_form(), &no_field);

        assert!(first.is_fail());
        assert!(second.is_fail());
        assert_ne!(first, second);
    }

    #[test]
    fn empty_honeypot_field_passes() {
        let submission = Submission::from_value(json!({
            "cf_field_9": "",
            "env": { "hp": "cf_field_9" }
        }));

        assert_eq!(Honeypot.validate(&strict_form(), &submission), Outcome::Pass);
    }

    #[test]
    fn filled_honeypot_fails_with_default_message() {
        let submission = Submission::from_value(json!({
            "cf_field_9": "I am a bot",
            "env": { "hp": "cf_field_9" }
        }));

        assert_eq!(
            Honeypot.validate(&strict_form(), &submission),
            Outcome::fail()
        );
    }
}
