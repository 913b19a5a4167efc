//! Time-to-submit rule.
//!
//! Enforces a minimum delay between form display and submission. Humans
//! take at least a couple of seconds to fill a form; an instant submission
//! is likely automated. The form-display timestamp arrives through the
//! submission's `env` channel.

use crate::form::{FormConfig, Submission};
use crate::validation::rule::{Outcome, Rule};
use chrono::Utc;

/// Minimum seconds applied when the check is enabled but unconfigured.
const DEFAULT_MIN_SECONDS: i64 = 2;

/// Minimum submission-time spam check.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeToSubmit;

impl TimeToSubmit {
    /// Resolve the configured minimum in seconds; 0 means disabled.
    fn min_time_to_submit(&self, form: &FormConfig) -> i64 {
        if !form.get_bool("params.enable_min_time_to_submit", false) {
            return 0;
        }

        form.get_i64("params.min_time_to_submit", DEFAULT_MIN_SECONDS)
    }
}

impl Rule for TimeToSubmit {
    fn name(&self) -> &'static str {
        "timetosubmit"
    }

    fn alias(&self) -> &'static str {
        "tts"
    }

    fn is_enabled(&self, form: &FormConfig) -> bool {
        self.min_time_to_submit(form) > 0
    }

    fn validate(&self, form: &FormConfig, submission: &Submission) -> Outcome {
        let min_time = self.min_time_to_submit(form);

        if min_time == 0 {
            return Outcome::Pass;
        }

        // Timestamp recorded client-side when the form was displayed.
        let Some(start) = submission.env_i64(self.alias()) else {
            return Outcome::fail();
        };

        let elapsed = Utc::now().timestamp() - start;

        if elapsed < min_time {
            return Outcome::fail();
        }

        Outcome::Pass
    }
}
