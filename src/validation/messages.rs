//! Localized rejection messages.

/// Fallback rejection text when the catalog has no entry for a rule.
pub const GENERIC_REJECTION: &str = "Your submission has been flagged as spam.";

/// Resolves a message key to a display string.
///
/// The host normally backs this with its localization layer; the built-in
/// `DefaultMessages` catalog provides default-language texts.
pub trait MessageCatalog: Send + Sync {
    /// Resolve a key such as `validation.honeypot.error`, or `None` when
    /// the catalog has no entry for it.
    fn resolve(&self, key: &str) -> Option<String>;
}

/// Built-in default-language catalog.
#[derive(Clone, Debug, Default)]
pub struct DefaultMessages;

impl MessageCatalog for DefaultMessages {
    fn resolve(&self, key: &str) -> Option<String> {
        let text = match key {
            "validation.honeypot.error" => "Your submission could not be accepted.",
            "validation.timetosubmit.error" => {
                "The form was submitted too quickly. Please try again."
            }
            _ => return None,
        };

        Some(text.to_string())
    }
}
