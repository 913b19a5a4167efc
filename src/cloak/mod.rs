//! Email protection transform for rendered form markup.
//!
//! An external content plugin cloaks every email address it finds in
//! rendered HTML, which breaks form controls whose values legitimately
//! contain emails. This module shields those values for the duration of
//! one render lifecycle:
//!
//! 1. **After form render** — replace emails inside form controls with
//!    opaque hash tokens and append a marker telling the cloaker to skip
//!    the fragment.
//! 2. **After content prepare** — content plugins may have introduced new
//!    emails into the fragment; protect those too, then hand the fragment
//!    back to the host's content-preparation pipeline so the cloaker can
//!    process any remaining, never-protected emails.
//! 3. **After full page render** — substitute every recorded token back to
//!    its original email across the whole page buffer, exactly once.
//!
//! The token table lives inside the [`EmailGuard`] value, which is scoped
//! to one render lifecycle. Concurrent renders use independent guards and
//! cannot leak tokens into each other.

mod rewrite;

use std::collections::HashMap;
use tracing::{debug, trace};

/// Prefix of generated email tokens, making them identifiable in markup.
pub const EMAIL_HASH_PREFIX: &str = "cf_email_";

/// Marker that tells the external email-cloaking plugin to skip content.
pub const EMAIL_CLOAK_OFF: &str = "{emailcloak=off}";

/// Host capabilities the transform depends on.
///
/// The transform is entirely inert unless the host reports a front-end
/// rendering context, an enabled email-cloaking plugin, and a successful
/// form-library bootstrap.
pub trait Host {
    /// Whether this is a front-end (site) rendering context.
    fn is_site_client(&self) -> bool;

    /// Whether the external email-cloaking content plugin is enabled.
    fn email_cloak_enabled(&self) -> bool;

    /// Bootstrap the form library; the transform requires it.
    fn bootstrap(&self) -> bool;

    /// Whether the current page is the article content view, where the
    /// content-preparation pipeline already runs by default.
    fn is_article_view(&self) -> bool;

    /// Run the host's content-preparation pipeline over a fragment.
    fn prepare_content(&self, html: &str) -> String;
}

/// Render-scoped protect/restore transform over form markup.
///
/// # Example
///
/// ```rust
/// use formshield::cloak::{EmailGuard, EMAIL_HASH_PREFIX};
///
/// let mut guard = EmailGuard::new();
///
/// let protected = guard.protect(r#"<input type="email" value="user@example.com">"#);
/// assert!(!protected.contains("user@example.com"));
/// assert!(protected.contains(EMAIL_HASH_PREFIX));
///
/// let page = format!("<body>{protected}</body>");
/// assert!(guard.restore(&page).contains("user@example.com"));
/// ```
#[derive(Debug, Default)]
pub struct EmailGuard {
    // token -> original email
    hashes: HashMap<String, String>,
}

impl EmailGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of protected emails recorded so far.
    pub fn protected_count(&self) -> usize {
        self.hashes.len()
    }

    /// Phase 1: protect emails in the freshly rendered form fragment and
    /// append the cloaker disable marker.
    pub fn after_form_render(&mut self, host: &dyn Host, html: &str) -> String {
        if !should_run(host) {
            return html.to_string();
        }

        let mut out = self.protect(html);

        // The host triggers content preparation on the fragment after this
        // event. A content plugin running before the cloaker can introduce
        // new emails, which the cloaker would then mangle. The marker
        // disables the cloaker for this fragment.
        out.push_str(EMAIL_CLOAK_OFF);
        out
    }

    /// Phase 2: protect emails introduced by content plugins, then give
    /// the cloaker a chance at the remaining, never-protected emails.
    pub fn after_content_prepare(&mut self, host: &dyn Host, html: &str) -> String {
        if !should_run(host) {
            return html.to_string();
        }

        let out = self.protect(html);

        // The article view triggers content preparation by default; running
        // it again here would double-process the fragment.
        if host.is_article_view() {
            return out;
        }

        host.prepare_content(&out)
    }

    /// Phase 3: restore every protected email across the full page buffer.
    pub fn after_page_render(&mut self, host: &dyn Host, buffer: &str) -> String {
        if !should_run(host) {
            return buffer.to_string();
        }

        self.restore(buffer)
    }

    /// Replace emails inside form controls with fresh tokens, recording
    /// each `token -> email` pair for later restoration.
    ///
    /// Only `input`, `textarea` and `option` elements are inspected: every
    /// attribute value, plus text content for the latter two. A fragment
    /// without an `@` is returned unchanged without parsing. A rewriting
    /// failure falls back to the original fragment and commits nothing to
    /// the token table.
    pub fn protect(&mut self, html: &str) -> String {
        if !html.contains('@') {
            return html.to_string();
        }

        match rewrite::protect(html) {
            Ok((out, entries)) => {
                trace!(protected = entries.len(), "protected form emails");
                self.hashes.extend(entries);
                out
            }
            Err(err) => {
                debug!(error = %err, "html rewrite failed, leaving fragment unchanged");
                html.to_string()
            }
        }
    }

    /// Substitute every recorded token back to its original email.
    ///
    /// A cheap no-op when nothing was protected.
    pub fn restore(&self, buffer: &str) -> String {
        if self.hashes.is_empty() {
            return buffer.to_string();
        }

        let mut out = buffer.to_string();

        for (hash, email) in &self.hashes {
            out = out.replace(hash, email);
        }

        out
    }
}

fn should_run(host: &dyn Host) -> bool {
    host.is_site_client() && host.email_cloak_enabled() && host.bootstrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct TestHost {
        site: bool,
        cloak: bool,
        bootstrap: bool,
        article: bool,
        prepared: Cell<usize>,
    }

    impl TestHost {
        fn active() -> Self {
            Self {
                site: true,
                cloak: true,
                bootstrap: true,
                article: false,
                prepared: Cell::new(0),
            }
        }
    }

    impl Host for TestHost {
        fn is_site_client(&self) -> bool {
            self.site
        }

        fn email_cloak_enabled(&self) -> bool {
            self.cloak
        }

        fn bootstrap(&self) -> bool {
            self.bootstrap
        }

        fn is_article_view(&self) -> bool {
            self.article
        }

        fn prepare_content(&self, html: &str) -> String {
            self.prepared.set(self.prepared.get() + 1);
            html.to_string()
        }
    }

    const FORM: &str = r#"<form><input type="email" value="user@example.com"></form>"#;

    #[test]
    fn round_trip_recovers_the_email_byte_for_byte() {
        let host = TestHost::active();
        let mut guard = EmailGuard::new();

        let protected = guard.after_form_render(&host, FORM);

        assert!(!protected.contains("user@example.com"));
        assert!(protected.contains(EMAIL_HASH_PREFIX));
        assert!(protected.ends_with(EMAIL_CLOAK_OFF));

        let page = format!("<html><body>{protected}</body></html>");
        let restored = guard.after_page_render(&host, &page);

        assert!(restored.contains(r#"value="user@example.com""#));
        assert!(!restored.contains(EMAIL_HASH_PREFIX));
    }

    #[test]
    fn inert_outside_the_front_end() {
        let host = TestHost {
            site: false,
            ..TestHost::active()
        };
        let mut guard = EmailGuard::new();

        assert_eq!(guard.after_form_render(&host, FORM), FORM);
        assert_eq!(guard.protected_count(), 0);
    }

    #[test]
    fn inert_when_the_cloak_plugin_is_disabled() {
        let host = TestHost {
            cloak: false,
            ..TestHost::active()
        };
        let mut guard = EmailGuard::new();

        assert_eq!(guard.after_form_render(&host, FORM), FORM);
        assert_eq!(guard.after_content_prepare(&host, FORM), FORM);
        assert_eq!(guard.after_page_render(&host, FORM), FORM);
        assert_eq!(host.prepared.get(), 0);
    }

    #[test]
    fn inert_when_bootstrap_fails() {
        let host = TestHost {
            bootstrap: false,
            ..TestHost::active()
        };
        let mut guard = EmailGuard::new();

        assert_eq!(guard.after_form_render(&host, FORM), FORM);
    }

    #[test]
    fn fragment_without_at_sign_is_untouched() {
        let mut guard = EmailGuard::new();
        let html = r#"<input type="text" value="no emails here">"#;

        assert_eq!(guard.protect(html), html);
        assert_eq!(guard.protected_count(), 0);
    }

    #[test]
    fn restore_is_a_no_op_with_an_empty_table() {
        let guard = EmailGuard::new();

        assert_eq!(guard.restore("<body>page</body>"), "<body>page</body>");
    }

    #[test]
    fn independent_guards_do_not_share_tokens() {
        let mut first = EmailGuard::new();
        let mut second = EmailGuard::new();

        let protected = first.protect(FORM);
        assert_eq!(first.protected_count(), 1);
        assert_eq!(second.protected_count(), 0);

        // The second guard knows nothing about the first guard's tokens.
        assert_eq!(second.restore(&protected), protected);
        assert!(first.restore(&protected).contains("user@example.com"));

        second.protect(FORM);
        assert_eq!(second.protected_count(), 1);
    }

    #[test]
    fn content_prepare_phase_runs_the_host_pipeline() {
        let host = TestHost::active();
        let mut guard = EmailGuard::new();

        let out = guard.after_content_prepare(&host, FORM);

        assert!(!out.contains("user@example.com"));
        assert_eq!(host.prepared.get(), 1);
    }

    #[test]
    fn content_prepare_phase_skips_the_article_view() {
        let host = TestHost {
            article: true,
            ..TestHost::active()
        };
        let mut guard = EmailGuard::new();

        let out = guard.after_content_prepare(&host, FORM);

        assert!(!out.contains("user@example.com"));
        assert_eq!(host.prepared.get(), 0);
    }

    #[test]
    fn second_pass_protects_newly_introduced_emails() {
        let host = TestHost::active();
        let mut guard = EmailGuard::new();

        let first = guard.after_form_render(&host, FORM);
        assert_eq!(guard.protected_count(), 1);

        // Simulate a content plugin injecting a fresh email into an option.
        let with_new = first.replace(
            "</form>",
            r#"<select><option>sales@example.org</option></select></form>"#,
        );

        let second = guard.after_content_prepare(&host, &with_new);

        assert!(!second.contains("sales@example.org"));
        assert_eq!(guard.protected_count(), 2);

        let restored = guard.restore(&second);
        assert!(restored.contains("sales@example.org"));
        assert!(restored.contains("user@example.com"));
    }

    #[test]
    fn textarea_text_content_is_protected() {
        let mut guard = EmailGuard::new();

        let out = guard.protect("<textarea>contact me at help@example.net please</textarea>");

        assert!(!out.contains("help@example.net"));
        assert!(guard.restore(&out).contains("help@example.net"));
    }

    #[test]
    fn markup_outside_form_controls_is_left_alone() {
        let mut guard = EmailGuard::new();
        let html = r#"<p>write to info@example.com</p><input value="user@example.com">"#;

        let out = guard.protect(html);

        // Only the input value is shielded; paragraph text is the cloaker's
        // business.
        assert!(out.contains("info@example.com"));
        assert!(!out.contains(r#"value="user@example.com""#));
        assert_eq!(guard.protected_count(), 1);
    }

    #[test]
    fn placeholder_attributes_are_protected_too() {
        let mut guard = EmailGuard::new();

        let out = guard.protect(r#"<input type="email" placeholder="you@example.com">"#);

        assert!(!out.contains("you@example.com"));
        assert!(guard.restore(&out).contains("you@example.com"));
    }

    #[test]
    fn tokens_are_unique_per_occurrence() {
        let mut guard = EmailGuard::new();

        let out = guard.protect(
            r#"<input value="dup@example.com"><input value="dup@example.com">"#,
        );

        assert_eq!(guard.protected_count(), 2);
        assert!(!out.contains("dup@example.com"));

        let restored = guard.restore(&out);
        assert_eq!(restored.matches("dup@example.com").count(), 2);
    }
}
