//! Structural email rewriting over form markup.
//!
//! Uses a streaming HTML rewriter rather than regex over raw markup, so
//! substitution cannot corrupt surrounding HTML. Only a fixed set of form
//! control elements is inspected: every attribute of `input`, `textarea`
//! and `option`, plus the text content of the latter two.

use super::EMAIL_HASH_PREFIX;
use lol_html::errors::RewritingError;
use lol_html::html_content::{ContentType, Element, TextChunk};
use lol_html::{element, text, HtmlRewriter, Settings};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use uuid::Uuid;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

#[derive(Debug, Error)]
pub(super) enum RewriteError {
    #[error("html rewriting failed: {0}")]
    Rewriting(#[from] RewritingError),

    #[error("rewritten output was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Rewrite the fragment, replacing emails inside form controls with fresh
/// tokens. Returns the rewritten fragment and the `token -> email` entries
/// it produced; on failure the caller keeps the original fragment and no
/// entries are committed.
pub(super) fn protect(html: &str) -> Result<(String, HashMap<String, String>), RewriteError> {
    let table = RefCell::new(HashMap::new());
    let textarea_buf = RefCell::new(String::new());
    let option_buf = RefCell::new(String::new());
    let mut output = Vec::with_capacity(html.len());

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("input", |el| {
                    protect_attributes(el, &table)?;
                    Ok(())
                }),
                element!("textarea", |el| {
                    protect_attributes(el, &table)?;
                    Ok(())
                }),
                element!("option", |el| {
                    protect_attributes(el, &table)?;
                    Ok(())
                }),
                text!("textarea", |chunk| {
                    protect_text(chunk, &textarea_buf, &table);
                    Ok(())
                }),
                text!("option", |chunk| {
                    protect_text(chunk, &option_buf, &table);
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    let out = String::from_utf8(output)?;
    Ok((out, table.into_inner()))
}

/// Replace emails in every attribute value of a form control.
fn protect_attributes(
    el: &mut Element<'_, '_>,
    table: &RefCell<HashMap<String, String>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let attrs: Vec<(String, String)> = el
        .attributes()
        .iter()
        .map(|attr| (attr.name(), attr.value()))
        .collect();

    for (name, value) in attrs {
        let replaced = replace_emails(&value, table);

        if replaced != value {
            el.set_attribute(&name, &replaced)?;
        }
    }

    Ok(())
}

/// Replace emails in the text content of a form control.
///
/// Text nodes can arrive split across chunks; chunks are buffered until
/// the final one, then the whole node is rewritten in one pass so an email
/// straddling a chunk boundary is still caught.
fn protect_text(
    chunk: &mut TextChunk<'_>,
    buf: &RefCell<String>,
    table: &RefCell<HashMap<String, String>>,
) {
    buf.borrow_mut().push_str(chunk.as_str());

    if !chunk.last_in_text_node() {
        chunk.remove();
        return;
    }

    let text = std::mem::take(&mut *buf.borrow_mut());
    let replaced = replace_emails(&text, table);

    if replaced != text || text != chunk.as_str() {
        // Buffered chunks carry raw source text; re-emitting as HTML keeps
        // existing entities byte-identical.
        chunk.replace(&replaced, ContentType::Html);
    }
}

/// Replace each email in a value with a fresh token, recording the pair.
fn replace_emails(text: &str, table: &RefCell<HashMap<String, String>>) -> String {
    if !text.contains('@') {
        return text.to_string();
    }

    EMAIL_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let email = caps[0].to_string();
            let token = hash_token(&email);

            table.borrow_mut().insert(token.clone(), email);
            token
        })
        .into_owned()
}

/// Opaque token for one email occurrence.
///
/// Salted with a per-call UUID so repeated occurrences of the same email
/// get distinct tokens.
fn hash_token(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());

    let digest = hex::encode(hasher.finalize());
    format!("{}{}", EMAIL_HASH_PREFIX, &digest[..32])
}
