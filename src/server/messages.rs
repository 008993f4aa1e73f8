//! Feedback message lookup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is a valid regex"));

/// Resolves a message code to display text.
///
/// `{0}`, `{1}`, … placeholders are replaced by `args` in order.
pub trait MessageSource: Send + Sync {
    fn message(&self, code: &str, args: &[&str]) -> String;
}

/// In-process English message catalog.
///
/// Unknown codes resolve to the code itself.
#[derive(Debug, Clone)]
pub struct DefaultMessageSource {
    messages: HashMap<&'static str, &'static str>,
}

impl DefaultMessageSource {
    pub fn new() -> Self {
        let messages = HashMap::from([
            ("feedback.message.contact.added", "Contact {0} was added."),
            ("feedback.message.contact.updated", "Contact {0} was updated."),
            ("feedback.message.contact.deleted", "Contact {0} was deleted."),
        ]);
        Self { messages }
    }
}

impl Default for DefaultMessageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSource for DefaultMessageSource {
    fn message(&self, code: &str, args: &[&str]) -> String {
        let Some(template) = self.messages.get(code) else {
            return code.to_string();
        };

        format_message(template, args)
    }
}

/// Replace `{n}` placeholders in one pass over `template`.
///
/// Argument text is never rescanned; placeholders without a matching
/// argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| arg.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
