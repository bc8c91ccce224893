//! Title resolution.

use regex::Regex;

use crate::model::{DocumentOutline, TextSpan};

/// Picks the document title from the largest span on the opening pages.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    last_page: u32,
    leading_number: Regex,
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new(2)
    }
}

impl TitleResolver {
    /// Create a resolver that looks at pages `1..=last_page`.
    pub fn new(last_page: u32) -> Self {
        Self {
            last_page,
            leading_number: Regex::new(r"^\d+\.?\s*").unwrap(),
        }
    }

    /// Resolve the title from spans in reading order.
    ///
    /// The largest span wins; among equal sizes the first one does. A leading
    /// section number is stripped. Falls back to "Untitled Document".
    pub fn resolve<'a, I>(&self, spans: I) -> String
    where
        I: IntoIterator<Item = &'a TextSpan>,
    {
        let mut best: Option<&TextSpan> = None;
        for span in spans.into_iter().filter(|s| s.page <= self.last_page) {
            if best.map_or(true, |b| span.font_size > b.font_size) {
                best = Some(span);
            }
        }

        let Some(span) = best else {
            return DocumentOutline::UNTITLED.to_string();
        };

        let title = self.leading_number.replace(&span.text, "");
        let title = title.trim();
        if title.is_empty() {
            DocumentOutline::UNTITLED.to_string()
        } else {
            title.to_string()
        }
    }
}
