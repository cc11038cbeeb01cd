//! Directive block extraction
//!
//! Locates a `@macros { ... }` or `@global-macros { ... }` block, pulls out
//! its body and returns the stylesheet text with the block cut away.

use std::fmt;

use log::{debug, warn};

use crate::error::{MacroError, SourceLocation};

/// Macro definition directive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `@macros`: definitions scoped to one stylesheet
    Local,
    /// `@global-macros`: definitions shared by every stylesheet
    Global,
}

impl Directive {
    /// The at-keyword introducing this directive
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Local => "@macros",
            Directive::Global => "@global-macros",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A directive block cut out of a stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Block body with line breaks removed
    pub body: String,
    /// Stylesheet text with the block removed
    pub text: String,
    /// Set when the block was never closed
    pub diagnostic: Option<MacroError>,
}

/// Extract the first `directive` block from comment-free `text`.
///
/// Returns `None` when the directive does not occur at all. The body is
/// assumed to be a flat declaration list, so the first `}` after the opening
/// `{` closes it. A block that is never closed consumes the rest of the
/// input and carries an [`MacroError::UnterminatedBlock`] diagnostic.
pub fn extract_block(text: &str, directive: Directive) -> Option<Extraction> {
    let keyword = directive.keyword();
    // ASCII lowercasing keeps byte offsets stable
    let start = text.to_ascii_lowercase().find(keyword)?;
    let after_keyword = start + keyword.len();
    let prefix = &text[..start];

    let unterminated = || {
        let location = SourceLocation::from_offset(text, start);
        warn!("{} block at {} is never closed; dropping the rest of the sheet", directive, location);
        Some(MacroError::unterminated(directive, location))
    };

    let Some(open) = text[after_keyword..].find('{').map(|i| after_keyword + i) else {
        return Some(Extraction {
            body: String::new(),
            text: prefix.to_string(),
            diagnostic: unterminated(),
        });
    };

    let (body, rest, diagnostic) = match text[open + 1..].find('}') {
        Some(i) => {
            let close = open + 1 + i;
            (&text[open + 1..close], &text[close + 1..], None)
        }
        None => (&text[open + 1..], "", unterminated()),
    };

    debug!("Extracted {} block ({} bytes)", directive, body.len());

    let body: String = body.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let mut remaining = String::with_capacity(prefix.len() + rest.len());
    remaining.push_str(prefix);
    remaining.push_str(rest);

    Some(Extraction {
        body,
        text: remaining,
        diagnostic,
    })
}
