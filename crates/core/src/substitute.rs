//! Macro substitution
//!
//! Rewrites declaration values that reference a macro. Only text between a
//! `:` and the following `;` is considered, so selectors, property names and
//! at-rule preludes are never touched.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::{Captures, Regex};

use crate::map::MacroMap;

/// A declaration value: everything from a `:` up to the closing `;`
const DECLARATION_VALUE: &str = r":([^:;{}]*);";

fn declaration_values() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(DECLARATION_VALUE) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Declaration pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

/// Substitution table for one macro map
#[derive(Debug)]
pub struct Substitutor {
    /// (name, value) pairs, longest names first
    entries: Vec<(String, String)>,
}

impl Substitutor {
    pub fn new(macros: &MacroMap) -> Self {
        let entries = macros
            .names_longest_first()
            .into_iter()
            .filter(|name| !name.is_empty())
            .filter_map(|name| Some((name.to_string(), macros.get(name)?.to_string())))
            .collect();
        Self { entries }
    }

    /// Rewrite every declaration value in `text`.
    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = declaration_values() else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures| format!(":{};", self.expand(&caps[1])))
            .into_owned()
    }

    /// Replace every macro occurrence in one value.
    ///
    /// Scans left to right, trying longer names first at each position and
    /// ignoring ASCII case. Inserted text is never scanned again.
    pub fn expand(&self, value: &str) -> String {
        let mut output = String::with_capacity(value.len());
        let mut rest = value;

        'scan: while let Some(c) = rest.chars().next() {
            for (name, replacement) in &self.entries {
                let matched = rest
                    .get(..name.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(name));
                if matched {
                    output.push_str(replacement);
                    rest = &rest[name.len()..];
                    continue 'scan;
                }
            }
            output.push(c);
            rest = &rest[c.len_utf8()..];
        }

        output
    }
}

/// Substitute every macro of `macros` into the declaration values of `text`.
///
/// Whitespace-only input yields an empty string. Expansion is a single pass:
/// a value that names another macro is not expanded further.
pub fn substitute(text: &str, macros: &MacroMap) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    if macros.is_empty() {
        return text.to_string();
    }
    debug!("Substituting {} macros", macros.len());
    Substitutor::new(macros).apply(text)
}
