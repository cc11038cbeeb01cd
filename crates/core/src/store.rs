//! Per-stylesheet macro state
//!
//! Keeps the macro-free source text of a processed sheet together with its
//! effective macro map, so a single macro can be redefined and the sheet
//! re-expanded without fetching or re-extracting anything.

use log::debug;

use crate::map::MacroMap;
use crate::rules::{split_rules, Rule};
use crate::substitute::substitute;

/// Cached text and macros for one processed stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetState {
    raw_text: String,
    macros: MacroMap,
}

impl StylesheetState {
    /// Create state from comment-free text with the directive blocks
    /// already removed.
    pub fn new(raw_text: impl Into<String>, macros: MacroMap) -> Self {
        Self {
            raw_text: raw_text.into(),
            macros,
        }
    }

    /// The cached source text, macro references intact
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn set_raw_text(&mut self, raw_text: impl Into<String>) {
        self.raw_text = raw_text.into();
    }

    /// The effective macro map
    pub fn macros(&self) -> &MacroMap {
        &self.macros
    }

    pub fn set_macros(&mut self, macros: MacroMap) {
        self.macros = macros;
    }

    pub fn get_macro(&self, name: &str) -> Option<&str> {
        self.macros.get(name)
    }

    /// Redefine one macro and return the re-expanded rule sequence.
    pub fn set_macro(&mut self, name: impl Into<String>, value: impl Into<String>) -> Vec<Rule> {
        let name = name.into();
        let value = value.into();
        debug!("Setting macro {} = {}", name, value);
        self.macros.insert(name, value);
        self.rules()
    }

    /// Expand the cached text with the current macros.
    pub fn rules(&self) -> Vec<Rule> {
        split_rules(&self.expanded())
    }

    /// The cached text with the current macros substituted
    pub fn expanded(&self) -> String {
        substitute(&self.raw_text, &self.macros)
    }
}
