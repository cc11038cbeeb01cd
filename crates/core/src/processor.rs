//! Full macro processing pass
//!
//! source text -> comment stripping -> `@global-macros` -> `@macros` ->
//! substitution -> rule splitting.

use log::debug;
use serde::Serialize;

use crate::comments::strip_comments;
use crate::error::MacroError;
use crate::extract::{extract_block, Directive};
use crate::map::MacroMap;
use crate::parser::parse_macros;
use crate::registry::MacroContext;
use crate::rules::{bindable_rules, split_rules, Rule};
use crate::store::StylesheetState;
use crate::substitute::substitute;

/// Result of processing one stylesheet's source
#[derive(Debug, Clone, Default, Serialize)]
pub struct Processed {
    /// Effective macros: globals overridden by local definitions
    pub macros: MacroMap,
    /// Comment-free text with directive blocks removed, macros unexpanded
    pub css_text: String,
    /// Substituted text split into rules
    pub rules: Vec<Rule>,
    /// Whether a `@macros` block was present
    pub has_local_block: bool,
    /// Whether a `@global-macros` block was present
    pub has_global_block: bool,
    #[serde(skip)]
    pub diagnostics: Vec<MacroError>,
}

impl Processed {
    /// Rules ready for a live rule list
    pub fn bindable_rules(&self) -> Vec<String> {
        bindable_rules(&self.rules)
    }

    /// Whether the sheet declared any macro block
    pub fn has_directives(&self) -> bool {
        self.has_local_block || self.has_global_block
    }

    /// Convert into cached per-sheet state
    pub fn into_state(self) -> StylesheetState {
        StylesheetState::new(self.css_text, self.macros)
    }
}

impl MacroContext {
    /// Run a full processing pass over one stylesheet's source.
    ///
    /// Global definitions are merged into this context's registry before
    /// the effective map is built, so a sheet sees its own globals as well
    /// as those of sheets processed earlier.
    pub fn process(&self, source: &str) -> Processed {
        let mut text = strip_comments(source);
        let mut processed = Processed::default();

        if let Some(extraction) = extract_block(&text, Directive::Global) {
            let globals = parse_macros(&extraction.body);
            debug!("Found {} global macros", globals.len());
            self.globals().absorb(&globals);
            processed.has_global_block = true;
            processed.diagnostics.extend(extraction.diagnostic);
            text = extraction.text;
        }

        let mut local = MacroMap::new();
        if let Some(extraction) = extract_block(&text, Directive::Local) {
            local = parse_macros(&extraction.body);
            debug!("Found {} local macros", local.len());
            processed.has_local_block = true;
            processed.diagnostics.extend(extraction.diagnostic);
            text = extraction.text;
        }

        processed.macros = local.merged_over(&self.globals().snapshot());
        processed.rules = split_rules(&substitute(&text, &processed.macros));
        processed.css_text = text;
        processed
    }
}
