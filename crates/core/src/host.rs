//! Host stylesheet binding
//!
//! The engine never touches a rendering engine directly. A host wraps each
//! of its stylesheet objects in a [`StyleTarget`], which stores the cached
//! macro state and accepts replacement rule lists. [`StylesheetList`] holds
//! every known target and provides the bulk operations.

use std::fmt::Display;

use log::{debug, info, warn};

use crate::error::{MacroError, MacroResult};
use crate::map::MacroMap;
use crate::registry::MacroContext;
use crate::rules::bindable_rules;
use crate::store::StylesheetState;

/// A host stylesheet the engine can read and rewrite
pub trait StyleTarget {
    /// Where the sheet came from; `None` for inline styles
    fn href(&self) -> Option<&str>;

    fn state(&self) -> Option<&StylesheetState>;

    fn state_mut(&mut self) -> Option<&mut StylesheetState>;

    fn set_state(&mut self, state: StylesheetState);

    /// Replace the live rule list with `rules`, in order
    fn bind_rules(&mut self, rules: &[String]);

    /// Last path segment of the href, used to address sheets by name
    fn name(&self) -> Option<&str> {
        self.href().map(sheet_name)
    }

    /// Cached macro-free source text
    fn text(&self) -> Option<&str> {
        self.state().map(StylesheetState::raw_text)
    }

    fn set_text(&mut self, text: String) {
        if let Some(state) = self.state_mut() {
            state.set_raw_text(text);
            return;
        }
        self.set_state(StylesheetState::new(text, MacroMap::new()));
    }

    fn macros(&self) -> Option<&MacroMap> {
        self.state().map(StylesheetState::macros)
    }

    fn set_macros(&mut self, macros: MacroMap) {
        if let Some(state) = self.state_mut() {
            state.set_macros(macros);
            return;
        }
        self.set_state(StylesheetState::new(String::new(), macros));
    }

    fn get_macro(&self, name: &str) -> Option<&str> {
        self.state()?.get_macro(name)
    }

    /// Redefine a macro and rebind the re-expanded rules.
    ///
    /// Returns `false` when the sheet has not been processed yet.
    fn set_macro(&mut self, name: &str, value: &str) -> bool {
        let Some(state) = self.state_mut() else {
            return false;
        };
        let rules = bindable_rules(&state.set_macro(name, value));
        self.bind_rules(&rules);
        true
    }

    /// Re-expand the cached text with the current macros.
    fn reapply(&mut self) -> bool {
        let Some(state) = self.state() else {
            return false;
        };
        let rules = bindable_rules(&state.rules());
        self.bind_rules(&rules);
        true
    }
}

/// Last path segment of a stylesheet href
pub fn sheet_name(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

/// In-memory stylesheet, used by command-line hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    href: Option<String>,
    state: Option<StylesheetState>,
    rules: Vec<String>,
}

impl MemorySheet {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// An inline sheet without an href
    pub fn inline() -> Self {
        Self::default()
    }

    /// The live rule list
    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}

impl StyleTarget for MemorySheet {
    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn state(&self) -> Option<&StylesheetState> {
        self.state.as_ref()
    }

    fn state_mut(&mut self) -> Option<&mut StylesheetState> {
        self.state.as_mut()
    }

    fn set_state(&mut self, state: StylesheetState) {
        self.state = Some(state);
    }

    fn bind_rules(&mut self, rules: &[String]) {
        self.rules.clear();
        self.rules.extend(rules.iter().cloned());
    }
}

/// Counts from one [`StylesheetList::process_sources`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Sheets expanded from freshly loaded source
    pub processed: usize,
    /// Sheets re-expanded from their cached state
    pub reused: usize,
    /// Sheets left untouched because their source could not be loaded
    pub skipped: usize,
}

/// Every stylesheet known to a host, in document order
#[derive(Debug, Default)]
pub struct StylesheetList<T> {
    targets: Vec<T>,
}

impl<T: StyleTarget> StylesheetList<T> {
    pub fn new(targets: Vec<T>) -> Self {
        Self { targets }
    }

    pub fn push(&mut self, target: T) {
        self.targets.push(target);
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Hrefs of every target that has one
    pub fn hrefs(&self) -> Vec<&str> {
        self.targets.iter().filter_map(|target| target.href()).collect()
    }

    /// Expand every sheet, pairing targets with `sources` by position.
    ///
    /// A sheet that already carries state is re-expanded from its cache and
    /// its source is ignored. A failed source skips only that sheet.
    pub fn process_sources<E: Display>(
        &mut self,
        context: &MacroContext,
        sources: impl IntoIterator<Item = Result<String, E>>,
    ) -> ProcessSummary {
        let mut summary = ProcessSummary::default();
        let mut sources = sources.into_iter();

        for target in &mut self.targets {
            let source = sources.next();
            let label = target.href().unwrap_or("<inline>").to_string();

            if target.reapply() {
                debug!("Re-expanded {} from cache", label);
                summary.reused += 1;
                continue;
            }

            match source {
                Some(Ok(text)) => {
                    let processed = context.process(&text);
                    let rules = processed.bindable_rules();
                    debug!("{}: {} macros, {} rules", label, processed.macros.len(), rules.len());
                    target.set_state(processed.into_state());
                    target.bind_rules(&rules);
                    summary.processed += 1;
                }
                Some(Err(e)) => {
                    warn!("Skipping {}: {}", label, e);
                    summary.skipped += 1;
                }
                None => {
                    warn!("Skipping {}: no source", label);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Processed {} stylesheets ({} cached, {} skipped)",
            summary.processed, summary.reused, summary.skipped
        );
        summary
    }

    fn find_by_name(&mut self, sheet: &str) -> Option<&mut T> {
        self.targets.iter_mut().find(|target| target.name() == Some(sheet))
    }

    /// Redefine a macro in the sheet whose href ends in `sheet`.
    pub fn set_macro(&mut self, sheet: &str, name: &str, value: &str) -> MacroResult<()> {
        let target = self
            .find_by_name(sheet)
            .ok_or_else(|| MacroError::UnknownSheet(sheet.to_string()))?;
        if target.set_macro(name, value) {
            Ok(())
        } else {
            Err(MacroError::Unprocessed(sheet.to_string()))
        }
    }

    /// Redefine a macro in every processed sheet; returns how many changed.
    pub fn set_macro_for_all(&mut self, name: &str, value: &str) -> usize {
        self.targets
            .iter_mut()
            .map(|target| target.set_macro(name, value))
            .filter(|updated| *updated)
            .count()
    }

    /// Macro value in the sheet whose href ends in `sheet`
    pub fn get_macro(&self, sheet: &str, name: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|target| target.name() == Some(sheet))?
            .get_macro(name)
    }

    /// First non-empty value of a macro across all sheets
    pub fn find_macro(&self, name: &str) -> Option<&str> {
        self.targets
            .iter()
            .filter_map(|target| target.get_macro(name))
            .find(|value| !value.is_empty())
    }
}
