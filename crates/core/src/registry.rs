//! Global macro registry and processing context
//!
//! `@global-macros` definitions found in any stylesheet land in a registry
//! that acts as the base layer under every sheet's own macros. The registry
//! lives in a [`MacroContext`] owned by the caller; [`MacroContext::shared`]
//! offers one process-wide instance for hosts that want a single scope.

use std::sync::{OnceLock, PoisonError, RwLock};

use log::debug;

use crate::map::MacroMap;

/// Macros shared by every stylesheet
///
/// The map is created on the first `@global-macros` block seen; creation
/// is race-free even when sheets are processed concurrently. Later global
/// blocks add to it. Sheets already processed are not re-expanded when it
/// changes.
#[derive(Debug, Default)]
pub struct GlobalMacroRegistry {
    macros: OnceLock<RwLock<MacroMap>>,
}

impl GlobalMacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any `@global-macros` block has been seen
    pub fn is_initialized(&self) -> bool {
        self.macros.get().is_some()
    }

    /// Merge definitions from a `@global-macros` block
    pub fn absorb(&self, definitions: &MacroMap) {
        let lock = self.macros.get_or_init(|| {
            debug!("Creating global macro registry");
            RwLock::new(MacroMap::new())
        });
        let mut macros = lock.write().unwrap_or_else(PoisonError::into_inner);
        macros.extend_from(definitions);
        debug!("Global registry now holds {} macros", macros.len());
    }

    /// Current global macros, empty before the first global block
    pub fn snapshot(&self) -> MacroMap {
        match self.macros.get() {
            Some(lock) => lock.read().unwrap_or_else(PoisonError::into_inner).clone(),
            None => MacroMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let lock = self.macros.get()?;
        let macros = lock.read().unwrap_or_else(PoisonError::into_inner);
        macros.get(name).map(str::to_string)
    }

    /// Define or redefine a single global macro
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut definition = MacroMap::new();
        definition.insert(name, value);
        self.absorb(&definition);
    }
}

/// State shared across all processing calls of one host
#[derive(Debug, Default)]
pub struct MacroContext {
    globals: GlobalMacroRegistry,
}

static SHARED_CONTEXT: OnceLock<MacroContext> = OnceLock::new();

impl MacroContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide context, created on first access
    pub fn shared() -> &'static MacroContext {
        SHARED_CONTEXT.get_or_init(MacroContext::new)
    }

    pub fn globals(&self) -> &GlobalMacroRegistry {
        &self.globals
    }
}
