//! CSS Macros Engine
//!
//! Expands `@macros { name: value; }` and `@global-macros { ... }` blocks
//! in stylesheet text. Definitions are pulled out of the sheet, macro
//! references in declaration values are replaced, and the result is split
//! into rule strings for a live rule list. Processed sheets keep their
//! macro-free text so a macro can be redefined later without reloading.

pub mod comments;
pub mod error;
pub mod extract;
pub mod host;
pub mod map;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod rules;
pub mod store;
pub mod substitute;

pub use comments::strip_comments;
pub use error::{MacroError, MacroResult, SourceLocation};
pub use extract::{extract_block, Directive, Extraction};
pub use host::{sheet_name, MemorySheet, ProcessSummary, StyleTarget, StylesheetList};
pub use map::MacroMap;
pub use parser::parse_macros;
pub use processor::Processed;
pub use registry::{GlobalMacroRegistry, MacroContext};
pub use rules::{bindable_rules, split_rules, Rule};
pub use store::StylesheetState;
pub use substitute::{substitute, Substitutor};
