//! Macro processing error and diagnostic types

use std::fmt;
use thiserror::Error;

use crate::extract::Directive;

/// Macro processing result type
pub type MacroResult<T> = Result<T, MacroError>;

/// Source location in stylesheet text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Compute the location of a byte offset within `text`.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let mut line = 1;
        let mut column = 1;
        for (pos, c) in text.char_indices() {
            if pos >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Macro processing errors
///
/// None of these abort a run: they are reported per stylesheet and the
/// affected sheet degrades to a pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    #[error("Unterminated {directive} block opened at {location}")]
    UnterminatedBlock {
        directive: Directive,
        location: SourceLocation,
    },

    #[error("No stylesheet named '{0}'")]
    UnknownSheet(String),

    #[error("Stylesheet '{0}' has not been processed")]
    Unprocessed(String),
}

impl MacroError {
    /// Get the source location of this error, if it has one
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::UnterminatedBlock { location, .. } => Some(*location),
            Self::UnknownSheet(_) | Self::Unprocessed(_) => None,
        }
    }

    pub fn unterminated(directive: Directive, location: SourceLocation) -> Self {
        Self::UnterminatedBlock { directive, location }
    }
}
