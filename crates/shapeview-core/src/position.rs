//! Document positions, selections and declaration spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (line, column) location in a document. Columns count characters.
///
/// Field order gives the derived `Ord` its lexicographic meaning: line
/// first, then column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub const fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// The editor selection. A bare cursor has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub const fn cursor(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Start and end of one CSS property declaration. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSpan {
    pub start: Position,
    pub end: Position,
}
