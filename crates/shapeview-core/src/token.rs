//! Tokens and the token source interface consumed by the locator.
//!
//! The core never lexes text itself. It asks a `TokenSource` (an editor
//! buffer, or the bundled `CssDocument`) for the token at a position and
//! walks from there.

use crate::position::{Position, Selection};

/// Classification tag attached to every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// A property name: the word that starts a declaration.
    Identifier,
    /// A word in value position (`circle`, `nonzero`, `evenodd`).
    Keyword,
    /// A numeric literal with optional unit suffix (`50px`, `-1.5cm`).
    Number,
    String,
    Comment,
    /// A word outside any block.
    Selector,
    /// Any other single character (`!`, `>`, `.`).
    Punctuation,
    /// No class: whitespace runs and `{ } ; : ( ) ,`.
    Untyped,
}

/// A contiguous run of text on one line.
///
/// `start` and `end` are character columns within the token's line,
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn new(start: usize, end: usize, text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            class,
        }
    }

    /// The empty token a source reports at column 0 or on an empty line.
    pub fn empty() -> Self {
        Self::new(0, 0, "", TokenClass::Untyped)
    }

    pub fn is_identifier(&self) -> bool {
        self.class == TokenClass::Identifier
    }

    pub fn is_untyped(&self) -> bool {
        self.class == TokenClass::Untyped
    }

    /// Untyped and made only of whitespace (the empty token counts).
    pub fn is_whitespace(&self) -> bool {
        self.is_untyped() && self.text.chars().all(char::is_whitespace)
    }

    /// Contains one of the statement terminators `{`, `}`, `;`.
    pub fn has_terminator(&self) -> bool {
        self.text.contains(['{', '}', ';'])
    }
}

/// Supplies tokens around a text position.
///
/// `token_at` follows the usual editor contract: it returns the token that
/// ends at or after `pos.ch` and starts before it, i.e. the token touching
/// the character just left of the cursor. At column 0, or on an empty line,
/// it returns `Token::empty()`.
pub trait TokenSource {
    fn token_at(&self, pos: Position) -> Token;

    /// Text of `line` without its line break.
    fn line_text(&self, line: usize) -> String;

    fn line_count(&self) -> usize;

    fn selection(&self) -> Selection;

    /// Length of `line` in characters.
    fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }
}

/// Borrow a source with a different selection.
///
/// Lets a host run extraction at an arbitrary position (a hover, a command
/// argument) without touching the document's own selection.
pub struct WithSelection<'a, S: ?Sized> {
    pub source: &'a S,
    pub selection: Selection,
}

impl<'a, S: TokenSource + ?Sized> WithSelection<'a, S> {
    pub fn cursor(source: &'a S, at: Position) -> Self {
        Self {
            source,
            selection: Selection::cursor(at),
        }
    }
}

impl<S: TokenSource + ?Sized> TokenSource for WithSelection<'_, S> {
    fn token_at(&self, pos: Position) -> Token {
        self.source.token_at(pos)
    }

    fn line_text(&self, line: usize) -> String {
        self.source.line_text(line)
    }

    fn line_count(&self) -> usize {
        self.source.line_count()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn line_len(&self, line: usize) -> usize {
        self.source.line_len(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_and_terminators() {
        assert!(Token::empty().is_whitespace());
        assert!(Token::new(0, 2, "  ", TokenClass::Untyped).is_whitespace());
        assert!(!Token::new(0, 1, ";", TokenClass::Untyped).is_whitespace());
        assert!(Token::new(0, 1, ";", TokenClass::Untyped).has_terminator());
        assert!(!Token::new(0, 1, ":", TokenClass::Untyped).has_terminator());
    }

    #[test]
    fn with_selection_overrides_only_the_selection() {
        let doc = crate::lexer::CssDocument::new("a { b: c; }");
        let view = WithSelection::cursor(&doc, Position::new(0, 5));
        assert_eq!(view.selection(), Selection::cursor(Position::new(0, 5)));
        assert_eq!(doc.selection(), Selection::default());
        assert_eq!(view.token_at(Position::new(0, 5)), doc.token_at(Position::new(0, 5)));
        assert_eq!(view.line_len(0), 11);
    }
}
