//! Declaration locator: find the CSS declaration enclosing the selection.
//!
//! Scans backward from the selection start to the identifier that opens the
//! declaration, then forward to the `{`, `}` or `;` that closes it. Both
//! scans are loops over a cursor position, so long files cannot blow the
//! stack.

use crate::error::ShapeError;
use crate::position::{DeclarationSpan, Position, Selection};
use crate::token::{Token, TokenClass, TokenSource};

/// Locate the declaration covering `selection`.
pub fn locate<S: TokenSource + ?Sized>(
    source: &S,
    selection: Selection,
) -> Result<DeclarationSpan, ShapeError> {
    let start = find_start(source, selection.start).ok_or(ShapeError::NotFound)?;
    let end = find_end(source, adjust_end(start, selection.end));
    log::trace!("declaration span {start} .. {end}");
    Ok(DeclarationSpan { start, end })
}

/// Walk left until an identifier opens the declaration.
///
/// Returns `None` when a structural delimiter or the top of the document is
/// reached first.
pub fn find_start<S: TokenSource + ?Sized>(source: &S, from: Position) -> Option<Position> {
    let mut pos = from;
    loop {
        let token = source.token_at(pos);

        if token.is_identifier() {
            return Some(Position::new(pos.line, token.start));
        }
        if token.is_untyped() {
            // The cursor may sit right before the identifier, in which case
            // the token to its left is the whitespace in front of it.
            if token.end < source.line_len(pos.line) {
                let next = source.token_at(Position::new(pos.line, token.end + 1));
                if next.is_identifier() {
                    return Some(Position::new(pos.line, token.end));
                }
            }
            if token.has_terminator() {
                return None;
            }
        }

        if token.start == 0 {
            if pos.line == 0 {
                return None;
            }
            let prev = pos.line - 1;
            pos = Position::new(prev, source.line_len(prev));
        } else {
            pos = Position::new(pos.line, token.start);
        }
    }
}

/// Walk right to just past the statement terminator, or stop at the end of
/// the document.
pub fn find_end<S: TokenSource + ?Sized>(source: &S, from: Position) -> Position {
    let last_line = source.line_count().saturating_sub(1);
    let mut pos = from;
    loop {
        let token = source.token_at(pos);

        if token.is_untyped() && token.has_terminator() {
            return Position::new(pos.line, token.end);
        }

        if token.end >= source.line_len(pos.line) {
            if pos.line >= last_line {
                return pos;
            }
            pos = Position::new(pos.line + 1, 0);
        } else {
            pos = Position::new(pos.line, token.end + 1);
        }
    }
}

/// A cursor inside a single token yields `start >= end`; push the end one
/// column past the start so the forward scan has somewhere to begin.
fn adjust_end(start: Position, end: Position) -> Position {
    if start >= end {
        Position::new(start.line, start.ch + 1)
    } else {
        end
    }
}

/// Every token between `span.start` and `span.end`, in order.
///
/// Line breaks inside the span appear as untyped `"\n"` tokens. A token that
/// crosses `span.end` is clipped to it.
pub fn collect_tokens<S: TokenSource + ?Sized>(source: &S, span: &DeclarationSpan) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = span.start;

    while pos < span.end {
        let len = source.line_len(pos.line);
        if pos.ch >= len {
            if pos.line + 1 >= source.line_count() {
                break;
            }
            tokens.push(Token::new(len, len + 1, "\n", TokenClass::Untyped));
            pos = Position::new(pos.line + 1, 0);
            continue;
        }

        let mut token = source.token_at(Position::new(pos.line, pos.ch + 1));
        if token.end <= pos.ch {
            // Source disagrees with itself; bail out rather than spin.
            break;
        }
        if pos.line == span.end.line && token.end > span.end.ch {
            let keep = span.end.ch.saturating_sub(token.start);
            token.text = token.text.chars().take(keep).collect();
            token.end = span.end.ch;
        }
        pos = Position::new(pos.line, token.end);
        tokens.push(token);
    }

    tokens
}

/// The declaration's source text.
pub fn declaration_text<S: TokenSource + ?Sized>(source: &S, span: &DeclarationSpan) -> String {
    collect_tokens(source, span)
        .iter()
        .map(|t| t.text.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::CssDocument;
    use pretty_assertions::assert_eq;

    const RULE: &str = "div {\n  shape-outside: circle(nonzero, nonzero, 50px);\n  color: red;\n}";

    fn at(line: usize, ch: usize) -> Selection {
        Selection::cursor(Position::new(line, ch))
    }

    #[test]
    fn cursor_in_value_finds_property() {
        let doc = CssDocument::new(RULE);
        let span = locate(&doc, at(1, 30)).unwrap();
        assert_eq!(span.start, Position::new(1, 2));
        assert_eq!(span.end, Position::new(1, 48));
        assert_eq!(
            declaration_text(&doc, &span),
            "shape-outside: circle(nonzero, nonzero, 50px);"
        );
    }

    #[test]
    fn cursor_inside_property_name() {
        let doc = CssDocument::new(RULE);
        let span = locate(&doc, at(1, 5)).unwrap();
        assert_eq!(span.start, Position::new(1, 2));
        assert_eq!(span.end, Position::new(1, 48));
    }

    #[test]
    fn cursor_one_before_identifier_peeks_forward() {
        let doc = CssDocument::new(RULE);
        // Column 1 sits inside the leading whitespace run.
        let span = locate(&doc, at(1, 1)).unwrap();
        assert_eq!(span.start, Position::new(1, 2));
    }

    #[test]
    fn cursor_at_line_start_of_unindented_property() {
        let doc = CssDocument::new("a {\nshape-inside: circle(0px, 0px, 1px);\n}");
        let span = locate(&doc, at(1, 0)).unwrap();
        assert_eq!(span.start, Position::new(1, 0));
    }

    #[test]
    fn structural_boundary_means_not_found() {
        let doc = CssDocument::new(RULE);
        // Right after the opening brace, nothing but whitespace to its left.
        assert_eq!(locate(&doc, at(0, 5)), Err(ShapeError::NotFound));
        // Blank position after a finished declaration.
        let doc = CssDocument::new("a {\n  color: red;\n\n}");
        assert_eq!(locate(&doc, at(2, 0)), Err(ShapeError::NotFound));
    }

    #[test]
    fn top_of_document_means_not_found() {
        let doc = CssDocument::new("   ");
        assert_eq!(locate(&doc, at(0, 2)), Err(ShapeError::NotFound));
    }

    #[test]
    fn multi_line_declaration() {
        let text = "a {\n  shape-inside: polygon(\n    0px 0px,\n    10px 0px);\n}";
        let doc = CssDocument::new(text);
        let span = locate(&doc, at(2, 6)).unwrap();
        assert_eq!(span.start, Position::new(1, 2));
        assert_eq!(span.end, Position::new(3, 14));
        assert_eq!(
            declaration_text(&doc, &span),
            "shape-inside: polygon(\n    0px 0px,\n    10px 0px);"
        );
    }

    #[test]
    fn unterminated_declaration_stops_at_document_end() {
        let doc = CssDocument::new("a {\n  shape-outside: circle(1px, 1px, 5px)");
        let span = locate(&doc, at(1, 20)).unwrap();
        assert_eq!(span.end.line, 1);
        assert_eq!(
            declaration_text(&doc, &span),
            "shape-outside: circle(1px, 1px, 5px)"
        );
    }

    #[test]
    fn selection_end_past_start_is_kept() {
        let doc = CssDocument::new(RULE);
        let sel = Selection::new(Position::new(1, 2), Position::new(1, 20));
        let span = locate(&doc, sel).unwrap();
        assert_eq!(span.end, Position::new(1, 48));
    }

    #[test]
    fn collect_clips_token_crossing_end() {
        let doc = CssDocument::new("a { b: circle(1px); }");
        let span = DeclarationSpan {
            start: Position::new(0, 4),
            end: Position::new(0, 10),
        };
        let texts: Vec<String> = collect_tokens(&doc, &span).into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["b", ":", " ", "cir"]);
    }
}
