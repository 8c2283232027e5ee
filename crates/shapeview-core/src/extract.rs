//! Shape extractor: declaration tokens → `ShapeDescriptor`.
//!
//! A two-state machine. `ExpectName` wants the `shape-inside` /
//! `shape-outside` property (optionally vendor prefixed); `ExpectValue`
//! wants the shape function name. Everything after the function name is
//! handed to the parameter normalizer and then to the shape's parser.

use crate::config::ViewerConfig;
use crate::error::ShapeError;
use crate::locate::{collect_tokens, locate};
use crate::model::{ShapeDescriptor, ShapeKind};
use crate::params::normalize;
use crate::position::DeclarationSpan;
use crate::shapes::parse_shape;
use crate::token::{Token, TokenSource};
use winnow::ascii::alphanumeric1;
use winnow::combinator::{alt, opt};
use winnow::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectName,
    ExpectValue,
}

/// Result of a successful extraction at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub span: DeclarationSpan,
    /// Source text of the whole declaration.
    pub declaration: String,
    pub shape: ShapeDescriptor,
}

/// Run the state machine over a declaration's tokens.
pub fn extract_tokens(tokens: &[Token], config: &ViewerConfig) -> Result<ShapeDescriptor, ShapeError> {
    let mut state = State::ExpectName;

    for (i, token) in tokens.iter().enumerate() {
        if token.is_whitespace() {
            continue;
        }
        match state {
            State::ExpectName => {
                if !(token.is_identifier() && is_shape_property(&token.text)) {
                    return Err(ShapeError::unknown(token.text.as_str()));
                }
                state = State::ExpectValue;
            }
            State::ExpectValue => {
                if token.is_untyped() && token.text == ":" {
                    continue;
                }
                let kind = ShapeKind::from_name(&token.text)
                    .ok_or_else(|| ShapeError::unknown(token.text.as_str()))?;
                let params = normalize(&tokens[i + 1..])?;
                let geometry = parse_shape(kind, &params, config.viewport_size)?;
                return Ok(ShapeDescriptor {
                    geometry,
                    presentation: config.presentation(),
                    viewport: config.viewport_size,
                });
            }
        }
    }

    Err(ShapeError::MalformedInput(
        tokens.iter().map(|t| t.text.as_str()).collect::<String>().trim().to_string(),
    ))
}

/// `shape-inside`, `shape-outside`, or either behind a `-vendor-` prefix.
pub fn is_shape_property(name: &str) -> bool {
    shape_property.parse(name).is_ok()
}

fn shape_property(input: &mut &str) -> ModalResult<()> {
    (
        opt(('-', alphanumeric1, '-')),
        alt(("shape-inside", "shape-outside")),
    )
        .void()
        .parse_next(input)
}

/// Full pipeline at the source's current selection.
pub fn try_extract<S: TokenSource + ?Sized>(
    source: &S,
    config: &ViewerConfig,
) -> Result<Extraction, ShapeError> {
    let span = locate(source, source.selection())?;
    let tokens = collect_tokens(source, &span);
    let shape = extract_tokens(&tokens, config)?;
    Ok(Extraction {
        span,
        declaration: tokens.iter().map(|t| t.text.as_str()).collect(),
        shape,
    })
}

/// Extract the shape under the cursor, or nothing.
///
/// Failures are expected (most cursor positions are not on a shape) and are
/// only logged.
#[must_use]
pub fn extract_shape<S: TokenSource + ?Sized>(source: &S, config: &ViewerConfig) -> Option<Extraction> {
    match try_extract(source, config) {
        Ok(extraction) => {
            log::debug!(
                "extracted {} at {}",
                extraction.shape.summary(),
                extraction.span.start
            );
            Some(extraction)
        }
        Err(err) => {
            log::debug!("no shape at {}: {err}", source.selection().start);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::CssDocument;
    use crate::model::ShapeGeometry;
    use crate::position::Position;
    use crate::token::TokenClass;
    use pretty_assertions::assert_eq;

    fn doc_at(text: &str, line: usize, ch: usize) -> CssDocument {
        let mut doc = CssDocument::new(text);
        doc.set_cursor(Position::new(line, ch));
        doc
    }

    #[test]
    fn shape_property_names() {
        assert!(is_shape_property("shape-inside"));
        assert!(is_shape_property("shape-outside"));
        assert!(is_shape_property("-webkit-shape-outside"));
        assert!(is_shape_property("-ms-shape-inside"));
        assert!(!is_shape_property("shape-margin"));
        assert!(!is_shape_property("webkit-shape-inside"));
        assert!(!is_shape_property("shape-outside-x"));
        assert!(!is_shape_property("--shape-inside"));
    }

    #[test]
    fn circle_declaration() {
        let doc = doc_at("a {\n  shape-outside: circle(nonzero, nonzero, 50px);\n}", 1, 25);
        let extraction = try_extract(&doc, &ViewerConfig::default()).unwrap();
        assert_eq!(
            extraction.shape.geometry,
            ShapeGeometry::Circle {
                cx: 100.0,
                cy: 100.0,
                r: 100.0
            }
        );
        assert_eq!(extraction.shape.presentation.fill, None);
        assert_eq!(
            extraction.declaration,
            "shape-outside: circle(nonzero, nonzero, 50px);"
        );
    }

    #[test]
    fn vendor_prefixed_property() {
        let doc = doc_at("a { -webkit-shape-inside: ellipse(0, 0, 10px, 5px); }", 0, 30);
        let extraction = try_extract(&doc, &ViewerConfig::default()).unwrap();
        assert_eq!(extraction.shape.kind(), ShapeKind::Ellipse);
    }

    #[test]
    fn other_property_is_unknown_shape() {
        let doc = doc_at("a { clip-path: circle(0, 0, 10px); }", 0, 20);
        assert_eq!(
            try_extract(&doc, &ViewerConfig::default()),
            Err(ShapeError::unknown("clip-path"))
        );
    }

    #[test]
    fn unregistered_function_is_unknown_shape() {
        let doc = doc_at("a { shape-outside: inset(10px); }", 0, 20);
        assert_eq!(
            try_extract(&doc, &ViewerConfig::default()),
            Err(ShapeError::unknown("inset"))
        );
    }

    #[test]
    fn value_without_parens_is_malformed() {
        let doc = doc_at("a { shape-outside: circle; }", 0, 22);
        assert!(matches!(
            try_extract(&doc, &ViewerConfig::default()),
            Err(ShapeError::MalformedInput(_))
        ));
    }

    #[test]
    fn invalid_unit_yields_nothing() {
        let doc = doc_at("a { shape-outside: circle(nonzero, nonzero, 50em); }", 0, 22);
        assert!(extract_shape(&doc, &ViewerConfig::default()).is_none());
    }

    #[test]
    fn viewport_size_comes_from_config() {
        let config = ViewerConfig {
            viewport_size: 100.0,
            ..ViewerConfig::default()
        };
        let doc = doc_at("a { shape-inside: rectangle(0, 0, 100px, 50px); }", 0, 22);
        let extraction = extract_shape(&doc, &config).unwrap();
        assert_eq!(extraction.shape.viewport, 100.0);
        let ShapeGeometry::Rectangle { width, height, .. } = extraction.shape.geometry else {
            panic!("expected rectangle");
        };
        assert_eq!((width, height), (100.0, 50.0));
    }

    #[test]
    fn name_only_declaration_is_malformed() {
        let tokens = vec![Token::new(0, 12, "shape-inside", TokenClass::Identifier)];
        assert!(matches!(
            extract_tokens(&tokens, &ViewerConfig::default()),
            Err(ShapeError::MalformedInput(_))
        ));
    }
}
