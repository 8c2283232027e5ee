//! Hover: preview the exclusion shape under the cursor.

use shapeview_core::{
    CssDocument, DeclarationSpan, Extraction, TokenSource, ViewerConfig, WithSelection,
    extract_shape, render_svg,
};
use tower_lsp::lsp_types::*;

/// Extract the shape at an LSP position.
pub fn extraction_at(doc: &CssDocument, pos: Position, config: &ViewerConfig) -> Option<Extraction> {
    let source = WithSelection::cursor(doc, to_core(doc, pos));
    extract_shape(&source, config)
}

/// Compute hover information at the given position.
///
/// Hovering anywhere inside a `shape-inside` / `shape-outside` declaration
/// with a valid shape function shows a summary, the declaration, and the
/// SVG preview. Anything else produces no hover.
pub fn compute_hover(doc: &CssDocument, pos: Position, config: &ViewerConfig) -> Option<Hover> {
    let extraction = extraction_at(doc, pos, config)?;
    let shape = &extraction.shape;
    let size = shape.viewport;

    let markdown = format!(
        "**{}**: {} in a {size}×{size} viewport\n\n`{}`\n\n```svg\n{}\n```",
        shape.kind(),
        shape.summary(),
        extraction.declaration.split_whitespace().collect::<Vec<_>>().join(" "),
        render_svg(shape),
    );

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: markdown,
        }),
        range: Some(to_lsp_range(doc, &extraction.span)),
    })
}

// LSP columns count UTF-16 code units; core columns count chars.

pub fn to_core(doc: &CssDocument, pos: Position) -> shapeview_core::Position {
    let line = pos.line as usize;
    let ch = utf16_to_char(&doc.line_text(line), pos.character as usize);
    shapeview_core::Position::new(line, ch)
}

fn to_lsp(doc: &CssDocument, pos: shapeview_core::Position) -> Position {
    let character = char_to_utf16(&doc.line_text(pos.line), pos.ch);
    Position::new(pos.line as u32, character as u32)
}

pub fn to_lsp_range(doc: &CssDocument, span: &DeclarationSpan) -> Range {
    Range {
        start: to_lsp(doc, span.start),
        end: to_lsp(doc, span.end),
    }
}

/// A column inside a surrogate pair rounds up to the next char.
fn utf16_to_char(line: &str, col: usize) -> usize {
    let mut units = 0;
    for (i, c) in line.chars().enumerate() {
        if units >= col {
            return i;
        }
        units += c.len_utf16();
    }
    line.chars().count()
}

/// Columns past the end of the line keep counting one unit per column.
fn char_to_utf16(line: &str, ch: usize) -> usize {
    let len = line.chars().count();
    let prefix: usize = line.chars().take(ch).map(char::len_utf16).sum();
    prefix + ch.saturating_sub(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSS: &str = ".box {\n  shape-outside: circle(nonzero, nonzero, 50px);\n  color: red;\n}";

    fn markdown(hover: Hover) -> String {
        match hover.contents {
            HoverContents::Markup(m) => m.value,
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn hover_on_shape_value() {
        let doc = CssDocument::new(CSS);
        let hover = compute_hover(&doc, Position::new(1, 26), &ViewerConfig::default()).unwrap();
        assert_eq!(
            hover.range,
            Some(Range {
                start: Position::new(1, 2),
                end: Position::new(1, 48),
            })
        );
        let md = markdown(hover);
        assert!(md.starts_with("**circle**: circle r=100 in a 200×200 viewport"));
        assert!(md.contains("`shape-outside: circle(nonzero, nonzero, 50px);`"));
        assert!(md.contains("<circle cx=\"100\" cy=\"100\" r=\"100\""));
    }

    #[test]
    fn hover_on_other_property_returns_none() {
        let doc = CssDocument::new(CSS);
        assert!(compute_hover(&doc, Position::new(2, 5), &ViewerConfig::default()).is_none());
    }

    #[test]
    fn columns_count_utf16_units() {
        // "🎨" is one char but two UTF-16 units.
        let css = ".box {\n  /* 🎨 */ shape-outside: circle(0, 0, 50px);\n}";
        let doc = CssDocument::new(css);
        let hover = compute_hover(&doc, Position::new(1, 30), &ViewerConfig::default()).unwrap();
        assert_eq!(
            hover.range,
            Some(Range {
                start: Position::new(1, 11),
                end: Position::new(1, 45),
            })
        );
        assert_eq!(to_core(&doc, Position::new(1, 11)), shapeview_core::Position::new(1, 10));
    }

    #[test]
    fn utf16_conversions() {
        assert_eq!(utf16_to_char("a🎨b", 0), 0);
        assert_eq!(utf16_to_char("a🎨b", 3), 2);
        assert_eq!(utf16_to_char("a🎨b", 2), 2);
        assert_eq!(utf16_to_char("a🎨b", 9), 3);
        assert_eq!(char_to_utf16("a🎨b", 2), 3);
        assert_eq!(char_to_utf16("a🎨b", 3), 4);
    }

    #[test]
    fn hover_on_selector_returns_none() {
        let doc = CssDocument::new(CSS);
        assert!(compute_hover(&doc, Position::new(0, 2), &ViewerConfig::default()).is_none());
    }
}
