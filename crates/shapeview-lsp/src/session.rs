//! Viewer session: which shape previews are open, per document line.
//!
//! Triggering the viewer twice on the same line closes it again. The
//! extraction core never sees this state.

use shapeview_core::ShapeDescriptor;
use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of a toggle request.
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle<'a> {
    /// A preview was opened for the line.
    Shown(&'a ShapeDescriptor),
    /// The preview already open on the line was closed.
    Hidden,
    /// Nothing open, and nothing to show.
    Nothing,
}

/// Open previews, keyed by document then by line.
#[derive(Debug)]
pub struct ViewerSession<K> {
    open: HashMap<K, HashMap<u32, ShapeDescriptor>>,
}

impl<K> Default for ViewerSession<K> {
    fn default() -> Self {
        Self {
            open: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> ViewerSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the preview on `line` if one is open; otherwise open `shape`
    /// there, if there is one.
    pub fn toggle(&mut self, doc: &K, line: u32, shape: Option<ShapeDescriptor>) -> Toggle<'_> {
        if let Some(lines) = self.open.get_mut(doc)
            && lines.remove(&line).is_some()
        {
            if lines.is_empty() {
                self.open.remove(doc);
            }
            return Toggle::Hidden;
        }

        match shape {
            Some(shape) => {
                let lines = self.open.entry(doc.clone()).or_default();
                lines.insert(line, shape);
                Toggle::Shown(&lines[&line])
            }
            None => Toggle::Nothing,
        }
    }

    /// Drop every preview for `doc`. Returns how many were open.
    pub fn close_document(&mut self, doc: &K) -> usize {
        self.open.remove(doc).map_or(0, |lines| lines.len())
    }

    pub fn open_count(&self) -> usize {
        self.open.values().map(HashMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeview_core::{ShapeGeometry, ViewerConfig};

    fn circle() -> ShapeDescriptor {
        ShapeDescriptor {
            geometry: ShapeGeometry::Circle {
                cx: 100.0,
                cy: 100.0,
                r: 100.0,
            },
            presentation: ViewerConfig::default().presentation(),
            viewport: 200.0,
        }
    }

    #[test]
    fn second_trigger_on_same_line_hides() {
        let mut session = ViewerSession::new();
        let doc = "file:///a.css".to_string();
        assert_eq!(session.toggle(&doc, 3, Some(circle())), Toggle::Shown(&circle()));
        assert_eq!(session.open_count(), 1);
        assert_eq!(session.toggle(&doc, 3, Some(circle())), Toggle::Hidden);
        assert_eq!(session.open_count(), 0);
    }

    #[test]
    fn lines_and_documents_are_independent() {
        let mut session = ViewerSession::new();
        let a = "file:///a.css".to_string();
        let b = "file:///b.css".to_string();
        session.toggle(&a, 1, Some(circle()));
        session.toggle(&a, 2, Some(circle()));
        session.toggle(&b, 1, Some(circle()));
        assert_eq!(session.open_count(), 3);
        assert_eq!(session.close_document(&a), 2);
        assert_eq!(session.open_count(), 1);
        assert_eq!(session.toggle(&b, 1, None), Toggle::Hidden);
    }

    #[test]
    fn nothing_to_show() {
        let mut session: ViewerSession<String> = ViewerSession::new();
        assert_eq!(session.toggle(&"x".to_string(), 0, None), Toggle::Nothing);
        assert_eq!(session.open_count(), 0);
    }

    #[test]
    fn open_viewer_hides_even_without_new_shape() {
        let mut session = ViewerSession::new();
        let doc = "file:///a.css".to_string();
        session.toggle(&doc, 5, Some(circle()));
        assert_eq!(session.toggle(&doc, 5, None), Toggle::Hidden);
    }
}
