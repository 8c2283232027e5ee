//! Server state behind the LSP transport: cached documents, open previews
//! and the viewer configuration.

use crate::hover;
use crate::session::{Toggle, ViewerSession};
use serde::Serialize;
use serde_json::Value;
use shapeview_core::{CssDocument, ViewerConfig, render_svg};
use std::collections::HashMap;
use tower_lsp::lsp_types::{Hover, Position, Url};

/// Reply to `shapeview.toggle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleResponse {
    pub visible: bool,
    pub svg: Option<String>,
}

#[derive(Debug, Default)]
pub struct ServerState {
    documents: HashMap<Url, CssDocument>,
    session: ViewerSession<Url>,
    config: ViewerConfig,
}

impl ServerState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            documents: HashMap::new(),
            session: ViewerSession::new(),
            config,
        }
    }

    pub fn set_config(&mut self, config: ViewerConfig) {
        self.config = config;
    }

    /// Cache the new text. Previews opened against the old text are stale
    /// and get dropped; returns how many.
    pub fn update_document(&mut self, uri: Url, text: &str) -> usize {
        let closed = self.session.close_document(&uri);
        if closed > 0 {
            log::debug!("closed {closed} stale preview(s) for {uri}");
        }
        self.documents.insert(uri, CssDocument::new(text));
        closed
    }

    pub fn close_document(&mut self, uri: &Url) {
        self.session.close_document(uri);
        self.documents.remove(uri);
    }

    pub fn hover(&self, uri: &Url, pos: Position) -> Option<Hover> {
        let doc = self.documents.get(uri)?;
        hover::compute_hover(doc, pos, &self.config)
    }

    /// Open or close the preview on `pos.line`.
    pub fn toggle(&mut self, uri: &Url, pos: Position) -> ToggleResponse {
        let shape = self
            .documents
            .get(uri)
            .and_then(|doc| hover::extraction_at(doc, pos, &self.config))
            .map(|e| e.shape);

        let response = match self.session.toggle(uri, pos.line, shape) {
            Toggle::Shown(shape) => ToggleResponse {
                visible: true,
                svg: Some(render_svg(shape)),
            },
            Toggle::Hidden | Toggle::Nothing => ToggleResponse {
                visible: false,
                svg: None,
            },
        };
        log::debug!(
            "toggle {uri}:{} -> visible={}, {} preview(s) open",
            pos.line,
            response.visible,
            self.session.open_count()
        );
        response
    }
}

/// Read `ViewerConfig` from `initializationOptions`.
///
/// Anything that does not deserialize or validate falls back to the
/// defaults with a warning.
pub fn config_from_options(options: Option<Value>) -> ViewerConfig {
    let value = match options {
        None | Some(Value::Null) => return ViewerConfig::default(),
        Some(value) => value,
    };
    let config: ViewerConfig = match serde_json::from_value(value) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring invalid initializationOptions: {e}");
            return ViewerConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("ignoring invalid initializationOptions: {e}");
            ViewerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const CSS: &str = ".box {\n  shape-outside: circle(nonzero, nonzero, 50px);\n  color: red;\n}";

    fn uri() -> Url {
        Url::parse("file:///box.css").unwrap()
    }

    fn open_state() -> ServerState {
        let mut state = ServerState::new(ViewerConfig::default());
        state.update_document(uri(), CSS);
        state
    }

    // ─── Toggle ──────────────────────────────────────────────────────────

    #[test]
    fn toggle_shows_then_hides() {
        let mut state = open_state();
        let shown = state.toggle(&uri(), Position::new(1, 26));
        assert!(shown.visible);
        let svg = shown.svg.unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("<circle cx=\"100\" cy=\"100\" r=\"100\""));

        let hidden = state.toggle(&uri(), Position::new(1, 26));
        assert_eq!(
            hidden,
            ToggleResponse {
                visible: false,
                svg: None
            }
        );
    }

    #[test]
    fn toggle_response_json_shape() {
        let mut state = open_state();
        let hidden = state.toggle(&uri(), Position::new(2, 5));
        assert_eq!(
            serde_json::to_value(&hidden).unwrap(),
            json!({ "visible": false, "svg": null })
        );
    }

    #[test]
    fn toggle_on_unknown_document_shows_nothing() {
        let mut state = ServerState::default();
        assert!(!state.toggle(&uri(), Position::new(1, 26)).visible);
    }

    // ─── Document lifecycle ──────────────────────────────────────────────

    #[test]
    fn change_drops_open_previews() {
        let mut state = open_state();
        assert!(state.toggle(&uri(), Position::new(1, 26)).visible);
        assert_eq!(state.update_document(uri(), CSS), 1);
        // The preview is gone, so the next toggle opens a fresh one.
        assert!(state.toggle(&uri(), Position::new(1, 26)).visible);
    }

    #[test]
    fn close_drops_document_and_previews() {
        let mut state = open_state();
        assert!(state.toggle(&uri(), Position::new(1, 26)).visible);
        state.close_document(&uri());
        assert!(state.hover(&uri(), Position::new(1, 26)).is_none());
        assert!(!state.toggle(&uri(), Position::new(1, 26)).visible);
        assert_eq!(state.update_document(uri(), CSS), 0);
    }

    #[test]
    fn hover_uses_cached_text() {
        let state = open_state();
        assert!(state.hover(&uri(), Position::new(1, 26)).is_some());
        assert!(state.hover(&uri(), Position::new(2, 5)).is_none());
    }

    #[test]
    fn viewport_size_from_config() {
        let mut state = ServerState::new(ViewerConfig {
            viewport_size: 100.0,
            ..ViewerConfig::default()
        });
        state.update_document(uri(), CSS);
        let svg = state.toggle(&uri(), Position::new(1, 26)).svg.unwrap();
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
        assert!(svg.contains("r=\"50\""));
    }

    // ─── Configuration ───────────────────────────────────────────────────

    #[test]
    fn options_fall_back_to_defaults() {
        assert_eq!(config_from_options(None), ViewerConfig::default());
        assert_eq!(
            config_from_options(Some(json!({ "viewportSize": "big" }))),
            ViewerConfig::default()
        );
        let config = config_from_options(Some(json!({ "strokeWidth": 2 })));
        assert_eq!(config.stroke_width, 2.0);
        assert_eq!(config.viewport_size, 200.0);
    }

    #[test]
    fn out_of_range_options_fall_back_to_defaults() {
        for options in [
            json!({ "viewportSize": 0 }),
            json!({ "viewportSize": -200 }),
            json!({ "strokeWidth": -1 }),
        ] {
            assert_eq!(config_from_options(Some(options)), ViewerConfig::default());
        }
        let config = config_from_options(Some(json!({ "viewportSize": 120 })));
        assert_eq!(config.viewport_size, 120.0);
    }
}
