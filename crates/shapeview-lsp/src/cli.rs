//! `shapeview-lsp --svg|--json LINE:COL`: extract the shape under LINE:COL
//! from CSS read on stdin and print it.

use shapeview_core::{CssDocument, Position, ShapeError, ViewerConfig, render_svg, try_extract};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--svg" => Some(Self::Svg),
            "--json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::Svg => "--svg",
            Self::Json => "--json",
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("expected LINE:COL, got `{0}`")]
    BadCursor(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Usage errors exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::BadCursor(_) => 2,
            CliError::Shape(_) | CliError::Json(_) => 1,
        }
    }
}

/// Parse a `LINE:COL` argument (both zero-based, COL in chars).
pub fn parse_cursor(arg: &str) -> Option<Position> {
    let (line, col) = arg.split_once(':')?;
    Some(Position::new(line.trim().parse().ok()?, col.trim().parse().ok()?))
}

/// Render the shape under `cursor_arg` in `text`.
pub fn run(format: OutputFormat, cursor_arg: &str, text: &str) -> Result<String, CliError> {
    let cursor = parse_cursor(cursor_arg).ok_or_else(|| CliError::BadCursor(cursor_arg.to_string()))?;
    let mut doc = CssDocument::new(text);
    doc.set_cursor(cursor);

    let shape = try_extract(&doc, &ViewerConfig::default())?.shape;
    match format {
        OutputFormat::Svg => Ok(render_svg(&shape)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&shape)?),
    }
}
