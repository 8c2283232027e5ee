//! Viewer configuration shared by the extractor and its hosts.

use crate::model::{Color, Presentation};
use serde::Deserialize;
use thiserror::Error;

/// A configuration value no shape can be drawn with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("viewportSize must be a positive finite number, got {0}")]
    ViewportSize(f64),

    #[error("strokeWidth must be a non-negative finite number, got {0}")]
    StrokeWidth(f64),
}

/// Configuration for shape extraction.
///
/// Every field has a default, so hosts can deserialize a partial JSON
/// object (e.g. LSP `initializationOptions`) and get the rest filled in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Side of the square viewport shapes are fitted into. Default: **200**.
    pub viewport_size: f64,

    /// Outline color. Default: **#000000**.
    pub stroke: Color,

    /// Outline width in viewport units. Default: **1**.
    pub stroke_width: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_size: 200.0,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Check the values a host may have supplied. Geometry is scaled into
    /// `[0, viewport_size]`, so the viewport must be a real, positive size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_size.is_finite() && self.viewport_size > 0.0) {
            return Err(ConfigError::ViewportSize(self.viewport_size));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ConfigError::StrokeWidth(self.stroke_width));
        }
        Ok(())
    }

    /// Visible outline, no fill.
    pub fn presentation(&self) -> Presentation {
        Presentation {
            stroke: self.stroke,
            stroke_width: self.stroke_width,
            fill: None,
        }
    }
}
