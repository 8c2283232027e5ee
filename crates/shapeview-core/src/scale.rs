//! Range tracking and the uniform viewport transform derived from it.
//!
//! Every coordinate and extent a shape parser sees is fed to one `MinMax`.
//! Both axes share it, so the resulting `ShapeScaler` preserves aspect ratio.

use crate::error::ShapeError;

/// Running minimum and maximum of the values fed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMax {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MinMax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, x: f64) {
        self.min = Some(self.min.map_or(x, |m| m.min(x)));
        self.max = Some(self.max.map_or(x, |m| m.max(x)));
    }

    /// An absent value leaves the range untouched.
    pub fn add_opt(&mut self, x: Option<f64>) {
        if let Some(x) = x {
            self.add_value(x);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// `max - min`, once both bounds are known.
    pub fn extent(&self) -> Option<f64> {
        Some(self.max? - self.min?)
    }
}

impl FromIterator<f64> for MinMax {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut range = Self::new();
        for x in iter {
            range.add_value(x);
        }
        range
    }
}

/// Translate-then-scale transform fitting a range into `[0, size]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeScaler {
    min: f64,
    scale: f64,
}

impl ShapeScaler {
    /// Fails when the range is empty or degenerate (`max <= min`), which
    /// would give an infinite scale.
    pub fn new(range: &MinMax, size: f64) -> Result<Self, ShapeError> {
        let (Some(min), Some(extent)) = (range.min, range.extent()) else {
            return Err(ShapeError::invalid("no geometry to scale"));
        };
        if extent <= 0.0 || !extent.is_finite() {
            return Err(ShapeError::invalid("shape has zero size"));
        }
        Ok(Self {
            min,
            scale: size / extent,
        })
    }

    /// Map a coordinate into viewport space.
    pub fn scale(&self, x: f64) -> f64 {
        (x - self.min) * self.scale
    }

    /// Map a pure extent (width, radius). No translation.
    pub fn scale_length(&self, len: f64) -> f64 {
        len * self.scale
    }
}
