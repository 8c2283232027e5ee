//! Absolute CSS lengths and their conversion to the common pixel scale.
//!
//! Only the closed set `px cm mm in pt pc` is recognized. Relative and
//! percentage units are rejected like any other unknown suffix.

use crate::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// A recognized absolute length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
}

impl Unit {
    pub const ALL: [Unit; 6] = [Unit::Px, Unit::Cm, Unit::Mm, Unit::In, Unit::Pt, Unit::Pc];

    pub const fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
        }
    }

    /// Multiplier applied to a magnitude in this unit.
    ///
    /// These are the factors the shape viewer has always shipped with.
    /// `cm` and `mm` multiply by the px→cm and px→mm ratios, the inverse
    /// direction of the other units; see DESIGN.md before changing them.
    pub const fn px_factor(self) -> f64 {
        match self {
            Unit::Px => 1.0,
            Unit::Cm => 0.026458,
            Unit::Mm => 0.264583,
            Unit::In => 1.0 / 96.0,
            Unit::Pt => 0.75,
            Unit::Pc => 9.0,
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.suffix() == suffix)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A magnitude paired with a recognized unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Parse `[ws] [+-]magnitude unit [ws]`. No space is allowed between
    /// the number and its unit.
    pub fn parse(text: &str) -> Option<Self> {
        length.parse(text).ok()
    }

    pub fn to_px(self) -> f64 {
        self.value * self.unit.px_factor()
    }
}

impl FromStr for Length {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ShapeError::invalid(format!("invalid length `{}`", s.trim())))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Convert a length token to pixels. `None` for unparseable text or an
/// unrecognized unit.
pub fn to_pixels(token: &str) -> Option<f64> {
    Length::parse(token).map(Length::to_px)
}

/// Like `to_pixels`, but the result must be non-negative.
pub(crate) fn non_negative_px(token: &str, what: &str) -> Result<f64, ShapeError> {
    let px = token.parse::<Length>()?.to_px();
    if px < 0.0 {
        return Err(ShapeError::invalid(format!("{what} must not be negative, got `{}`", token.trim())));
    }
    Ok(px)
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn length(input: &mut &str) -> ModalResult<Length> {
    delimited(multispace0, (magnitude, unit), multispace0)
        .map(|(value, unit)| Length::new(value, unit))
        .parse_next(input)
}

fn magnitude(input: &mut &str) -> ModalResult<f64> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit1))).void(), ('.', digit1).void())),
    )
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

fn unit(input: &mut &str) -> ModalResult<Unit> {
    take_while(1.., |c: char| c.is_ascii_alphabetic())
        .verify_map(Unit::from_suffix)
        .parse_next(input)
}
