//! Shape descriptors handed to the rendering side.
//!
//! A descriptor is built once per extraction and never mutated. Geometry is
//! already in viewport units; the renderer only has to draw it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0);

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = [self.r, self.g, self.b, self.a].map(|c| (c * 255.0).round() as u8);
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The four shape functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Ellipse,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
    ];

    /// CSS function name.
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
        }
    }

    /// Exact, case-sensitive lookup by function name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// SVG element that draws this shape.
    pub const fn svg_element(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    #[serde(rename = "nonzero")]
    NonZero,
    #[serde(rename = "evenodd")]
    EvenOdd,
}

impl FillRule {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "nonzero" => Some(FillRule::NonZero),
            "evenodd" => Some(FillRule::EvenOdd),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Kind-specific geometry in viewport units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: Option<f64>,
        ry: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Polygon {
        points: Vec<Point>,
        fill_rule: Option<FillRule>,
    },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
            ShapeGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeGeometry::Polygon { .. } => ShapeKind::Polygon,
        }
    }
}

/// Outline-only styling applied to every extracted shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Presentation {
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
}

/// A finished, viewport-fitted shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    pub geometry: ShapeGeometry,
    pub presentation: Presentation,
    /// Side of the square viewport the geometry was scaled into.
    pub viewport: f64,
}

impl ShapeDescriptor {
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// SVG attributes for the shape element, geometry first, then styling.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        match &self.geometry {
            ShapeGeometry::Rectangle {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                attrs.push(("x", fmt_num(*x)));
                attrs.push(("y", fmt_num(*y)));
                attrs.push(("width", fmt_num(*width)));
                attrs.push(("height", fmt_num(*height)));
                if let Some(rx) = rx {
                    attrs.push(("rx", fmt_num(*rx)));
                }
                if let Some(ry) = ry {
                    attrs.push(("ry", fmt_num(*ry)));
                }
            }
            ShapeGeometry::Circle { cx, cy, r } => {
                attrs.push(("cx", fmt_num(*cx)));
                attrs.push(("cy", fmt_num(*cy)));
                attrs.push(("r", fmt_num(*r)));
            }
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => {
                attrs.push(("cx", fmt_num(*cx)));
                attrs.push(("cy", fmt_num(*cy)));
                attrs.push(("rx", fmt_num(*rx)));
                attrs.push(("ry", fmt_num(*ry)));
            }
            ShapeGeometry::Polygon { points, fill_rule } => {
                let points = points
                    .iter()
                    .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                attrs.push(("points", points));
                if let Some(rule) = fill_rule {
                    attrs.push(("fill-rule", rule.keyword().to_string()));
                }
            }
        }
        attrs.push(("stroke", self.presentation.stroke.to_hex()));
        attrs.push(("stroke-width", fmt_num(self.presentation.stroke_width)));
        attrs.push((
            "fill",
            self.presentation
                .fill
                .map_or_else(|| "none".to_string(), |c| c.to_hex()),
        ));
        attrs
    }

    /// One-line human summary, e.g. `circle r=100`.
    pub fn summary(&self) -> String {
        match &self.geometry {
            ShapeGeometry::Rectangle { width, height, .. } => {
                format!("rectangle {}×{}", fmt_num(*width), fmt_num(*height))
            }
            ShapeGeometry::Circle { r, .. } => format!("circle r={}", fmt_num(*r)),
            ShapeGeometry::Ellipse { rx, ry, .. } => {
                format!("ellipse rx={} ry={}", fmt_num(*rx), fmt_num(*ry))
            }
            ShapeGeometry::Polygon { points, fill_rule } => match fill_rule {
                Some(rule) => format!("polygon {} points ({})", points.len(), rule.keyword()),
                None => format!("polygon {} points", points.len()),
            },
        }
    }
}

/// Trim float noise: at most 3 decimals, no trailing zeros.
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
