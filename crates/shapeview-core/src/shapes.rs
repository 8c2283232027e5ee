//! Per-shape parameter validation and geometry construction.
//!
//! Each parser checks arity, converts its lengths to pixels, feeds every
//! extent into one `MinMax` and scales the result into the viewport.
//! Positional arguments that only place the shape inside its container
//! (`x`, `y`, `cx`, `cy`) are not validated: the preview always draws at
//! the viewport origin or center.

use crate::error::ShapeError;
use crate::model::{FillRule, Point, ShapeGeometry, ShapeKind};
use crate::scale::{MinMax, ShapeScaler};
use crate::units::{non_negative_px, to_pixels};

/// Dispatch to the parser for `kind`.
pub fn parse_shape(
    kind: ShapeKind,
    params: &[String],
    viewport: f64,
) -> Result<ShapeGeometry, ShapeError> {
    match kind {
        ShapeKind::Rectangle => parse_rectangle(params, viewport),
        ShapeKind::Circle => parse_circle(params, viewport),
        ShapeKind::Ellipse => parse_ellipse(params, viewport),
        ShapeKind::Polygon => parse_polygon(params, viewport),
    }
}

fn check_arity(kind: ShapeKind, params: &[String], min: usize, max: usize) -> Result<(), ShapeError> {
    let n = params.len();
    if n < min || n > max {
        let expected = if min == max {
            min.to_string()
        } else if max == usize::MAX {
            format!("at least {min}")
        } else {
            format!("{min}-{max}")
        };
        return Err(ShapeError::invalid(format!(
            "{kind}() takes {expected} arguments, got {n}"
        )));
    }
    Ok(())
}

/// `rectangle(x, y, width, height[, rx[, ry]])`
pub fn parse_rectangle(params: &[String], viewport: f64) -> Result<ShapeGeometry, ShapeError> {
    check_arity(ShapeKind::Rectangle, params, 4, 6)?;
    let width = non_negative_px(&params[2], "width")?;
    let height = non_negative_px(&params[3], "height")?;
    let rx = params.get(4).map(|p| non_negative_px(p, "rx")).transpose()?;
    let ry = params.get(5).map(|p| non_negative_px(p, "ry")).transpose()?;

    // Absent radii are not part of the range.
    let mut range = MinMax::new();
    range.add_value(0.0);
    range.add_value(width);
    range.add_value(height);
    range.add_opt(rx.map(|r| 2.0 * r));
    range.add_opt(ry.map(|r| 2.0 * r));
    let scaler = ShapeScaler::new(&range, viewport)?;

    Ok(ShapeGeometry::Rectangle {
        x: 0.0,
        y: 0.0,
        width: scaler.scale_length(width),
        height: scaler.scale_length(height),
        rx: rx.map(|r| scaler.scale_length(r)),
        ry: ry.map(|r| scaler.scale_length(r)),
    })
}

/// `circle(cx, cy, r)`
pub fn parse_circle(params: &[String], viewport: f64) -> Result<ShapeGeometry, ShapeError> {
    check_arity(ShapeKind::Circle, params, 3, 3)?;
    let r = non_negative_px(&params[2], "radius")?;

    let range: MinMax = [0.0, 2.0 * r].into_iter().collect();
    let scaler = ShapeScaler::new(&range, viewport)?;

    Ok(ShapeGeometry::Circle {
        cx: viewport / 2.0,
        cy: viewport / 2.0,
        r: scaler.scale_length(r),
    })
}

/// `ellipse(cx, cy, rx, ry)`
pub fn parse_ellipse(params: &[String], viewport: f64) -> Result<ShapeGeometry, ShapeError> {
    check_arity(ShapeKind::Ellipse, params, 4, 4)?;
    let rx = non_negative_px(&params[2], "rx")?;
    let ry = non_negative_px(&params[3], "ry")?;

    let range: MinMax = [0.0, 2.0 * rx, 2.0 * ry].into_iter().collect();
    let scaler = ShapeScaler::new(&range, viewport)?;

    Ok(ShapeGeometry::Ellipse {
        cx: viewport / 2.0,
        cy: viewport / 2.0,
        rx: scaler.scale_length(rx),
        ry: scaler.scale_length(ry),
    })
}

/// `polygon([fill-rule,] x y, x y, ...)`
///
/// Every point is parsed before any is rejected, so the error names the
/// first bad point after all of them have been looked at.
pub fn parse_polygon(params: &[String], viewport: f64) -> Result<ShapeGeometry, ShapeError> {
    check_arity(ShapeKind::Polygon, params, 1, usize::MAX)?;

    let (fill_rule, coords) = match FillRule::from_keyword(&params[0]) {
        Some(rule) => (Some(rule), &params[1..]),
        None => (None, params),
    };

    let parsed: Vec<Option<Point>> = coords.iter().map(|p| parse_point(p)).collect();
    if let Some(bad) = parsed.iter().position(Option::is_none) {
        return Err(ShapeError::invalid(format!(
            "polygon point `{}` is not two lengths",
            coords[bad]
        )));
    }
    let points: Vec<Point> = parsed.into_iter().flatten().collect();

    let range: MinMax = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let scaler = ShapeScaler::new(&range, viewport)?;

    Ok(ShapeGeometry::Polygon {
        points: points
            .iter()
            .map(|p| Point {
                x: scaler.scale(p.x),
                y: scaler.scale(p.y),
            })
            .collect(),
        fill_rule,
    })
}

/// `"<length> <length>"` → point in pixels.
fn parse_point(text: &str) -> Option<Point> {
    let mut parts = text.split_whitespace();
    let (x, y) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Point {
        x: to_pixels(x)?,
        y: to_pixels(y)?,
    })
}
