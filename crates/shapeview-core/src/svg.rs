//! SVG output for shape descriptors.

use crate::model::{ShapeDescriptor, fmt_num};

/// Render a descriptor as a standalone square SVG document.
pub fn render_svg(shape: &ShapeDescriptor) -> String {
    let size = fmt_num(shape.viewport);
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n"
    ));
    svg.push_str("  ");
    svg.push_str(&render_element(shape));
    svg.push_str("\n</svg>");
    svg
}

/// The bare shape element, e.g. `<circle cx="100" ... />`.
pub fn render_element(shape: &ShapeDescriptor) -> String {
    let mut out = format!("<{}", shape.kind().svg_element());
    for (name, value) in shape.attributes() {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
    out.push_str(" />");
    out
}
