//! Shapeview core: find the CSS exclusion shape under a cursor and fit it
//! into a square preview viewport.
//!
//! The pipeline runs against any [`TokenSource`]: [`locate`] finds the
//! declaration, [`extract_tokens`] turns its tokens into a
//! [`ShapeDescriptor`], and [`render_svg`] draws it. [`CssDocument`] is the
//! bundled source for plain CSS text.

pub mod config;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod locate;
pub mod model;
pub mod params;
pub mod position;
pub mod scale;
pub mod shapes;
pub mod svg;
pub mod token;
pub mod units;

pub use config::{ConfigError, ViewerConfig};
pub use error::ShapeError;
pub use extract::{Extraction, extract_shape, extract_tokens, try_extract};
pub use lexer::CssDocument;
pub use locate::{collect_tokens, declaration_text, locate};
pub use model::*;
pub use position::{DeclarationSpan, Position, Selection};
pub use scale::{MinMax, ShapeScaler};
pub use svg::render_svg;
pub use token::{Token, TokenClass, TokenSource, WithSelection};
pub use units::{Length, Unit, to_pixels};
