//! Parameter normalizer: `(a, b, c)` token run → positional argument list.

use crate::error::ShapeError;
use crate::token::Token;
use smallvec::SmallVec;

/// Trimmed, comma-separated shape function arguments in source order.
/// Rectangles have at most six, so the common case never allocates.
pub type ParamList = SmallVec<[String; 6]>;

/// Flatten `tokens` and split the parenthesized payload on commas.
///
/// Commas nested inside inner parentheses are not special.
pub fn normalize(tokens: &[Token]) -> Result<ParamList, ShapeError> {
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let payload =
        call_payload(&text).ok_or_else(|| ShapeError::MalformedInput(text.trim().to_string()))?;
    Ok(split_params(payload))
}

/// The text between a leading `(` and the last `)`.
fn call_payload(text: &str) -> Option<&str> {
    let rest = text.trim_start().strip_prefix('(')?;
    let close = rest.rfind(')')?;
    Some(&rest[..close])
}

pub fn split_params(payload: &str) -> ParamList {
    if payload.trim().is_empty() {
        return ParamList::new();
    }
    payload.split(',').map(|p| p.trim().to_string()).collect()
}
