use crate::error::FormatError;
use crate::node::{Mapping, ParseNode};
use crate::token::{Token, TokenKind, normalize, tokenize};

/// An object that has been opened but not yet closed.
struct Frame {
    key: String,
    map: Mapping,
}

/// Decode KeyValues text into a tree rooted at a [`ParseNode::Map`].
///
/// # Errors
///
/// Returns [`FormatError`] if the input has no tokens after normalization,
/// a `{` has no preceding key, or a `}` closes more objects than were opened.
/// No partial tree is returned on error.
pub fn decode(text: &str) -> Result<ParseNode, FormatError> {
    let tokens = tokenize(&normalize(text));
    if tokens.is_empty() {
        return Err(FormatError::Empty);
    }
    build(tokens)
}

/// Build a tree from an already tokenized stream.
///
/// Objects still open at the end of input are closed implicitly, and a key
/// with no value is dropped.
pub fn build(tokens: impl IntoIterator<Item = Token>) -> Result<ParseNode, FormatError> {
    let mut root = Mapping::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut pending: Option<String> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Str(content) => match pending.take() {
                None => pending = Some(content),
                Some(key) => {
                    let top = stack.last_mut().map_or(&mut root, |f| &mut f.map);
                    top.insert(key, coerce(content));
                }
            },
            TokenKind::Open => {
                let key = pending
                    .take()
                    .ok_or(FormatError::OpenWithoutKey { line: token.line })?;
                stack.push(Frame {
                    key,
                    map: Mapping::new(),
                });
            }
            TokenKind::Close => {
                let frame = stack
                    .pop()
                    .ok_or(FormatError::UnexpectedClose { line: token.line })?;
                let top = stack.last_mut().map_or(&mut root, |f| &mut f.map);
                top.insert(frame.key, ParseNode::Map(frame.map));
            }
        }
    }

    if let Some(key) = pending {
        log::debug!("Dropping key '{key}' with no value at end of input");
    }
    if !stack.is_empty() {
        log::debug!("{} object(s) left open at end of input", stack.len());
    }
    while let Some(frame) = stack.pop() {
        let top = stack.last_mut().map_or(&mut root, |f| &mut f.map);
        top.insert(frame.key, ParseNode::Map(frame.map));
    }

    Ok(ParseNode::Map(root))
}

/// Convert a value token to its primitive type.
///
/// Only the exact literals `true`, `false`, `null` and `undefined` are
/// special; `"0"` or `"yes"` are not booleans.
fn coerce(raw: String) -> ParseNode {
    match raw.as_str() {
        "true" => ParseNode::Bool(true),
        "false" => ParseNode::Bool(false),
        "null" => ParseNode::Null,
        "undefined" => ParseNode::Absent,
        s if is_numeral(s) => match s.parse::<f64>() {
            Ok(n) => ParseNode::Number(n),
            Err(_) => ParseNode::String(raw),
        },
        _ => ParseNode::String(raw),
    }
}

/// Matches `\d*\.?\d+`: unsigned, optional integer part, no trailing dot.
fn is_numeral(s: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('.') {
        Some((int, frac)) => all_digits(int) && !frac.is_empty() && all_digits(frac),
        None => !s.is_empty() && all_digits(s),
    }
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
