//! Tokenizer for `element()` scheme data.
//!
//! ```text
//! ElementSchemeData := (NCName ChildSequence?) | ChildSequence
//! ChildSequence     := ('/' [1-9] [0-9]*)+
//! ```
//!
//! Each step is accumulated as an unsigned integer. A step whose value is
//! zero is rejected, so `/0` and a bare trailing `/` both fail.

use crate::chars::{classify, scan_ncname, CharClass};
use crate::error::{ErrorCode, Result, XPointerError};

/// A token of `element()` scheme data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementToken<'a> {
    /// Leading shorthand name the child sequence is relative to
    Name(&'a str),
    /// One 1-based child position
    ChildStep(u32),
}

/// Tokenize `element()` scheme data.
pub fn tokenize(data: &str) -> Result<Vec<ElementToken<'_>>> {
    let error = |code| XPointerError::new(code, data);

    if data.is_empty() {
        return Err(error(ErrorCode::EmptyElementSchemeData));
    }

    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = data[pos..].chars().next() {
        match classify(ch) {
            CharClass::Slash => {
                pos += 1;
                let mut step: u32 = 0;
                while let Some(&digit @ b'0'..=b'9') = bytes.get(pos) {
                    step = step
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(digit - b'0')))
                        .ok_or_else(|| error(ErrorCode::InvalidChildSequenceCharacter))?;
                    pos += 1;
                }
                if step == 0 {
                    return Err(error(ErrorCode::InvalidChildSequenceCharacter));
                }
                tokens.push(ElementToken::ChildStep(step));
            }
            _ if tokens.is_empty() => {
                let len = scan_ncname(&data[pos..]);
                if len == 0 {
                    return Err(error(ErrorCode::InvalidNCNameInElementSchemeData));
                }
                tokens.push(ElementToken::Name(&data[pos..pos + len]));
                pos += len;
            }
            _ => return Err(error(ErrorCode::InvalidElementSchemeToken)),
        }
    }

    Ok(tokens)
}
