//! Canonical text form of tag values, and parsing text back into tags.
//!
//! The pair obeys `parse_tag(k, format_tag(v)) == v` for every scalar `v`
//! of kind `k` whose value is expressible at six decimal places (all
//! integers and strings; floats lose digits below 1e-6). Arrays format as
//! a `Kind[len]` summary only; they are not edited through text coercion.

use std::num::IntErrorKind;

use crate::error::ParseError;
use crate::tag::{Compound, NbtList, Tag, TagKind};

/// Canonical text per kind: integers plain decimal, floats with fixed six
/// decimal places, strings wrapped in double quotes (embedded quotes are
/// not escaped; a documented limitation), arrays as `Kind[len]` summaries.
/// `None` for lists and compounds, which have no scalar text.
pub fn format_tag(tag: &Tag) -> Option<String> {
    let s = match tag {
        Tag::Byte(v) => v.to_string(),
        Tag::Short(v) => v.to_string(),
        Tag::Int(v) => v.to_string(),
        Tag::Long(v) => v.to_string(),
        Tag::Float(v) => format!("{v:.6}"),
        Tag::Double(v) => format!("{v:.6}"),
        Tag::String(s) => format!("\"{s}\""),
        Tag::ByteArray(v) => format!("ByteArray[{}]", v.len()),
        Tag::IntArray(v) => format!("IntArray[{}]", v.len()),
        Tag::LongArray(v) => format!("LongArray[{}]", v.len()),
        Tag::List(_) | Tag::Compound(_) => return None,
    };
    Some(s)
}

/// Parse human-entered text into a tag of the requested kind.
///
/// Numeric kinds range-check against the kind's bit width before a tag is
/// constructed; nothing truncates or wraps. String input is accepted with
/// or without surrounding double quotes. `List` and `Compound` ignore the
/// text and start empty (containers are populated through the engine);
/// array kinds accept only empty text, producing an empty array.
pub fn parse_tag(kind: TagKind, text: &str) -> Result<Tag, ParseError> {
    let text = text.trim();
    let tag = match kind {
        TagKind::Byte => Tag::Byte(parse_int(kind, text, i8::MIN as i128, i8::MAX as i128)? as i8),
        TagKind::Short => {
            Tag::Short(parse_int(kind, text, i16::MIN as i128, i16::MAX as i128)? as i16)
        }
        TagKind::Int => Tag::Int(parse_int(kind, text, i32::MIN as i128, i32::MAX as i128)? as i32),
        TagKind::Long => {
            Tag::Long(parse_int(kind, text, i64::MIN as i128, i64::MAX as i128)? as i64)
        }
        TagKind::Float => {
            let v = parse_float(kind, text)?;
            if v.abs() > f32::MAX as f64 {
                return Err(ParseError::OutOfRange {
                    kind,
                    text: text.to_string(),
                });
            }
            Tag::Float(v as f32)
        }
        TagKind::Double => Tag::Double(parse_float(kind, text)?),
        TagKind::String => Tag::String(strip_quotes(text).to_string()),
        TagKind::Compound => Tag::Compound(Compound::new()),
        TagKind::List => Tag::List(NbtList::new()),
        TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray => {
            if !text.is_empty() {
                return Err(ParseError::InvalidNumber {
                    kind,
                    text: text.to_string(),
                });
            }
            match kind {
                TagKind::ByteArray => Tag::ByteArray(Vec::new()),
                TagKind::IntArray => Tag::IntArray(Vec::new()),
                _ => Tag::LongArray(Vec::new()),
            }
        }
        TagKind::End => {
            return Err(ParseError::InvalidNumber {
                kind,
                text: text.to_string(),
            });
        }
    };
    Ok(tag)
}

fn parse_int(kind: TagKind, text: &str, min: i128, max: i128) -> Result<i128, ParseError> {
    let v: i128 = text.parse().map_err(|e: std::num::ParseIntError| {
        if matches!(
            e.kind(),
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
        ) {
            ParseError::OutOfRange {
                kind,
                text: text.to_string(),
            }
        } else {
            ParseError::InvalidNumber {
                kind,
                text: text.to_string(),
            }
        }
    })?;
    if v < min || v > max {
        return Err(ParseError::OutOfRange {
            kind,
            text: text.to_string(),
        });
    }
    Ok(v)
}

fn parse_float(kind: TagKind, text: &str) -> Result<f64, ParseError> {
    let v: f64 = text.parse().map_err(|_| ParseError::InvalidNumber {
        kind,
        text: text.to_string(),
    })?;
    if v.is_nan() {
        return Err(ParseError::InvalidNumber {
            kind,
            text: text.to_string(),
        });
    }
    // a parse that overflows to infinity is a range failure, not garbage
    if v.is_infinite() {
        return Err(ParseError::OutOfRange {
            kind,
            text: text.to_string(),
        });
    }
    Ok(v)
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
