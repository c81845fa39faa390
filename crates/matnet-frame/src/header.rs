//! Binary frame header text.
//!
//! ```text
//! <id> 0x1E <name1> 0x1F <name2> 0x1F ... <nameN>
//! ```
//!
//! Exactly one record separator splits the message id from the field list.
//! The list is always split on the unit separator, so an empty list declares
//! one field named `""` and empty names between separators are kept.

use crate::error::{DecodeError, Result};

/// ASCII record separator, between the id and the field list.
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// ASCII unit separator, between field names.
pub const UNIT_SEPARATOR: char = '\u{1f}';

/// Parsed header of a binary frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Message id.
    pub id: String,
    /// Field names in declared order.
    pub fields: Vec<String>,
}

/// Parse raw header bytes, rejecting invalid UTF-8.
pub fn parse_header_bytes(bytes: &[u8]) -> Result<FrameHeader> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| DecodeError::malformed_header(format!("header is not UTF-8: {err}")))?;
    parse_header(text)
}

/// Parse header text into an id and the declared field names.
pub fn parse_header(text: &str) -> Result<FrameHeader> {
    let (id, list) = split_record(text)?;
    let fields = split_fields(list)?;
    Ok(FrameHeader {
        id: id.to_string(),
        fields,
    })
}

fn split_record(text: &str) -> Result<(&str, &str)> {
    let mut parts = text.split(RECORD_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(list), None) => Ok((id, list)),
        _ => Err(DecodeError::malformed_header(format!(
            "expected exactly one record separator, found {}",
            text.matches(RECORD_SEPARATOR).count()
        ))),
    }
}

fn split_fields(list: &str) -> Result<Vec<String>> {
    let mut fields: Vec<String> = Vec::new();
    for name in list.split(UNIT_SEPARATOR) {
        if fields.iter().any(|existing| existing == name) {
            return Err(DecodeError::malformed_header(format!(
                "duplicate field name {name:?}"
            )));
        }
        fields.push(name.to_string());
    }
    Ok(fields)
}
