//! Decoder for MatNet messages.
//!
//! A MatNet message arrives either as a JSON text frame or as a binary frame:
//! - 4 reserved bytes
//! - A 4-byte little-endian header length
//! - Header text: the message id and the field names
//! - One typed, possibly multi-dimensional numeric value per field
//!
//! Decoding is pure: no I/O, no shared state, and no partial results.

pub mod codec;
pub mod element;
pub mod error;
pub mod header;
pub mod ids;
pub mod value;

#[cfg(test)]
mod testutil;

pub use codec::{
    decode, decode_binary, decode_text, Decoder, DecoderConfig, Input, DEFAULT_MAX_DIMS,
    DEFAULT_MAX_FIELD_BYTES, DEFAULT_MAX_FRAME_SIZE, PREFIX_SIZE,
};
pub use element::{ElementType, ELEMENT_TYPES};
pub use error::{DecodeError, Result};
pub use header::{parse_header, FrameHeader, RECORD_SEPARATOR, UNIT_SEPARATOR};
pub use ids::is_known_id;
pub use value::{Array, ArrayData, Message, Payload, Scalar, Value};
