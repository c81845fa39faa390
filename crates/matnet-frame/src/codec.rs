use bytes::Buf;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::element::ElementType;
use crate::error::{DecodeError, Result};
use crate::header::parse_header_bytes;
use crate::value::{element_count, Array, ArrayData, Message, Payload, Scalar, Value};

/// Prefix before the header text: reserved (4) + header length (4) = 8 bytes.
pub const PREFIX_SIZE: usize = 8;

/// Width of every integer in the frame layout.
const INT_SIZE: usize = 4;

/// Default maximum element data per field: 64 MiB.
pub const DEFAULT_MAX_FIELD_BYTES: usize = 64 * 1024 * 1024;

/// Default maximum frame size: 256 MiB.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 256 * 1024 * 1024;

/// Default maximum dimension count per field.
pub const DEFAULT_MAX_DIMS: usize = 32;

/// Input as delivered by the transport.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// A text frame holding JSON.
    Text(&'a str),
    /// A binary frame.
    Binary(&'a [u8]),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Binary(bytes)
    }
}

/// Limits applied while decoding.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Maximum element data per field in bytes. Default: 64 MiB.
    pub max_field_bytes: usize,
    /// Maximum binary frame size in bytes. Default: 256 MiB.
    pub max_frame_size: usize,
    /// Maximum dimensions per field. Default: 32.
    pub max_dims: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_field_bytes: DEFAULT_MAX_FIELD_BYTES,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_dims: DEFAULT_MAX_DIMS,
        }
    }
}

/// Decodes MatNet messages. Holds only configuration and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit limits.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a text or binary message.
    pub fn decode<'a>(&self, input: impl Into<Input<'a>>) -> Result<Message> {
        match input.into() {
            Input::Text(text) => decode_text(text),
            Input::Binary(bytes) => self.decode_binary(bytes),
        }
    }

    /// Decode a binary frame.
    pub fn decode_binary(&self, frame: &[u8]) -> Result<Message> {
        if frame.len() > self.config.max_frame_size {
            return Err(DecodeError::SizeOverflow {
                what: "frame".to_string(),
                size: frame.len(),
                max: self.config.max_frame_size,
            });
        }

        let mut cursor = Cursor::new(frame);
        cursor.skip(INT_SIZE)?; // reserved
        let fields_len = cursor.read_len("header length")?;
        let header = parse_header_bytes(cursor.take(fields_len)?)?;

        let mut payload = Payload::with_capacity(header.fields.len());
        for name in header.fields {
            let value = self.decode_field(&mut cursor, &name)?;
            payload.push(name, value);
        }

        cursor.finish()?;
        debug!(
            id = %header.id,
            fields = payload.len(),
            bytes = frame.len(),
            "decoded binary frame"
        );
        Ok(Message::new(header.id, payload))
    }

    fn decode_field(&self, cursor: &mut Cursor<'_>, name: &str) -> Result<Value> {
        let tag = cursor.read_i32()?;
        let ty = ElementType::from_tag(tag).ok_or_else(|| DecodeError::UnknownElementType {
            field: name.to_string(),
            tag,
        })?;

        let ndims = cursor.read_len("dimension count")?;
        if ndims > self.config.max_dims {
            return Err(DecodeError::TooManyDimensions {
                field: name.to_string(),
                ndims,
                max: self.config.max_dims,
            });
        }
        cursor.ensure(ndims * INT_SIZE)?;
        let shape = (0..ndims)
            .map(|_| cursor.read_len("dimension"))
            .collect::<Result<Vec<_>>>()?;

        let count = element_count(&shape).ok_or_else(|| self.overflow(name, usize::MAX))?;
        let byte_len = count
            .checked_mul(ty.width())
            .ok_or_else(|| self.overflow(name, usize::MAX))?;
        if byte_len > self.config.max_field_bytes {
            return Err(self.overflow(name, byte_len));
        }
        if byte_len > cursor.remaining() {
            return Err(DecodeError::SizeOverflow {
                what: format!("field {name:?}"),
                size: byte_len,
                max: cursor.remaining(),
            });
        }

        trace!(field = name, element_type = %ty, ?shape, byte_len, "decoding field");

        let mut data = cursor.take(byte_len)?;
        if shape.is_empty() {
            return Ok(Value::Scalar(Scalar::read(ty, &mut data)));
        }
        let elements = ArrayData::read(ty, &mut data, count);
        Array::new(shape, elements)
            .map(Value::Array)
            .ok_or_else(|| self.overflow(name, byte_len))
    }

    fn overflow(&self, name: &str, size: usize) -> DecodeError {
        DecodeError::SizeOverflow {
            what: format!("field {name:?}"),
            size,
            max: self.config.max_field_bytes,
        }
    }
}

/// Decode a message with default limits.
pub fn decode<'a>(input: impl Into<Input<'a>>) -> Result<Message> {
    Decoder::new().decode(input)
}

/// Decode a binary frame with default limits.
pub fn decode_binary(frame: &[u8]) -> Result<Message> {
    Decoder::new().decode_binary(frame)
}

#[derive(Deserialize)]
struct JsonMessage {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Payload", default)]
    payload: serde_json::Map<String, serde_json::Value>,
}

/// Decode a JSON text message. Keys other than `ID` and `Payload` are ignored.
pub fn decode_text(text: &str) -> Result<Message> {
    let raw: JsonMessage = serde_json::from_str(text)?;
    let payload = raw
        .payload
        .into_iter()
        .map(|(key, value)| (key, Value::Json(value)))
        .collect::<Payload>();
    debug!(id = %raw.id, fields = payload.len(), "decoded text message");
    Ok(Message::new(raw.id, payload))
}

/// Forward-only view over a frame. Every read checks the remaining length first.
struct Cursor<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            len: buf.len(),
        }
    }

    fn position(&self) -> usize {
        self.len - self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(DecodeError::TruncatedFrame {
                required: self.position().saturating_add(n),
                actual: self.len,
            });
        }
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.buf.advance(n);
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.ensure(INT_SIZE)?;
        Ok(self.buf.get_i32_le())
    }

    fn read_len(&mut self, what: &str) -> Result<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| DecodeError::InvalidLength {
            what: what.to_string(),
            value,
        })
    }

    fn finish(self) -> Result<()> {
        if !self.buf.is_empty() {
            return Err(DecodeError::TruncatedFrame {
                required: self.position(),
                actual: self.len,
            });
        }
        Ok(())
    }
}
