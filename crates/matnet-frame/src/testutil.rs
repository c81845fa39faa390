//! Test-only frame encoder mirroring the binary layout.

use bytes::{BufMut, BytesMut};

use crate::element::ElementType;
use crate::header::{RECORD_SEPARATOR, UNIT_SEPARATOR};

/// Encoded description of one field.
pub struct FieldSpec {
    tag: i32,
    shape: Vec<i32>,
    data: Vec<u8>,
}

macro_rules! typed_field {
    ($name:ident, $scalar:ident, $t:ty, $ty:expr) => {
        pub fn $name(shape: &[i32], values: &[$t]) -> Self {
            let mut data = Vec::with_capacity(values.len() * std::mem::size_of::<$t>());
            for v in values {
                data.extend_from_slice(&v.to_le_bytes());
            }
            Self {
                tag: $ty.tag(),
                shape: shape.to_vec(),
                data,
            }
        }

        pub fn $scalar(value: $t) -> Self {
            Self::$name(&[], &[value])
        }
    };
}

impl FieldSpec {
    typed_field!(i8s, i8_scalar, i8, ElementType::I8);
    typed_field!(u8s, u8_scalar, u8, ElementType::U8);
    typed_field!(i16s, i16_scalar, i16, ElementType::I16);
    typed_field!(u16s, u16_scalar, u16, ElementType::U16);
    typed_field!(i32s, i32_scalar, i32, ElementType::I32);
    typed_field!(u32s, u32_scalar, u32, ElementType::U32);
    typed_field!(f32s, f32_scalar, f32, ElementType::F32);
    typed_field!(f64s, f64_scalar, f64, ElementType::F64);
}

/// Builds a binary frame field by field.
pub struct FrameBuilder {
    id: String,
    names: Vec<String>,
    body: BytesMut,
}

impl FrameBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            names: Vec::new(),
            body: BytesMut::new(),
        }
    }

    pub fn field(self, name: &str, spec: FieldSpec) -> Self {
        self.raw_field(name, spec.tag, &spec.shape, &spec.data)
    }

    /// Append a field with an arbitrary tag, shape and element bytes.
    pub fn raw_field(mut self, name: &str, tag: i32, shape: &[i32], data: &[u8]) -> Self {
        self.names.push(name.to_string());
        self.body.put_i32_le(tag);
        self.body.put_i32_le(shape.len() as i32);
        for dim in shape {
            self.body.put_i32_le(*dim);
        }
        self.body.put_slice(data);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut header = self.id;
        header.push(RECORD_SEPARATOR);
        header.push_str(&self.names.join(UNIT_SEPARATOR.to_string().as_str()));

        let mut out = BytesMut::with_capacity(8 + header.len() + self.body.len());
        out.put_u32_le(0);
        out.put_i32_le(header.len() as i32);
        out.put_slice(header.as_bytes());
        out.put_slice(&self.body);
        out.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wire_format() {
        let frame = FrameBuilder::new("ID")
            .field("x", FieldSpec::u8_scalar(7))
            .build();
        let header = b"ID\x1ex";
        assert_eq!(&frame[0..4], &[0, 0, 0, 0]);
        assert_eq!(&frame[4..8], &(header.len() as i32).to_le_bytes());
        assert_eq!(&frame[8..8 + header.len()], header);
        let body = &frame[8 + header.len()..];
        assert_eq!(body, &[1, 0, 0, 0, 0, 0, 0, 0, 7]);
    }
}
