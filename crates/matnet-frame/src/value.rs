//! Decoded message model.

use bytes::Buf;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::element::ElementType;

/// A single numeric element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn element_type(&self) -> ElementType {
        match self {
            Scalar::I8(_) => ElementType::I8,
            Scalar::U8(_) => ElementType::U8,
            Scalar::I16(_) => ElementType::I16,
            Scalar::U16(_) => ElementType::U16,
            Scalar::I32(_) => ElementType::I32,
            Scalar::U32(_) => ElementType::U32,
            Scalar::F32(_) => ElementType::F32,
            Scalar::F64(_) => ElementType::F64,
        }
    }

    /// Widen to `f64`. Exact for every element type except `F64` itself.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::I8(v) => v.into(),
            Scalar::U8(v) => v.into(),
            Scalar::I16(v) => v.into(),
            Scalar::U16(v) => v.into(),
            Scalar::I32(v) => v.into(),
            Scalar::U32(v) => v.into(),
            Scalar::F32(v) => v.into(),
            Scalar::F64(v) => v,
        }
    }

    /// Read one element of `ty`. The caller guarantees `ty.width()` bytes remain.
    pub(crate) fn read(ty: ElementType, buf: &mut impl Buf) -> Self {
        match ty {
            ElementType::I8 => Scalar::I8(buf.get_i8()),
            ElementType::U8 => Scalar::U8(buf.get_u8()),
            ElementType::I16 => Scalar::I16(buf.get_i16_le()),
            ElementType::U16 => Scalar::U16(buf.get_u16_le()),
            ElementType::I32 => Scalar::I32(buf.get_i32_le()),
            ElementType::U32 => Scalar::U32(buf.get_u32_le()),
            ElementType::F32 => Scalar::F32(buf.get_f32_le()),
            ElementType::F64 => Scalar::F64(buf.get_f64_le()),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Scalar::I8(v) => serializer.serialize_i8(v),
            Scalar::U8(v) => serializer.serialize_u8(v),
            Scalar::I16(v) => serializer.serialize_i16(v),
            Scalar::U16(v) => serializer.serialize_u16(v),
            Scalar::I32(v) => serializer.serialize_i32(v),
            Scalar::U32(v) => serializer.serialize_u32(v),
            Scalar::F32(v) => serializer.serialize_f32(v),
            Scalar::F64(v) => serializer.serialize_f64(v),
        }
    }
}

/// Contiguous typed element storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! read_vec {
    ($buf:expr, $count:expr, $get:ident) => {
        (0..$count).map(|_| $buf.$get()).collect()
    };
}

macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ArrayData::I8($v) => $body,
            ArrayData::U8($v) => $body,
            ArrayData::I16($v) => $body,
            ArrayData::U16($v) => $body,
            ArrayData::I32($v) => $body,
            ArrayData::U32($v) => $body,
            ArrayData::F32($v) => $body,
            ArrayData::F64($v) => $body,
        }
    };
}

impl ArrayData {
    /// Read `count` elements of `ty`. The caller guarantees `count * ty.width()` bytes remain.
    pub(crate) fn read(ty: ElementType, buf: &mut impl Buf, count: usize) -> Self {
        match ty {
            ElementType::I8 => ArrayData::I8(read_vec!(buf, count, get_i8)),
            ElementType::U8 => ArrayData::U8(read_vec!(buf, count, get_u8)),
            ElementType::I16 => ArrayData::I16(read_vec!(buf, count, get_i16_le)),
            ElementType::U16 => ArrayData::U16(read_vec!(buf, count, get_u16_le)),
            ElementType::I32 => ArrayData::I32(read_vec!(buf, count, get_i32_le)),
            ElementType::U32 => ArrayData::U32(read_vec!(buf, count, get_u32_le)),
            ElementType::F32 => ArrayData::F32(read_vec!(buf, count, get_f32_le)),
            ElementType::F64 => ArrayData::F64(read_vec!(buf, count, get_f64_le)),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::I8(_) => ElementType::I8,
            ArrayData::U8(_) => ElementType::U8,
            ArrayData::I16(_) => ElementType::I16,
            ArrayData::U16(_) => ElementType::U16,
            ArrayData::I32(_) => ElementType::I32,
            ArrayData::U32(_) => ElementType::U32,
            ArrayData::F32(_) => ElementType::F32,
            ArrayData::F64(_) => ElementType::F64,
        }
    }

    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at a flat (row-major) offset.
    pub fn get(&self, offset: usize) -> Option<Scalar> {
        match self {
            ArrayData::I8(v) => v.get(offset).copied().map(Scalar::I8),
            ArrayData::U8(v) => v.get(offset).copied().map(Scalar::U8),
            ArrayData::I16(v) => v.get(offset).copied().map(Scalar::I16),
            ArrayData::U16(v) => v.get(offset).copied().map(Scalar::U16),
            ArrayData::I32(v) => v.get(offset).copied().map(Scalar::I32),
            ArrayData::U32(v) => v.get(offset).copied().map(Scalar::U32),
            ArrayData::F32(v) => v.get(offset).copied().map(Scalar::F32),
            ArrayData::F64(v) => v.get(offset).copied().map(Scalar::F64),
        }
    }

    fn slice(&self, range: std::ops::Range<usize>) -> Self {
        match self {
            ArrayData::I8(v) => ArrayData::I8(v[range].to_vec()),
            ArrayData::U8(v) => ArrayData::U8(v[range].to_vec()),
            ArrayData::I16(v) => ArrayData::I16(v[range].to_vec()),
            ArrayData::U16(v) => ArrayData::U16(v[range].to_vec()),
            ArrayData::I32(v) => ArrayData::I32(v[range].to_vec()),
            ArrayData::U32(v) => ArrayData::U32(v[range].to_vec()),
            ArrayData::F32(v) => ArrayData::F32(v[range].to_vec()),
            ArrayData::F64(v) => ArrayData::F64(v[range].to_vec()),
        }
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            ArrayData::F64(v) => v.clone(),
            other => (0..other.len())
                .filter_map(|i| other.get(i))
                .map(|s| s.as_f64())
                .collect(),
        }
    }
}

/// Dense n-dimensional array in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    data: ArrayData,
}

impl Array {
    /// Build an array. Returns `None` if the shape is empty or its product
    /// does not equal the element count.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Option<Self> {
        if shape.is_empty() || element_count(&shape) != Some(data.len()) {
            return None;
        }
        Some(Self { shape, data })
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn into_data(self) -> ArrayData {
        self.data
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded size of the element data in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_type().width()
    }

    /// Row-major strides, in elements.
    ///
    /// Saturates for empty arrays whose non-zero dimensions overflow `usize`;
    /// such arrays have no addressable elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.shape.len()];
        for axis in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1].saturating_mul(self.shape[axis + 1]);
        }
        strides
    }

    /// Flat offset of a multi-dimensional index, or `None` if out of bounds.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if self.is_empty() || index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0usize;
        for ((&i, &dim), stride) in index.iter().zip(&self.shape).zip(self.strides()) {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        Some(offset)
    }

    /// Element at a multi-dimensional index, e.g. `array.get(&[0, 0])`.
    pub fn get(&self, index: &[usize]) -> Option<Scalar> {
        self.offset(index).and_then(|offset| self.data.get(offset))
    }

    /// Sub-array along the outermost axis. Requires at least two dimensions.
    pub fn row(&self, i: usize) -> Option<Array> {
        if self.shape.len() < 2 || i >= self.shape[0] {
            return None;
        }
        let inner = element_count(&self.shape[1..])?;
        let start = i * inner;
        Some(Array {
            shape: self.shape[1..].to_vec(),
            data: self.data.slice(start..start + inner),
        })
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.data.to_f64_vec()
    }
}

/// Product of a shape, or `None` on overflow.
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Non-empty arrays serialize as nested lists in their declared shape. Empty
/// arrays serialize as a single `[]`, so output stays bounded no matter how
/// large the non-zero dimensions are.
impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        Nested {
            array: self,
            strides: &self.strides(),
            axis: 0,
            base: 0,
        }
        .serialize(serializer)
    }
}

/// One axis of an array, serialized as a nested list.
struct Nested<'a> {
    array: &'a Array,
    strides: &'a [usize],
    axis: usize,
    base: usize,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dim = self.array.shape[self.axis];
        let mut seq = serializer.serialize_seq(Some(dim))?;
        for i in 0..dim {
            let offset = self.base + i * self.strides[self.axis];
            if self.axis + 1 == self.array.shape.len() {
                if let Some(scalar) = self.array.data.get(offset) {
                    seq.serialize_element(&scalar)?;
                }
            } else {
                seq.serialize_element(&Nested {
                    array: self.array,
                    strides: self.strides,
                    axis: self.axis + 1,
                    base: offset,
                })?;
            }
        }
        seq.end()
    }
}

/// A payload entry.
///
/// Binary fields are [`Value::Scalar`] when they declare zero dimensions and
/// [`Value::Array`] otherwise. Entries of a JSON message keep their JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Array(Array),
    Json(serde_json::Value),
}

impl Value {
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Short description of the value's kind: `scalar`, `array` or `json`.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Array(_) => "array",
            Value::Json(_) => "json",
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

/// Named payload entries in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, Value)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: Value) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Payload {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A decoded MatNet message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Payload")]
    pub payload: Payload,
}

impl Message {
    pub fn new(id: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}
