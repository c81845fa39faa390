//! Element type tags.
//!
//! A field's type tag is a little-endian `i32` indexing a fixed table of
//! numeric representations. Tags outside `0..=7` are rejected.

use serde::Serialize;

/// Numeric representation of a field's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

/// Wire tag lookup table, indexed by tag.
pub const ELEMENT_TYPES: [ElementType; 8] = [
    ElementType::I8,
    ElementType::U8,
    ElementType::I16,
    ElementType::U16,
    ElementType::I32,
    ElementType::U32,
    ElementType::F32,
    ElementType::F64,
];

impl ElementType {
    /// Resolve a wire tag. Returns `None` for unknown tags.
    pub fn from_tag(tag: i32) -> Option<Self> {
        usize::try_from(tag)
            .ok()
            .and_then(|idx| ELEMENT_TYPES.get(idx))
            .copied()
    }

    /// The wire tag for this type.
    pub fn tag(self) -> i32 {
        match self {
            ElementType::I8 => 0,
            ElementType::U8 => 1,
            ElementType::I16 => 2,
            ElementType::U16 => 3,
            ElementType::I32 => 4,
            ElementType::U32 => 5,
            ElementType::F32 => 6,
            ElementType::F64 => 7,
        }
    }

    /// Encoded width of one element in bytes.
    pub fn width(self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    /// Short lowercase name (`"f32"`, `"u16"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ElementType::I8 => "i8",
            ElementType::U8 => "u8",
            ElementType::I16 => "i16",
            ElementType::U16 => "u16",
            ElementType::I32 => "i32",
            ElementType::U32 => "u32",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }

    /// Returns true for `F32` and `F64`.
    pub fn is_float(self) -> bool {
        matches!(self, ElementType::F32 | ElementType::F64)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
