/// Errors that can occur while decoding a MatNet message.
///
/// Every variant is terminal for the frame being decoded; no partial
/// [`Message`](crate::Message) is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A text frame is not valid JSON or lacks the required `ID` key.
    #[error("malformed JSON message: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The binary header text is not UTF-8 or does not split into id and field list.
    #[error("malformed frame header: {reason}")]
    MalformedHeader { reason: String },

    /// A field declares an element type tag outside 0..=7.
    #[error("unknown element type tag {tag} for field {field:?}")]
    UnknownElementType { field: String, tag: i32 },

    /// The bytes present do not match what the frame declares.
    #[error("frame length mismatch: decoding requires {required} bytes, frame has {actual}")]
    TruncatedFrame { required: usize, actual: usize },

    /// A declared size exceeds the remaining buffer or a configured limit.
    #[error("{what} too large ({size} bytes, max {max})")]
    SizeOverflow {
        what: String,
        size: usize,
        max: usize,
    },

    /// A length, dimension count or dimension is negative.
    #[error("invalid {what}: {value}")]
    InvalidLength { what: String, value: i32 },

    /// A field declares more dimensions than the decoder accepts.
    #[error("field {field:?} declares {ndims} dimensions (max {max})")]
    TooManyDimensions {
        field: String,
        ndims: usize,
        max: usize,
    },
}

impl DecodeError {
    pub(crate) fn malformed_header(reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
