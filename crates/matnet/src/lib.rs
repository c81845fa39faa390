//! MatNet sensor message decoding.
//!
//! MatNet devices report commands as JSON text frames and bulk numeric
//! outputs as binary frames. This crate re-exports the decoder and ships
//! the `matnet` CLI (behind the `cli` feature) for inspecting captured frames.
//!
//! # Crate Structure
//!
//! - [`frame`]: text and binary frame decoding, message model, element types

/// Re-export frame decoding types.
pub mod frame {
    pub use matnet_frame::*;
}

pub use matnet_frame::{decode, DecodeError, Decoder, DecoderConfig, Input, Message, Value};
