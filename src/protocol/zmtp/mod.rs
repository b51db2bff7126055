// src/protocol/zmtp/mod.rs

pub mod codec;
pub mod command;
pub mod decoder;
pub mod encoder;

pub use codec::ZmtpCodec;
pub use command::*; // Export constants
pub use decoder::V31Decoder;
pub use encoder::{encode_header, EncodedChunk, EncoderState, MessageSource, V31Encoder};
