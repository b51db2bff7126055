//! zmtp_encoder - Zero-copy, resumable ZMTP/3.1 frame encoding.
//!
//! The core is [`V31Encoder`], a two-state machine that turns each outbound
//! [`Msg`] into a header chunk (built in an inline scratch buffer, with the
//! subscription command name injected for control messages) followed by the
//! message body, borrowed without copying. A driver pulls chunks, writes them,
//! and reports progress back with `consume`.
//!
//! ```
//! use zmtp_encoder::{MessageSource, Msg, MsgQueue, V31Encoder};
//!
//! let mut queue = MsgQueue::new();
//! queue.push(Msg::from_static(b"hi"));
//!
//! let mut encoder = V31Encoder::new();
//! let mut wire = Vec::new();
//! while let Some(chunk) = encoder.pull(&queue) {
//!   wire.extend_from_slice(chunk.data);
//!   let complete = chunk.message_complete;
//!   encoder.consume();
//!   if complete {
//!     queue.advance();
//!   }
//! }
//! assert_eq!(wire, [0x00, 0x02, b'h', b'i']);
//! ```

/// Reference driver writing encoder output to a Tokio stream.
pub mod engine;
/// Defines custom error types used throughout the library.
pub mod error;
/// Contains types related to message representation (Msg, MsgFlags).
pub mod message;
/// Implements ZMTP framing: encoder, paired decoder, codec and constants.
pub mod protocol;

// Re-export core types for user convenience.
pub use engine::{FrameWriter, FrameWriterConfig, MsgQueue};
pub use error::ZmqError;
pub use message::{Msg, MsgFlags};
pub use protocol::zmtp::{ControlClass, EncodedChunk, EncoderState, MessageSource, V31Decoder, V31Encoder, ZmtpCodec};
