use crate::error::ZmqError;
use crate::message::{Msg, MsgFlags};
use crate::protocol::zmtp::command::*;
use bytes::{Buf, BytesMut};

/// Upper bound on what a single short read may pre-allocate for a body; the
/// declared size comes from the peer.
const MAX_BODY_RESERVE: usize = 64 * 1024;

#[derive(Debug, Default, Clone, Copy)]
enum DecodingState {
  #[default]
  ReadHeader,
  ReadBody {
    flags: u8,
    size: usize,
  },
}

/// Incremental ZMTP/3.1 frame decoder, the inverse of [`V31Encoder`].
///
/// Subscription command frames come back with the command name stripped from
/// the body and the matching control flag set, so a decoded message compares
/// equal to the one that was encoded.
///
/// [`V31Encoder`]: crate::protocol::zmtp::V31Encoder
#[derive(Debug, Default)]
pub struct V31Decoder {
  state: DecodingState,
  max_msg_size: Option<u64>,
}

impl V31Decoder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rejects frames whose size field exceeds `max` bytes.
  pub fn with_max_msg_size(mut self, max: u64) -> Self {
    self.max_msg_size = Some(max);
    self
  }

  /// Attempts to decode a single message from the provided buffer.
  ///
  /// The buffer `src` is modified by consuming bytes for any successfully decoded message.
  /// If a partial message is present, the header (once complete) is consumed and
  /// remembered; the body stays in `src` until it is complete.
  ///
  /// # Returns
  /// - `Ok(Some(Msg))` if a full message was decoded.
  /// - `Ok(None)` if more data is needed to decode a complete message.
  /// - `Err(ZmqError)` if a protocol violation or decoding error occurs.
  pub fn decode_from_buffer(&mut self, src: &mut BytesMut) -> Result<Option<Msg>, ZmqError> {
    loop {
      match self.state {
        DecodingState::ReadHeader => {
          if src.is_empty() {
            return Ok(None); // Need at least flags byte
          }
          let frame_flags_byte = src[0]; // Peek
          if frame_flags_byte & ZMTP_FLAG_RESERVED_MASK != 0 {
            return Err(ZmqError::ProtocolViolation(format!(
              "reserved bits set in frame flags 0x{:02x}",
              frame_flags_byte
            )));
          }
          let is_long = (frame_flags_byte & ZMTP_FLAG_LONG) != 0;
          let header_len = if is_long { 1 + 8 } else { 1 + 1 };

          if src.len() < header_len {
            return Ok(None); // Not enough data for full header
          }

          // Consume header
          let flags = src.get_u8();
          let wire_size = if is_long { src.get_u64() } else { src.get_u8() as u64 };

          if let Some(max) = self.max_msg_size {
            if wire_size > max {
              tracing::debug!(size = wire_size, max, "Rejecting oversized ZMTP frame");
              return Err(ZmqError::MessageTooLarge { size: wire_size, max });
            }
          }
          let size = usize::try_from(wire_size).map_err(|_| {
            ZmqError::ProtocolViolation(format!("frame size {} not addressable", wire_size))
          })?;

          self.state = DecodingState::ReadBody { flags, size };
          // Continue loop to try reading body immediately
        }
        DecodingState::ReadBody { flags, size } => {
          if src.len() < size {
            src.reserve((size - src.len()).min(MAX_BODY_RESERVE));
            return Ok(None); // Not enough data for body
          }

          let mut body = src.split_to(size).freeze();

          // Reset state for next message
          self.state = DecodingState::ReadHeader;

          let mut msg_flags = MsgFlags::empty();
          if (flags & ZMTP_FLAG_MORE) != 0 {
            msg_flags |= MsgFlags::MORE;
          }
          if (flags & ZMTP_FLAG_COMMAND) != 0 {
            msg_flags |= MsgFlags::COMMAND;
            if let Some(class) = ControlClass::from_name_prefix(&body) {
              body.advance(class.name_len());
              msg_flags |= class.flag();
            }
          }

          let mut msg = Msg::from_bytes(body);
          msg.set_flags(msg_flags);
          return Ok(Some(msg));
        }
      }
    }
  }
}
