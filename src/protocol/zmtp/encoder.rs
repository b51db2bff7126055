use crate::message::{Msg, MsgFlags};
use crate::protocol::zmtp::command::*;
use std::collections::VecDeque;

/// Supplies the messages an encoder frames, one at a time.
///
/// The storage of `current()` must stay valid and unmodified until
/// `advance()` moves past it; the encoder hands out its body without copying.
pub trait MessageSource {
  /// The message at the head of the source, if any.
  fn current(&self) -> Option<&Msg>;

  /// Drops the head message. Called by the driver once its body was fully written.
  fn advance(&mut self);

  fn has_next(&self) -> bool {
    self.current().is_some()
  }
}

impl MessageSource for VecDeque<Msg> {
  fn current(&self) -> Option<&Msg> {
    self.front()
  }

  fn advance(&mut self) {
    self.pop_front();
  }
}

/// The two steps every message passes through, in order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
  /// Next output is the header of the current message.
  #[default]
  MessageReady,
  /// Header was consumed; next output is the message body.
  SizeReady,
}

/// One contiguous buffer for the driver to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedChunk<'a> {
  pub data: &'a [u8],
  /// Set on the body chunk: once it is written the driver advances the source.
  pub message_complete: bool,
}

/// Encodes the ZMTP/3.1 header for `msg` into `buf` and returns its length.
pub fn encode_header(msg: &Msg, buf: &mut [u8; MAX_HEADER_LEN]) -> usize {
  encode_frame_header(msg.flags(), msg.size(), buf)
}

/// Encodes a frame header for a body of `body_len` bytes carrying `flags`.
///
/// Layout: flags(1), size(1 or 8, big-endian), then the command name when the
/// flags name a subscription control class. The size field carries the body
/// length plus the injected name length. `body_len` must come from real
/// storage; a length that overflows once the name is added is a caller bug.
pub(crate) fn encode_frame_header(flags: MsgFlags, body_len: usize, buf: &mut [u8; MAX_HEADER_LEN]) -> usize {
  debug_assert!(
    (flags & MsgFlags::CONTROL_CLASSES).bits().count_ones() <= 1,
    "control classes are mutually exclusive: {:?}",
    flags
  );

  let control = ControlClass::from_flags(flags);
  let name_len = control.map_or(0, ControlClass::name_len);
  let size = body_len
    .checked_add(name_len)
    .expect("frame size overflows usize after adding the command name");

  let mut zmtp_flags = 0u8;
  if flags.contains(MsgFlags::MORE) {
    zmtp_flags |= ZMTP_FLAG_MORE;
  }
  if flags.contains(MsgFlags::COMMAND) || control.is_some() {
    zmtp_flags |= ZMTP_FLAG_COMMAND;
  }

  // LONG is decided from the adjusted size only, so a 255-byte topic plus a
  // command name is framed as a long frame.
  let mut header_len = if size > ZMTP_SHORT_FRAME_MAX {
    zmtp_flags |= ZMTP_FLAG_LONG;
    buf[1..9].copy_from_slice(&(size as u64).to_be_bytes());
    1 + 8
  } else {
    buf[1] = size as u8;
    1 + 1
  };
  buf[0] = zmtp_flags;

  if let Some(class) = control {
    let name = class.name();
    buf[header_len..header_len + name.len()].copy_from_slice(name);
    header_len += name.len();
  }
  header_len
}

/// Resumable ZMTP/3.1 frame encoder.
///
/// Yields each message from a [`MessageSource`] as two chunks: the header from
/// an inline scratch buffer, then the body borrowed straight from the message.
/// Pulling never advances state; `consume` does, so a driver that is
/// interrupted by a partial write simply pulls the same chunk again.
#[derive(Debug)]
pub struct V31Encoder {
  state: EncoderState,
  scratch: [u8; MAX_HEADER_LEN],
  // Some(len) once the header for the current message is in `scratch`.
  header_len: Option<usize>,
}

impl Default for V31Encoder {
  fn default() -> Self {
    Self::new()
  }
}

impl V31Encoder {
  pub fn new() -> Self {
    Self {
      state: EncoderState::MessageReady,
      scratch: [0u8; MAX_HEADER_LEN],
      header_len: None,
    }
  }

  pub fn state(&self) -> EncoderState {
    self.state
  }

  /// Returns the next chunk to write, or `None` when the source is empty.
  pub fn pull<'a, S>(&'a mut self, source: &'a S) -> Option<EncodedChunk<'a>>
  where
    S: MessageSource + ?Sized,
  {
    let msg = source.current()?;
    match self.state {
      EncoderState::MessageReady => {
        let len = match self.header_len {
          Some(len) => len,
          None => {
            let len = encode_header(msg, &mut self.scratch);
            tracing::trace!(
              msg_size = msg.size(),
              header_len = len,
              flags = ?msg.flags(),
              "Encoded ZMTP frame header"
            );
            self.header_len = Some(len);
            len
          }
        };
        Some(EncodedChunk {
          data: &self.scratch[..len],
          message_complete: false,
        })
      }
      EncoderState::SizeReady => Some(EncodedChunk {
        data: msg.data().unwrap_or(&[]),
        message_complete: true,
      }),
    }
  }

  /// Marks the last pulled chunk as fully written and moves to the next step.
  ///
  /// After consuming a chunk with `message_complete` set, the driver must call
  /// `MessageSource::advance` before pulling again.
  pub fn consume(&mut self) {
    match self.state {
      EncoderState::MessageReady => {
        if self.header_len.is_none() {
          tracing::warn!("consume() called before a header was pulled; ignoring");
          return;
        }
        self.state = EncoderState::SizeReady;
      }
      EncoderState::SizeReady => {
        self.header_len = None;
        self.state = EncoderState::MessageReady;
      }
    }
  }

  /// Abandons any partially encoded message and returns to `MessageReady`.
  pub fn reset(&mut self) {
    self.state = EncoderState::MessageReady;
    self.header_len = None;
  }
}
