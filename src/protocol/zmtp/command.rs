// src/protocol/zmtp/command.rs

use crate::message::MsgFlags;

// --- ZMTP Frame Flags ---
// Located in the first byte of every frame header.
pub const ZMTP_FLAG_MORE: u8 = 0b0000_0001; // Indicates more frames follow (like MsgFlags::MORE)
pub const ZMTP_FLAG_LONG: u8 = 0b0000_0010; // Indicates 8-byte length instead of 1-byte
pub const ZMTP_FLAG_COMMAND: u8 = 0b0000_0100; // Indicates this is a ZMTP command frame
/// Bits a ZMTP/3.1 peer must leave clear.
pub const ZMTP_FLAG_RESERVED_MASK: u8 = !(ZMTP_FLAG_MORE | ZMTP_FLAG_LONG | ZMTP_FLAG_COMMAND);

/// Largest payload that still fits the 1-byte size field.
pub const ZMTP_SHORT_FRAME_MAX: usize = u8::MAX as usize;

// --- ZMTP Command Names ---
// Wire form is <name length as one octet><name>, placed at the start of a command body.
pub const ZMTP_CMD_SUBSCRIBE_NAME: &[u8] = b"\x09SUBSCRIBE";
pub const ZMTP_CMD_CANCEL_NAME: &[u8] = b"\x06CANCEL";
pub const ZMTP_CMD_EXCLUDE_SUBSCRIBE_NAME: &[u8] = b"\x11EXCLUDE_SUBSCRIBE";
pub const ZMTP_CMD_UNEXCLUDE_SUBSCRIBE_NAME: &[u8] = b"\x13UNEXCLUDE_SUBSCRIBE";

/// flags(1) + long size(8) + longest injected command name.
pub const MAX_HEADER_LEN: usize = 1 + 8 + ZMTP_CMD_UNEXCLUDE_SUBSCRIBE_NAME.len();

/// Subscription-related messages whose command name is injected on the wire
/// by the encoder rather than stored in the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlClass {
  Subscribe,
  Cancel,
  ExcludeSubscribe,
  UnexcludeSubscribe,
}

impl ControlClass {
  /// Priority order used when classifying a message.
  pub const ALL: [ControlClass; 4] = [
    ControlClass::Subscribe,
    ControlClass::Cancel,
    ControlClass::ExcludeSubscribe,
    ControlClass::UnexcludeSubscribe,
  ];

  /// Length-prefixed command name as it appears on the wire.
  pub const fn name(self) -> &'static [u8] {
    match self {
      ControlClass::Subscribe => ZMTP_CMD_SUBSCRIBE_NAME,
      ControlClass::Cancel => ZMTP_CMD_CANCEL_NAME,
      ControlClass::ExcludeSubscribe => ZMTP_CMD_EXCLUDE_SUBSCRIBE_NAME,
      ControlClass::UnexcludeSubscribe => ZMTP_CMD_UNEXCLUDE_SUBSCRIBE_NAME,
    }
  }

  pub const fn name_len(self) -> usize {
    self.name().len()
  }

  pub const fn flag(self) -> MsgFlags {
    match self {
      ControlClass::Subscribe => MsgFlags::SUBSCRIBE,
      ControlClass::Cancel => MsgFlags::CANCEL,
      ControlClass::ExcludeSubscribe => MsgFlags::EXCLUDE_SUBSCRIBE,
      ControlClass::UnexcludeSubscribe => MsgFlags::UNEXCLUDE_SUBSCRIBE,
    }
  }

  /// First control class set in `flags`, in priority order.
  pub fn from_flags(flags: MsgFlags) -> Option<Self> {
    Self::ALL.into_iter().find(|class| flags.contains(class.flag()))
  }

  /// Matches the command name at the start of a command frame body.
  ///
  /// Names are length-prefixed, so no name is a prefix of another.
  pub fn from_name_prefix(body: &[u8]) -> Option<Self> {
    Self::ALL.into_iter().find(|class| body.starts_with(class.name()))
  }
}
