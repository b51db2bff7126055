use crate::error::ZmqError;
use crate::message::flags::MsgFlags;
use crate::protocol::zmtp::command::ControlClass;
use bytes::Bytes;
use std::fmt;

/// Represents a single message part (frame).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Msg {
  // Use Bytes for efficient slicing and cloning (reference counted)
  data: Option<Bytes>,
  flags: MsgFlags,
}

impl Msg {
  /// Creates an empty message with no data.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a message from a `Vec<u8>`, taking ownership.
  pub fn from_vec(data: Vec<u8>) -> Self {
    Self {
      data: Some(Bytes::from(data)),
      ..Default::default()
    }
  }

  /// Creates a message from `bytes::Bytes`.
  pub fn from_bytes(data: Bytes) -> Self {
    Self {
      data: Some(data),
      ..Default::default()
    }
  }

  /// Creates a message from a static byte slice (zero-copy).
  pub fn from_static(data: &'static [u8]) -> Self {
    Self {
      data: Some(Bytes::from_static(data)),
      ..Default::default()
    }
  }

  /// Subscription request for `topic`. The body holds only the topic; the
  /// `SUBSCRIBE` command name is added when the message is encoded.
  pub fn subscribe(topic: impl Into<Bytes>) -> Self {
    Self::control(ControlClass::Subscribe, topic.into())
  }

  /// Cancellation of a previous subscription to `topic`.
  pub fn cancel(topic: impl Into<Bytes>) -> Self {
    Self::control(ControlClass::Cancel, topic.into())
  }

  pub fn exclude_subscribe(topic: impl Into<Bytes>) -> Self {
    Self::control(ControlClass::ExcludeSubscribe, topic.into())
  }

  pub fn unexclude_subscribe(topic: impl Into<Bytes>) -> Self {
    Self::control(ControlClass::UnexcludeSubscribe, topic.into())
  }

  fn control(class: ControlClass, topic: Bytes) -> Self {
    let mut msg = Self::from_bytes(topic);
    msg.set_flags(class.flag() | MsgFlags::COMMAND);
    msg
  }

  /// Returns a reference to the message payload bytes, if any.
  pub fn data(&self) -> Option<&[u8]> {
    self.data.as_deref()
  }

  /// Returns the size of the message payload in bytes.
  pub fn size(&self) -> usize {
    self.data.as_ref().map_or(0, |d| d.len())
  }

  /// Returns the flags associated with the message.
  pub fn flags(&self) -> MsgFlags {
    self.flags
  }

  /// Sets the flags for the message (e.g., `MsgFlags::MORE`).
  pub fn set_flags(&mut self, flags: MsgFlags) {
    self.flags = flags;
  }

  // --- Flag Helpers ---

  /// Checks if the `MORE` flag is set.
  pub fn is_more(&self) -> bool {
    self.flags.contains(MsgFlags::MORE)
  }

  /// Checks if the `COMMAND` flag is set.
  pub fn is_command(&self) -> bool {
    self.flags.contains(MsgFlags::COMMAND)
  }

  pub fn is_subscribe(&self) -> bool {
    self.flags.contains(MsgFlags::SUBSCRIBE)
  }

  pub fn is_cancel(&self) -> bool {
    self.flags.contains(MsgFlags::CANCEL)
  }

  pub fn is_exclude_subscribe(&self) -> bool {
    self.flags.contains(MsgFlags::EXCLUDE_SUBSCRIBE)
  }

  pub fn is_unexclude_subscribe(&self) -> bool {
    self.flags.contains(MsgFlags::UNEXCLUDE_SUBSCRIBE)
  }

  /// The control class whose command name the encoder injects, if any.
  pub fn control_class(&self) -> Option<ControlClass> {
    ControlClass::from_flags(self.flags)
  }

  /// Checks the message against the framing invariants: at most one control
  /// class may be set.
  pub fn validate(&self) -> Result<(), ZmqError> {
    let classes = self.flags & MsgFlags::CONTROL_CLASSES;
    if classes.bits().count_ones() > 1 {
      return Err(ZmqError::InvalidMessage(format!(
        "control classes are mutually exclusive, got {:?}",
        classes
      )));
    }
    Ok(())
  }

  /// Returns the internal `Bytes` object if data is present.
  ///
  /// Cloning `Bytes` is cheap as it is reference-counted, so this hands out
  /// the payload without copying it.
  pub fn data_bytes(&self) -> Option<Bytes> {
    self.data.clone()
  }
}

impl fmt::Debug for Msg {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Msg")
      .field("size", &self.size())
      .field("flags", &self.flags)
      .field("data", &self.data().map(|d| format!("{} bytes", d.len()))) // Avoid printing large data
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_control_constructors_set_command() {
    let msg = Msg::subscribe(&b"topic"[..]);
    assert!(msg.is_subscribe());
    assert!(msg.is_command());
    assert_eq!(msg.data().unwrap(), b"topic");
    assert_eq!(msg.control_class(), Some(ControlClass::Subscribe));

    let msg = Msg::unexclude_subscribe(Bytes::new());
    assert!(msg.is_unexclude_subscribe());
    assert_eq!(msg.size(), 0);
  }

  #[test]
  fn test_validate_rejects_two_control_classes() {
    let mut msg = Msg::cancel(&b"x"[..]);
    assert!(msg.validate().is_ok());

    msg.set_flags(msg.flags() | MsgFlags::SUBSCRIBE);
    assert!(matches!(msg.validate(), Err(ZmqError::InvalidMessage(_))));
  }

  #[test]
  fn test_empty_message() {
    let msg = Msg::new();
    assert_eq!(msg.size(), 0);
    assert!(msg.data().is_none());
    assert_eq!(msg.control_class(), None);
    assert!(msg.validate().is_ok());
  }
}
