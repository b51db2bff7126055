use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive] // Allows adding more variants later without breaking change
pub enum ZmqError {
  // --- I/O Errors ---
  #[error("I/O error: {0}")]
  Io(#[from] io::Error), // Allows easy conversion from std::io::Error

  #[error("Connection closed by peer or transport")]
  ConnectionClosed, // EPIPE, ECONNRESET, or a zero-length write

  // --- Protocol Errors ---
  #[error("ZMTP protocol violation: {0}")]
  ProtocolViolation(String), // EPROTO

  #[error("Invalid message format for operation: {0}")]
  InvalidMessage(String),

  // --- Resource Limits ---
  #[error("Message of {size} bytes exceeds the configured maximum of {max} bytes")]
  MessageTooLarge { size: u64, max: u64 }, // EMSGSIZE

  // --- Internal Errors ---
  #[error("Internal library error: {0}")]
  Internal(String),
}

impl ZmqError {
  /// Maps transport-level I/O errors that mean "the peer is gone" onto
  /// `ConnectionClosed`; everything else stays an `Io` error.
  pub fn from_io(e: io::Error) -> Self {
    match e.kind() {
      io::ErrorKind::ConnectionReset
      | io::ErrorKind::BrokenPipe
      | io::ErrorKind::ConnectionAborted
      | io::ErrorKind::WriteZero
      | io::ErrorKind::UnexpectedEof => ZmqError::ConnectionClosed,
      _ => ZmqError::Io(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_io_maps_peer_gone_kinds() {
    let e = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
    assert!(matches!(ZmqError::from_io(e), ZmqError::ConnectionClosed));

    let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
    assert!(matches!(ZmqError::from_io(e), ZmqError::Io(_)));
  }

  #[test]
  fn test_message_too_large_display() {
    let e = ZmqError::MessageTooLarge { size: 300, max: 256 };
    assert_eq!(
      e.to_string(),
      "Message of 300 bytes exceeds the configured maximum of 256 bytes"
    );
  }
}
