use crate::error::ZmqError;
use crate::message::Msg;
use crate::protocol::zmtp::command::MAX_HEADER_LEN;
use crate::protocol::zmtp::decoder::V31Decoder;
use crate::protocol::zmtp::encoder::encode_header;
use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Codec for ZMTP/3.1 message framing, for use with `tokio_util::codec::Framed`.
///
/// Unlike [`V31Encoder`](crate::protocol::zmtp::V31Encoder) this copies each
/// body into the destination buffer; it trades zero-copy for the convenience
/// of a `Sink<Msg>`.
#[derive(Debug, Default)]
pub struct ZmtpCodec {
  decoder: V31Decoder,
}

impl ZmtpCodec {
  pub fn new() -> Self {
    Self::default()
  }

  /// Applies a maximum frame size to the decoding half.
  pub fn with_max_msg_size(max: u64) -> Self {
    Self {
      decoder: V31Decoder::new().with_max_msg_size(max),
    }
  }

  /// Encodes only the frame header (flags, length and any injected command
  /// name) for the given message into `dst`.
  ///
  /// Intended for vectored sends where the payload goes out from its own buffer.
  pub fn encode_header_only(&self, item: &Msg, dst: &mut BytesMut) {
    let mut header = [0u8; MAX_HEADER_LEN];
    let len = encode_header(item, &mut header);
    dst.put_slice(&header[..len]);
  }
}

// --- Encoder Implementation (Msg -> BytesMut) ---
impl Encoder<Msg> for ZmtpCodec {
  type Error = ZmqError;

  fn encode(&mut self, item: Msg, dst: &mut BytesMut) -> Result<(), Self::Error> {
    let data = item.data().unwrap_or(&[]); // Treat None data as empty slice
    dst.reserve(MAX_HEADER_LEN + data.len());
    self.encode_header_only(&item, dst);
    dst.put_slice(data);
    Ok(())
  }
}

// --- Decoder Implementation (BytesMut -> Msg) ---
impl Decoder for ZmtpCodec {
  type Item = Msg;
  type Error = ZmqError;

  fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
    self.decoder.decode_from_buffer(src)
  }
}
