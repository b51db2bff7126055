use crate::error::ZmqError;
use crate::protocol::zmtp::{MessageSource, V31Encoder};

use super::options::FrameWriterConfig;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Drives a [`V31Encoder`] over an async byte stream.
///
/// Partial writes are tracked with a cursor into the current chunk, so
/// `write_pending` may be cancelled at any `.await` and called again later
/// without duplicating or losing bytes.
#[derive(Debug)]
pub struct FrameWriter<W> {
  stream: W,
  encoder: V31Encoder,
  config: FrameWriterConfig,
  // Bytes of the current chunk already accepted by the stream.
  cursor: usize,
}

impl<W> FrameWriter<W>
where
  W: AsyncWrite + Unpin,
{
  pub fn new(stream: W) -> Self {
    Self::with_config(stream, FrameWriterConfig::default())
  }

  pub fn with_config(stream: W, config: FrameWriterConfig) -> Self {
    Self {
      stream,
      encoder: V31Encoder::new(),
      config,
      cursor: 0,
    }
  }

  pub fn encoder(&self) -> &V31Encoder {
    &self.encoder
  }

  pub fn get_ref(&self) -> &W {
    &self.stream
  }

  pub fn into_inner(self) -> W {
    self.stream
  }

  /// Forgets any partially written chunk and the encoder's cached header.
  ///
  /// Required before writing from a different or cleared source after
  /// `write_pending` failed partway through a message; retrying with the same
  /// source needs no reset.
  pub fn reset(&mut self) {
    if self.cursor > 0 {
      tracing::debug!(abandoned = self.cursor, "Resetting frame writer mid-chunk");
    }
    self.cursor = 0;
    self.encoder.reset();
  }

  /// Writes every message `source` currently holds and returns how many were
  /// completed. Returns once the source reports no output available.
  ///
  /// On error the position inside the current message is kept so the call can
  /// be retried with the same source; see [`reset`](Self::reset) otherwise.
  pub async fn write_pending<S>(&mut self, source: &mut S) -> Result<usize, ZmqError>
  where
    S: MessageSource + ?Sized,
  {
    let mut completed = 0usize;
    loop {
      let (written, remaining_after, message_complete) = {
        let chunk = match self.encoder.pull(&*source) {
          Some(chunk) => chunk,
          None => break,
        };
        let remaining = &chunk.data[self.cursor..];
        if remaining.is_empty() {
          (0, 0, chunk.message_complete)
        } else {
          let n = self.stream.write(remaining).await.map_err(ZmqError::from_io)?;
          if n == 0 {
            tracing::warn!(pending = remaining.len(), "Stream accepted zero bytes; treating as closed");
            return Err(ZmqError::ConnectionClosed);
          }
          (n, remaining.len() - n, chunk.message_complete)
        }
      };

      if remaining_after > 0 {
        self.cursor += written;
        tracing::trace!(written, remaining = remaining_after, "Partial frame write");
        continue;
      }

      self.cursor = 0;
      self.encoder.consume();
      if message_complete {
        source.advance();
        completed += 1;
        if self.config.flush_each_message {
          self.stream.flush().await.map_err(ZmqError::from_io)?;
        }
      }
    }

    if completed > 0 && !self.config.flush_each_message {
      self.stream.flush().await.map_err(ZmqError::from_io)?;
    }
    tracing::debug!(completed, "Finished writing pending frames");
    Ok(completed)
  }
}

/// Synchronously drains `source` through `encoder` into `dst`, returning the
/// number of messages encoded.
pub fn drain_to_bytes<S>(encoder: &mut V31Encoder, source: &mut S, dst: &mut BytesMut) -> usize
where
  S: MessageSource + ?Sized,
{
  let mut completed = 0usize;
  loop {
    let message_complete = match encoder.pull(&*source) {
      Some(chunk) => {
        dst.put_slice(chunk.data);
        chunk.message_complete
      }
      None => break,
    };
    encoder.consume();
    if message_complete {
      source.advance();
      completed += 1;
    }
  }
  completed
}
