// tests/common.rs
#![allow(dead_code)] // Not every test binary uses every helper

use bytes::BytesMut;
use std::io;
use std::pin::Pin;
use std::sync::Once;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zmtp_encoder::{Msg, V31Decoder, ZmqError};

static TRACING_INIT: Once = Once::new();

pub fn setup_tracing() {
  TRACING_INIT.call_once(|| {
    // Can be overridden by RUST_LOG env variable
    let default_filter = "zmtp_encoder=trace,info";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_line_number(true)
      .with_test_writer() // Write to test output capture
      .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing subscriber");
  });
}

/// Sink that accepts at most `max_per_write` bytes per call, to exercise
/// partial-write handling.
#[derive(Debug, Default)]
pub struct TrickleWriter {
  pub written: Vec<u8>,
  pub max_per_write: usize,
  pub write_calls: usize,
  pub flushes: usize,
}

impl TrickleWriter {
  pub fn new(max_per_write: usize) -> Self {
    Self {
      max_per_write,
      ..Default::default()
    }
  }
}

impl AsyncWrite for TrickleWriter {
  fn poll_write(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
    let n = buf.len().min(self.max_per_write);
    self.written.extend_from_slice(&buf[..n]);
    self.write_calls += 1;
    Poll::Ready(Ok(n))
  }

  fn poll_flush(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
    self.flushes += 1;
    Poll::Ready(Ok(()))
  }

  fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
    Poll::Ready(Ok(()))
  }
}

/// Decodes every complete frame in `wire`.
pub fn decode_all(wire: &[u8]) -> Result<Vec<Msg>, ZmqError> {
  let mut decoder = V31Decoder::new();
  let mut buf = BytesMut::from(wire);
  let mut out = Vec::new();
  while let Some(msg) = decoder.decode_from_buffer(&mut buf)? {
    out.push(msg);
  }
  assert!(buf.is_empty(), "trailing bytes after last frame: {}", buf.len());
  Ok(out)
}
