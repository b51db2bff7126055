/// Write-side options for a [`FrameWriter`](super::FrameWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameWriterConfig {
  /// Flush the stream after every complete message instead of once per
  /// `write_pending` call. Trades batching for latency.
  pub flush_each_message: bool,
}

impl FrameWriterConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn flush_each_message(mut self, enable: bool) -> Self {
    self.flush_each_message = enable;
    self
  }
}
