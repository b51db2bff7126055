use crate::message::Msg;
use crate::protocol::zmtp::MessageSource;
use std::collections::VecDeque;

/// FIFO of outbound messages feeding a single connection's encoder.
#[derive(Debug, Default, Clone)]
pub struct MsgQueue {
  inner: VecDeque<Msg>,
}

impl MsgQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      inner: VecDeque::with_capacity(capacity),
    }
  }

  /// Queues `msg` behind everything already pending.
  pub fn push(&mut self, msg: Msg) {
    self.inner.push_back(msg);
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Drops all pending messages, e.g. when the connection is abandoned.
  pub fn clear(&mut self) {
    if !self.inner.is_empty() {
      tracing::debug!(dropped = self.inner.len(), "Discarding pending outbound messages");
    }
    self.inner.clear();
  }
}

impl MessageSource for MsgQueue {
  fn current(&self) -> Option<&Msg> {
    self.inner.front()
  }

  fn advance(&mut self) {
    self.inner.pop_front();
  }
}

impl FromIterator<Msg> for MsgQueue {
  fn from_iter<I: IntoIterator<Item = Msg>>(iter: I) -> Self {
    Self {
      inner: iter.into_iter().collect(),
    }
  }
}

impl Extend<Msg> for MsgQueue {
  fn extend<I: IntoIterator<Item = Msg>>(&mut self, iter: I) {
    self.inner.extend(iter);
  }
}
