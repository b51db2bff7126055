//! Reference I/O driver: pulls chunks from a `V31Encoder` and writes them to a
//! Tokio stream.

mod frame_writer;
mod options;
mod queue;

pub use frame_writer::{drain_to_bytes, FrameWriter};
pub use options::FrameWriterConfig;
pub use queue::MsgQueue;
