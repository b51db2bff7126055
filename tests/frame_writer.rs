// tests/frame_writer.rs

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use tokio::io::AsyncReadExt;
use tokio_util::codec::{FramedRead, FramedWrite};
use zmtp_encoder::{FrameWriter, FrameWriterConfig, Msg, MsgFlags, MsgQueue, V31Decoder, ZmqError, ZmtpCodec};
mod common;

use common::TrickleWriter;

fn sample_messages() -> Vec<Msg> {
  let mut first = Msg::from_static(b"header-part");
  first.set_flags(MsgFlags::MORE);
  vec![
    first,
    Msg::from_vec(vec![0xAB; 4096]),
    Msg::subscribe(Bytes::from_static(b"ticker.")),
    Msg::cancel(Bytes::from_static(b"ticker.")),
  ]
}

#[tokio::test]
async fn test_partial_writes_produce_identical_stream() -> Result<(), ZmqError> {
  common::setup_tracing();

  let mut reference = FrameWriter::new(TrickleWriter::new(usize::MAX));
  let mut queue: MsgQueue = sample_messages().into_iter().collect();
  assert_eq!(reference.write_pending(&mut queue).await?, 4);
  let expected = reference.into_inner().written;

  for max_per_write in [1usize, 2, 3, 7, 64] {
    let mut writer = FrameWriter::new(TrickleWriter::new(max_per_write));
    let mut queue: MsgQueue = sample_messages().into_iter().collect();
    assert_eq!(writer.write_pending(&mut queue).await?, 4);
    assert!(queue.is_empty());
    assert_eq!(writer.get_ref().written, expected, "max_per_write={}", max_per_write);
  }

  let decoded = common::decode_all(&expected)?;
  assert_eq!(decoded.len(), 4);
  assert!(decoded[0].is_more());
  assert!(decoded[2].is_subscribe());
  assert_eq!(decoded[3].data().unwrap(), b"ticker.");
  Ok(())
}

#[tokio::test]
async fn test_flush_policy() -> Result<(), ZmqError> {
  common::setup_tracing();

  let mut batched = FrameWriter::new(TrickleWriter::new(usize::MAX));
  let mut queue: MsgQueue = sample_messages().into_iter().collect();
  batched.write_pending(&mut queue).await?;
  assert_eq!(batched.get_ref().flushes, 1);

  let config = FrameWriterConfig::new().flush_each_message(true);
  let mut eager = FrameWriter::with_config(TrickleWriter::new(usize::MAX), config);
  let mut queue: MsgQueue = sample_messages().into_iter().collect();
  eager.write_pending(&mut queue).await?;
  assert_eq!(eager.get_ref().flushes, 4);
  Ok(())
}

#[tokio::test]
async fn test_resume_after_source_refill() -> Result<(), ZmqError> {
  common::setup_tracing();
  let mut writer = FrameWriter::new(TrickleWriter::new(3));
  let mut queue = MsgQueue::new();

  assert_eq!(writer.write_pending(&mut queue).await?, 0);
  queue.push(Msg::from_static(b"late"));
  assert_eq!(writer.write_pending(&mut queue).await?, 1);
  assert_eq!(writer.get_ref().written, vec![0x00, 0x04, b'l', b'a', b't', b'e']);
  Ok(())
}

#[tokio::test]
async fn test_zero_length_write_is_connection_closed() {
  common::setup_tracing();
  let mut writer = FrameWriter::new(TrickleWriter::new(0));
  let mut queue = MsgQueue::new();
  queue.push(Msg::from_static(b"lost"));

  let result = writer.write_pending(&mut queue).await;
  assert!(matches!(result, Err(ZmqError::ConnectionClosed)));
  // Nothing was consumed, the message is still pending.
  assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn test_frame_writer_over_duplex() -> Result<(), ZmqError> {
  common::setup_tracing();
  let (client, mut server) = tokio::io::duplex(16);

  let writer_task = tokio::spawn(async move {
    let mut writer = FrameWriter::new(client);
    let mut queue: MsgQueue = sample_messages().into_iter().collect();
    writer.write_pending(&mut queue).await
  });

  let mut received = Vec::new();
  server.read_to_end(&mut received).await?;
  let written = writer_task
    .await
    .map_err(|e| ZmqError::Internal(format!("writer task failed: {}", e)))??;
  assert_eq!(written, 4);

  let mut decoder = V31Decoder::new();
  let mut buf = BytesMut::from(&received[..]);
  let mut count = 0;
  while let Some(msg) = decoder.decode_from_buffer(&mut buf)? {
    assert_eq!(msg.size(), sample_messages()[count].size());
    count += 1;
  }
  assert_eq!(count, 4);
  Ok(())
}

#[tokio::test]
async fn test_codec_with_framed_streams() -> Result<(), ZmqError> {
  common::setup_tracing();
  let (client, server) = tokio::io::duplex(64);
  let mut sink = FramedWrite::new(client, ZmtpCodec::new());
  let mut stream = FramedRead::new(server, ZmtpCodec::new());

  let sender = tokio::spawn(async move {
    for msg in sample_messages() {
      sink.send(msg).await?;
    }
    Ok::<_, ZmqError>(())
  });

  for expected in sample_messages() {
    let got = stream
      .next()
      .await
      .ok_or_else(|| ZmqError::Internal("stream ended early".into()))??;
    assert_eq!(got.flags(), expected.flags());
    assert_eq!(got.data(), expected.data());
  }
  sender
    .await
    .map_err(|e| ZmqError::Internal(format!("sender task failed: {}", e)))??;
  Ok(())
}
