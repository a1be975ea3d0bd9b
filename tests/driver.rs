//! Tests for the async `drive` loop.
//!
//! Timeouts run on tokio's paused clock, so waiting for the inactivity
//! deadline costs no wall-clock time.

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use bytes::{Bytes, BytesMut};
use futures::FutureExt;
use rstest::rstest;
use tokio::{
    io::{AsyncRead, AsyncWriteExt, ReadBuf, duplex},
    sync::mpsc,
    time::sleep,
};
use tokio_util::sync::CancellationToken;
use wsproc::{
    DataProcessor,
    DriveEnd,
    Frame,
    ProcessorError,
    ProcessorEvent,
    drive,
    test_helpers::TaggedFrameReader,
};
use wsproc_testing::{
    binary_messages,
    drive_chunks,
    drive_with_bytes,
    drive_with_frames,
    encode_frames,
    errors,
    processor,
    text_messages,
};

#[tokio::test]
async fn frames_are_processed_until_eof() {
    let (end, events) = drive_with_frames(&[
        Frame::text("hel", false),
        Frame::ping("p"),
        Frame::continuation("lo", true),
        Frame::binary(vec![1_u8, 2], true),
    ])
    .await
    .expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(text_messages(&events), ["hello"]);
    assert_eq!(binary_messages(&events), [&Bytes::from_static(&[1, 2])]);
    assert!(events.contains(&ProcessorEvent::Ping(Bytes::from_static(b"p"))));
}

#[tokio::test]
async fn empty_stream_ends_without_events() {
    let (end, events) = drive_with_bytes(Vec::new()).await.expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert!(events.is_empty());
}

#[rstest]
#[case::single_bytes(1)]
#[case::odd_chunks(5)]
#[tokio::test]
async fn chunked_delivery_reassembles(
    mut processor: DataProcessor<TaggedFrameReader>,
    #[case] chunk: usize,
) {
    let wire = encode_frames(&[
        Frame::text("\u{1F980} crab", false),
        Frame::continuation(" walk", true),
    ]);
    let chunks = wire.chunks(chunk).map(Bytes::copy_from_slice).collect();

    let (end, events) = drive_chunks(&mut processor, chunks, 64).await.expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(text_messages(&events), ["\u{1F980} crab walk"]);
}

#[tokio::test]
async fn protocol_errors_do_not_stop_the_loop() {
    let (end, events) = drive_with_frames(&[Frame::continuation("x", true), Frame::text("ok", true)])
        .await
        .expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(errors(&events), [&ProcessorError::UnexpectedContinuation]);
    assert_eq!(text_messages(&events), ["ok"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn incomplete_frame_times_out(mut processor: DataProcessor<TaggedFrameReader>) {
    processor.set_wait_timeout(Duration::from_millis(250));
    let (mut client, mut server) = duplex(64);
    let wire = encode_frames(&[Frame::text("never finished", true)]);
    client.write_all(&wire[..8]).await.expect("write");

    let mut buf = BytesMut::new();
    let mut events = Vec::new();
    let shutdown = CancellationToken::new();
    let end = drive(&mut server, &mut buf, &mut processor, &mut events, &shutdown)
        .await
        .expect("drive");

    assert_eq!(end, DriveEnd::TimedOut);
    assert_eq!(events, vec![ProcessorEvent::Error(ProcessorError::Timeout)]);
    assert!(!processor.is_waiting());
    assert!(buf.is_empty());

    client
        .write_all(&encode_frames(&[Frame::text("fresh", true)]))
        .await
        .expect("write");
    drop(client);
    events.clear();
    let end = drive(&mut server, &mut buf, &mut processor, &mut events, &shutdown)
        .await
        .expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(text_messages(&events), ["fresh"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelled_drive_resumes_with_same_buffer(mut processor: DataProcessor<TaggedFrameReader>) {
    let (mut client, mut server) = duplex(64);
    let wire = encode_frames(&[Frame::text("split", false), Frame::continuation(" up", true)]);
    let first_frame_and_part = encode_frames(&[Frame::text("split", false)]).len() + 3;
    client
        .write_all(&wire[..first_frame_and_part])
        .await
        .expect("write");
    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let mut buf = BytesMut::new();
    let mut events = Vec::new();
    let end = drive(&mut server, &mut buf, &mut processor, &mut events, &shutdown)
        .await
        .expect("drive");

    assert_eq!(end, DriveEnd::Cancelled);
    assert_eq!(buf.len(), 3);
    assert!(processor.is_fragmented());

    client
        .write_all(&wire[first_frame_and_part..])
        .await
        .expect("write");
    drop(client);
    let end = drive(
        &mut server,
        &mut buf,
        &mut processor,
        &mut events,
        &CancellationToken::new(),
    )
    .await
    .expect("drive");

    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(text_messages(&events), ["split up"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn idle_connection_never_times_out(mut processor: DataProcessor<TaggedFrameReader>) {
    processor.set_wait_timeout(Duration::from_millis(10));
    let (mut client, mut server) = duplex(64);
    client
        .write_all(&encode_frames(&[Frame::pong("")]))
        .await
        .expect("write");
    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        sleep(Duration::from_secs(60)).await;
        trigger.cancel();
    });

    let mut events = Vec::new();
    let end = drive(
        &mut server,
        &mut BytesMut::new(),
        &mut processor,
        &mut events,
        &shutdown,
    )
    .await
    .expect("drive");

    assert_eq!(end, DriveEnd::Cancelled);
    assert_eq!(events, vec![ProcessorEvent::Pong(Bytes::new())]);
    drop(client);
}

#[rstest]
#[tokio::test]
async fn idle_stream_keeps_driver_pending(mut processor: DataProcessor<TaggedFrameReader>) {
    let (_client, mut server) = duplex(64);
    let shutdown = CancellationToken::new();
    let mut events = Vec::new();

    let mut buf = BytesMut::new();
    let polled = drive(&mut server, &mut buf, &mut processor, &mut events, &shutdown).now_or_never();

    assert!(polled.is_none(), "driver returned without input");
    assert!(events.is_empty());
}

#[rstest]
#[tokio::test]
async fn cancelled_token_stops_immediately(mut processor: DataProcessor<TaggedFrameReader>) {
    let (_client, mut server) = duplex(64);
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let end = drive(
        &mut server,
        &mut BytesMut::new(),
        &mut processor,
        &mut Vec::new(),
        &shutdown,
    )
    .await
    .expect("drive");

    assert_eq!(end, DriveEnd::Cancelled);
}

#[rstest]
#[tokio::test]
async fn events_stream_through_a_channel(mut processor: DataProcessor<TaggedFrameReader>) {
    let (mut client, mut server) = duplex(256);
    let (mut tx, mut rx) = mpsc::unbounded_channel();
    client
        .write_all(&encode_frames(&[Frame::text("one", true), Frame::text("two", true)]))
        .await
        .expect("write");
    drop(client);

    let end = drive(
        &mut server,
        &mut BytesMut::new(),
        &mut processor,
        &mut tx,
        &CancellationToken::new(),
    )
    .await
    .expect("drive");
    drop(tx);

    let mut received = Vec::new();
    while let Some(event) = rx.recv().await {
        received.push(event);
    }
    assert_eq!(end, DriveEnd::Eof);
    assert_eq!(text_messages(&received), ["one", "two"]);
}

/// Reader failing every poll.
struct Broken;

impl AsyncRead for Broken {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
    }
}

#[rstest]
#[tokio::test]
async fn io_errors_propagate(mut processor: DataProcessor<TaggedFrameReader>) {
    let err = drive(
        &mut Broken,
        &mut BytesMut::new(),
        &mut processor,
        &mut Vec::new(),
        &CancellationToken::new(),
    )
    .await
    .expect_err("read must fail");

    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
}
