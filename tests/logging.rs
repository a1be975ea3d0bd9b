//! Tests for log output emitted by the processor.

use bytes::BytesMut;
use log::Level;
use rstest::rstest;
use serial_test::serial;
use wsproc::{DataProcessor, Frame, test_helpers::ScriptedReader};
use wsproc_testing::{LoggerHandle, logger};

fn logged(logger: &mut LoggerHandle, level: Level, needle: &str) -> bool {
    logger
        .messages()
        .iter()
        .any(|(found, message)| *found == level && message.contains(needle))
}

#[rstest]
#[serial(processor_logs)]
fn timeout_is_logged_as_warning(mut logger: LoggerHandle) {
    let mut processor = DataProcessor::new(ScriptedReader::new([Frame::text("a", false)]));
    let mut events = Vec::new();
    processor.process(&mut BytesMut::new(), &mut events);

    processor.timeout_elapsed(&mut BytesMut::new(), &mut events);

    assert!(
        logged(&mut logger, Level::Warn, "dropping message state"),
        "timeout warning not logged"
    );
}

#[rstest]
#[serial(processor_logs)]
fn errors_are_logged_with_close_code(mut logger: LoggerHandle) {
    let mut processor = DataProcessor::new(ScriptedReader::new([Frame::continuation("x", true)]));
    processor.process(&mut BytesMut::new(), &mut Vec::new());

    assert!(
        logged(&mut logger, Level::Debug, "protocol error (close code 1002)"),
        "protocol error not logged"
    );
}

#[rstest]
#[serial(processor_logs)]
fn reserved_control_frames_are_logged(mut logger: LoggerHandle) {
    let frame = Frame::new(wsproc::OpCode::from(0xC), true, "");
    let mut processor = DataProcessor::new(ScriptedReader::new([frame]));
    processor.process(&mut BytesMut::new(), &mut Vec::new());

    assert!(
        logged(&mut logger, Level::Debug, "reserved control opcode"),
        "reserved opcode not logged"
    );
}
