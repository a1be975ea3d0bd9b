//! Unit tests for opcode classification and close code validation.

use rstest::rstest;

use super::{CloseCode, OpCode};

#[rstest]
#[case(0x0, OpCode::Continue)]
#[case(0x1, OpCode::Text)]
#[case(0x2, OpCode::Binary)]
#[case(0x8, OpCode::Close)]
#[case(0x9, OpCode::Ping)]
#[case(0xA, OpCode::Pong)]
#[case(0x3, OpCode::Reserved(0x3))]
#[case(0xF, OpCode::Reserved(0xF))]
#[case(0x20, OpCode::Reserved(0x20))]
fn opcode_from_raw(#[case] raw: u8, #[case] expected: OpCode) {
    let opcode = OpCode::from(raw);
    assert_eq!(opcode, expected);
    assert_eq!(u8::from(opcode), raw);
}

#[rstest]
#[case(OpCode::Close, true)]
#[case(OpCode::Ping, true)]
#[case(OpCode::Pong, true)]
#[case(OpCode::Reserved(0xB), true)]
#[case(OpCode::Continue, false)]
#[case(OpCode::Text, false)]
#[case(OpCode::Binary, false)]
#[case(OpCode::Reserved(0x7), false)]
fn opcode_control_classification(#[case] opcode: OpCode, #[case] control: bool) {
    assert_eq!(opcode.is_control(), control);
    assert_eq!(opcode.is_data(), !control);
}

#[test]
fn reserved_ranges_are_recognised() {
    let reserved: Vec<u8> = (0u8..=0x0F)
        .filter(|raw| OpCode::from(*raw).is_reserved())
        .collect();
    assert_eq!(reserved, vec![0x3, 0x4, 0x5, 0x6, 0x7, 0xB, 0xC, 0xD, 0xE, 0xF]);
    assert!(!OpCode::from(0x10).is_reserved());
    assert!(OpCode::from(0x10).is_out_of_range());
}

#[rstest]
#[case(1000)]
#[case(1001)]
#[case(1002)]
#[case(1003)]
#[case(1007)]
#[case(1011)]
#[case(3000)]
#[case(4999)]
fn close_code_accepts_sendable_codes(#[case] raw: u16) {
    assert!(CloseCode(raw).is_valid(), "{raw} should be valid");
}

#[rstest]
#[case(0)]
#[case(999)]
#[case(1004)]
#[case(1005)]
#[case(1006)]
#[case(1012)]
#[case(1015)]
#[case(2999)]
#[case(5000)]
#[case(u16::MAX)]
fn close_code_rejects_reserved_codes(#[case] raw: u16) {
    assert!(!CloseCode(raw).is_valid(), "{raw} should be invalid");
}
