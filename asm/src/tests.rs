use crate::{assemble, AssembleError};

#[test]
fn halt_only_program() {
    let (origin, blob, entry) = assemble(".org 0x0200\nstart: HLT").unwrap();
    assert_eq!(origin, 0x0200);
    assert_eq!(blob, vec![0x41]);
    assert_eq!(entry, 0x0200);
}

#[test]
fn arithmetic_with_wraparound_program() {
    let text = "
        .org 0x0200
        start:
            LDI R0, 250
            ADDI R0, 10
            HLT
    ";
    let (origin, blob, entry) = assemble(text).unwrap();
    assert_eq!(origin, 0x0200);
    assert_eq!(entry, 0x0200);
    assert_eq!(blob, vec![0x10, 0, 250, 0x21, 0, 10, 0x41]);
}

#[test]
fn compare_and_jump_resolves_forward_label() {
    let text = "
        .org 0x0200
        start:
            LDI R0, 5
            CMPI R0, 5
            JZ end
            LDI R0, 1
        end:
            HLT
    ";
    let (_, blob, _) = assemble(text).unwrap();
    // JZ's target bytes should equal the byte offset of `end` from origin (0x0200): 9.
    assert_eq!(&blob[6..9], &[0x32, 9, 0]);
}

#[test]
fn strings_are_null_terminated_and_addressable() {
    let text = "
        .org 0x3000
        s: .string \"Hi\"
        .org 0x0200
        start:
            LDI R0, 0x00
            LDI R1, 0x30
            SYS 1
            HLT
    ";
    let (origin, blob, entry) = assemble(text).unwrap();
    // The string section at 0x3000 sets the preliminary origin, but the lowest written address is
    // the code section at 0x0200, so that becomes the blob's actual origin.
    assert_eq!(origin, 0x0200);
    assert_eq!(entry, 0x0200);

    let code_offset = 0usize;
    let string_offset = (0x3000 - 0x0200) as usize;
    assert_eq!(&blob[code_offset..code_offset + 9], &[0x10, 0, 0x00, 0x10, 1, 0x30, 0x40, 1, 0x41]);
    assert_eq!(&blob[string_offset..string_offset + 3], &[b'H', b'i', 0]);
}

#[test]
fn unknown_escape_sequence_is_a_hard_error() {
    let text = ".org 0x3000\ns: .string \"bad\\qescape\"";
    assert!(matches!(assemble(text), Err(AssembleError::UnknownEscape { .. })));
}

#[test]
fn unresolved_label_is_a_hard_error() {
    let text = ".org 0x0200\nstart: JMP nowhere";
    assert!(matches!(assemble(text), Err(AssembleError::UnresolvedIdentifier { .. })));
}

#[test]
fn empty_program_yields_empty_blob() {
    let (origin, blob, entry) = assemble("").unwrap();
    assert_eq!(origin, entry);
    assert!(blob.is_empty());
}

#[test]
fn reassembling_identical_text_is_deterministic() {
    let text = ".org 0x0200\nstart: LDI R0, 7\nADDI R0, 3\nHLT";
    assert_eq!(assemble(text).unwrap(), assemble(text).unwrap());
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let text = "
        ; a comment
        .org 0x0200

        start: HLT ; trailing comment
    ";
    let (_, blob, _) = assemble(text).unwrap();
    assert_eq!(blob, vec![0x41]);
}

#[test]
fn addresses_round_trip_little_endian() {
    let text = ".org 0x0200\nstart: JMP 0x1234\n";
    let (_, blob, _) = assemble(text).unwrap();
    assert_eq!(&blob[1..3], &[0x34, 0x12]);
}
