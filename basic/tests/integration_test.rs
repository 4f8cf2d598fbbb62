use karambit_asm::assemble;
use karambit_basic::compile_basic;
use karambit_vm::host::test_support::RecordingHost;
use karambit_vm::{Memory, Processor};

#[test]
fn printc_program_writes_the_expected_byte_to_stdout() {
    let source = "10: LET A = 5\n20: PRINTC A + 1\n30: END";
    let asm = compile_basic(source).expect("compilation should succeed");

    let (origin, blob, entry) = assemble(&asm).expect("assembly should succeed");

    let mut memory = Memory::new();
    memory.load(origin, &blob);

    let mut processor = Processor::new(entry);
    let mut host = RecordingHost::new();
    processor.run(&mut memory, &mut host).expect("execution should halt cleanly");

    assert_eq!(host.output(), &[6]);
}

#[test]
fn print_literal_escapes_decode_through_the_assembler_unchanged() {
    let source = "PRINT \"Hi\\nBye\"\nEND";
    let asm = compile_basic(source).expect("compilation should succeed");

    let (origin, blob, entry) = assemble(&asm).expect("assembly should succeed");

    let mut memory = Memory::new();
    memory.load(origin, &blob);

    let mut processor = Processor::new(entry);
    let mut host = RecordingHost::new();
    processor.run(&mut memory, &mut host).expect("execution should halt cleanly");

    assert_eq!(host.output(), b"Hi\nBye");
}
