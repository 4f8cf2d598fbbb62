use karambit_asm::assemble;
use karambit_vm::{Memory, Processor};

#[test]
fn assembled_program_runs_to_completion_on_the_vm() {
    let text = "
        .org 0x0200
        start:
            LDI R0, 7
            ADDI R0, 3
            HLT
    ";

    let (origin, blob, entry) = assemble(text).expect("assembly should succeed");

    let mut memory = Memory::new();
    memory.load(origin, &blob);

    let mut processor = Processor::new(entry);
    let mut host = karambit_vm::host::StdHost::new();
    processor.run(&mut memory, &mut host).expect("execution should halt cleanly");

    assert_eq!(processor.registers()[0], 10);
}
