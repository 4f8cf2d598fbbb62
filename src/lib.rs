pub mod host;
pub mod isa;
pub mod memory;
pub mod processor;

pub use host::Host;
pub use isa::{Opcode, RegisterId};
pub use memory::Memory;
pub use processor::{CpuError, ExitReason, Processor, StepTrace};

/// Little-endian byte order used for every 16-bit address in memory and on the wire.
pub type Endian = byteorder::LittleEndian;

#[cfg(test)]
mod tests {
    use super::host::test_support::RecordingHost;
    use super::*;

    fn run_program(bytes: &[(u16, u8)], entry: u16) -> (Processor, Memory) {
        let mut memory = Memory::new();
        for &(addr, byte) in bytes {
            memory.write_u8(addr, byte);
        }
        let mut processor = Processor::new(entry);
        let mut host = RecordingHost::new();
        processor.run(&mut memory, &mut host).unwrap();
        (processor, memory)
    }

    #[test]
    fn add_with_wraparound() {
        let (p, _) = run_program(
            &[
                (0x0200, 0x10), (0x0201, 0), (0x0202, 250), // LDI R0, 250
                (0x0203, 0x21), (0x0204, 0), (0x0205, 10),  // ADDI R0, 10
                (0x0206, 0x41),                             // HLT
            ],
            0x0200,
        );
        assert_eq!(p.registers()[0], 4);
    }

    #[test]
    fn compare_sets_flag() {
        let (p, _) = run_program(
            &[
                (0x0200, 0x10), (0x0201, 0), (0x0202, 5), // LDI R0, 5
                (0x0203, 0x34), (0x0204, 0), (0x0205, 5), // CMPI R0, 5
                (0x0206, 0x41),                           // HLT
            ],
            0x0200,
        );
        assert!(p.flag());
        assert_eq!(p.registers()[0], 5);
    }
}
