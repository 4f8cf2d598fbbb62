mod core;

use thiserror::Error;

use crate::host::Host;
use crate::isa::REGISTER_COUNT;
use crate::memory::Memory;
use self::core::Core;

/// Why `run()` stopped.
#[derive(Debug, PartialEq, Eq)]
pub enum ExitReason {
    Halted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("illegal opcode 0x{opcode:02X} at address 0x{pc:04X}")]
    IllegalOpcode { pc: u16, opcode: u8 },
}

/// A single pre-execute snapshot handed to a debug tracing sink.
#[derive(Debug, Clone)]
pub struct StepTrace {
    pub step: u64,
    pub pc: u16,
    pub mnemonic: &'static str,
    pub instruction_bytes: Vec<u8>,
    pub registers: [u8; REGISTER_COUNT],
    pub flag: bool,
}

/// The fetch-decode-execute engine for the 8-bit ISA in [`crate::isa`].
pub struct Processor {
    core: Core,
    trace_sink: Option<Box<dyn FnMut(&StepTrace)>>,
}

impl Processor {
    pub fn new(entry: u16) -> Processor {
        Processor { core: Core::new(entry), trace_sink: None }
    }

    /// Installs a per-step tracing callback, invoked immediately before each instruction executes.
    pub fn with_trace_sink(mut self, sink: impl FnMut(&StepTrace) + 'static) -> Processor {
        self.trace_sink = Some(Box::new(sink));
        self
    }

    pub fn registers(&self) -> [u8; REGISTER_COUNT] {
        self.core.registers
    }

    pub fn flag(&self) -> bool {
        self.core.flag
    }

    pub fn pc(&self) -> u16 {
        self.core.pc
    }

    pub fn step_count(&self) -> u64 {
        self.core.step_count
    }

    /// Executes instructions until `HLT` or a fatal error. The running flag starts true on entry.
    pub fn run(
        &mut self,
        memory: &mut Memory,
        host: &mut impl Host,
    ) -> Result<ExitReason, CpuError> {
        self.core.running = true;

        while self.core.running && (self.core.pc as usize) < memory.len() {
            if let Some(sink) = self.trace_sink.as_mut() {
                sink(&self.core.trace(memory));
            }
            self.core.tick(memory, host)?;
        }

        Ok(ExitReason::Halted)
    }
}
