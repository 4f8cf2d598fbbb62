use crate::host::Host;
use crate::isa::{Opcode, REGISTER_COUNT};
use crate::memory::Memory;

use super::{CpuError, StepTrace};

pub(super) struct Core {
    pub registers: [u8; REGISTER_COUNT],
    pub flag: bool,
    pub pc: u16,
    pub running: bool,
    pub step_count: u64,
}

impl Core {
    pub fn new(entry: u16) -> Core {
        Core { registers: [0; REGISTER_COUNT], flag: false, pc: entry, running: false, step_count: 0 }
    }

    pub fn trace(&self, memory: &Memory) -> StepTrace {
        let opcode_byte = memory.read_u8(self.pc);
        let (mnemonic, size) = match Opcode::from_byte(opcode_byte) {
            Some(op) => (op.mnemonic(), op.size()),
            None => ("???", 1),
        };
        let instruction_bytes = (0..size as u16)
            .map(|k| memory.read_u8(self.pc.wrapping_add(k)))
            .collect();

        StepTrace {
            step: self.step_count,
            pc: self.pc,
            mnemonic,
            instruction_bytes,
            registers: self.registers,
            flag: self.flag,
        }
    }

    pub fn tick(&mut self, memory: &mut Memory, host: &mut impl Host) -> Result<(), CpuError> {
        let opcode_byte = memory.read_u8(self.pc);
        let opcode = Opcode::from_byte(opcode_byte)
            .ok_or(CpuError::IllegalOpcode { pc: self.pc, opcode: opcode_byte })?;

        let mut jumped = false;

        match opcode {
            Opcode::Ldi => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let imm = memory.read_u8(self.pc + 2);
                self.registers[r] = imm;
            }
            Opcode::Ldm => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let addr = memory.read_u16(self.pc + 2);
                self.registers[r] = memory.read_u8(addr);
            }
            Opcode::Stm => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let addr = memory.read_u16(self.pc + 2);
                memory.write_u8(addr, self.registers[r]);
            }
            Opcode::Mov => {
                let rd = self.reg(memory.read_u8(self.pc + 1));
                let rs = self.reg(memory.read_u8(self.pc + 2));
                self.registers[rd] = self.registers[rs];
            }
            Opcode::Add => {
                let rd = self.reg(memory.read_u8(self.pc + 1));
                let rs = self.reg(memory.read_u8(self.pc + 2));
                self.registers[rd] = self.registers[rd].wrapping_add(self.registers[rs]);
            }
            Opcode::Addi => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let imm = memory.read_u8(self.pc + 2);
                self.registers[r] = self.registers[r].wrapping_add(imm);
            }
            Opcode::Sub => {
                let rd = self.reg(memory.read_u8(self.pc + 1));
                let rs = self.reg(memory.read_u8(self.pc + 2));
                self.registers[rd] = self.registers[rd].wrapping_sub(self.registers[rs]);
            }
            Opcode::Subi => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let imm = memory.read_u8(self.pc + 2);
                self.registers[r] = self.registers[r].wrapping_sub(imm);
            }
            Opcode::Cmp => {
                let ra = self.reg(memory.read_u8(self.pc + 1));
                let rb = self.reg(memory.read_u8(self.pc + 2));
                self.flag = self.registers[ra] == self.registers[rb];
            }
            Opcode::Cmpi => {
                let r = self.reg(memory.read_u8(self.pc + 1));
                let imm = memory.read_u8(self.pc + 2);
                self.flag = self.registers[r] == imm;
            }
            Opcode::Jmp => {
                self.pc = memory.read_u16(self.pc + 1);
                jumped = true;
            }
            Opcode::Jz => {
                let addr = memory.read_u16(self.pc + 1);
                if self.flag {
                    self.pc = addr;
                    jumped = true;
                }
            }
            Opcode::Jnz => {
                let addr = memory.read_u16(self.pc + 1);
                if !self.flag {
                    self.pc = addr;
                    jumped = true;
                }
            }
            Opcode::Sys => {
                let sysno = memory.read_u8(self.pc + 1);
                host.dispatch(sysno, &mut self.registers, memory);
            }
            Opcode::Hlt => {
                self.running = false;
            }
        }

        if !jumped {
            self.pc = self.pc.wrapping_add(opcode.size() as u16);
        }

        self.step_count += 1;
        Ok(())
    }

    /// Register operand bytes are always in `{0,1,2,3}` for assembler-produced code; mask keeps
    /// execution total for hand-crafted or fuzzed images instead of panicking on index.
    fn reg(&self, byte: u8) -> usize {
        (byte & 0x03) as usize
    }
}
