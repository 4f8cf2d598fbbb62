//! Opcode values, instruction sizes, and register identifiers.
//!
//! This table is the single source of truth shared by the assembler and the CPU: both resolve a
//! mnemonic/opcode through [`Opcode`] and its [`Opcode::size`], so a table edit can never
//! desynchronise encoding from execution.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// Address of the first BASIC variable (`A`). Variable `X` lives at `VAR_BASE + (X - 'A')`.
pub const VAR_BASE: u16 = 0x0100;
/// Default load address for assembled instruction streams.
pub const CODE_BASE: u16 = 0x0200;
/// Default load address for string literals emitted by the BASIC front-end.
pub const STR_BASE: u16 = 0x3000;

pub const REGISTER_COUNT: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum Opcode {
    Ldi = 0x10,
    Ldm = 0x11,
    Stm = 0x12,
    Mov = 0x13,

    Add = 0x20,
    Addi = 0x21,
    Sub = 0x22,
    Subi = 0x23,

    Cmp = 0x30,
    Jmp = 0x31,
    Jz = 0x32,
    Jnz = 0x33,
    Cmpi = 0x34,

    Sys = 0x40,
    Hlt = 0x41,
}

impl Opcode {
    /// Encoded size in bytes, including the opcode byte itself.
    pub fn size(self) -> u8 {
        match self {
            Opcode::Ldi => 3,
            Opcode::Ldm => 4,
            Opcode::Stm => 4,
            Opcode::Mov => 3,
            Opcode::Add => 3,
            Opcode::Addi => 3,
            Opcode::Sub => 3,
            Opcode::Subi => 3,
            Opcode::Cmp => 3,
            Opcode::Jmp => 3,
            Opcode::Jz => 3,
            Opcode::Jnz => 3,
            Opcode::Cmpi => 3,
            Opcode::Sys => 2,
            Opcode::Hlt => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Opcode> {
        FromPrimitive::from_u8(byte)
    }

    pub fn to_byte(self) -> u8 {
        ToPrimitive::to_u8(&self).unwrap()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Ldi => "LDI",
            Opcode::Ldm => "LDM",
            Opcode::Stm => "STM",
            Opcode::Mov => "MOV",
            Opcode::Add => "ADD",
            Opcode::Addi => "ADDI",
            Opcode::Sub => "SUB",
            Opcode::Subi => "SUBI",
            Opcode::Cmp => "CMP",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Cmpi => "CMPI",
            Opcode::Sys => "SYS",
            Opcode::Hlt => "HLT",
        }
    }

    /// Looks up a mnemonic, case-insensitively, as the assembler's lexer presents it.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        Some(match mnemonic.to_ascii_uppercase().as_str() {
            "LDI" => Opcode::Ldi,
            "LDM" => Opcode::Ldm,
            "STM" => Opcode::Stm,
            "MOV" => Opcode::Mov,
            "ADD" => Opcode::Add,
            "ADDI" => Opcode::Addi,
            "SUB" => Opcode::Sub,
            "SUBI" => Opcode::Subi,
            "CMP" => Opcode::Cmp,
            "JMP" => Opcode::Jmp,
            "JZ" => Opcode::Jz,
            "JNZ" => Opcode::Jnz,
            "CMPI" => Opcode::Cmpi,
            "SYS" => Opcode::Sys,
            "HLT" => Opcode::Hlt,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum RegisterId {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl RegisterId {
    pub fn index(self) -> usize {
        ToPrimitive::to_usize(&self).unwrap()
    }

    pub fn from_index(index: u8) -> Option<RegisterId> {
        FromPrimitive::from_u8(index)
    }

    /// Register names are case-insensitive on input (`r0`, `R0`, ...).
    pub fn from_name(name: &str) -> Option<RegisterId> {
        Some(match name.to_ascii_uppercase().as_str() {
            "R0" => RegisterId::R0,
            "R1" => RegisterId::R1,
            "R2" => RegisterId::R2,
            "R3" => RegisterId::R3,
            _ => return None,
        })
    }
}

/// Address of the memory-backed BASIC variable named by a single uppercase letter.
pub fn var_addr(var: char) -> u16 {
    VAR_BASE + (var.to_ascii_uppercase() as u16 - 'A' as u16)
}

/// Syscall numbers dispatched by the `SYS` instruction. Kept alongside the opcode table since both
/// are part of the same fixed ISA contract between the assembler/BASIC front-end and the CPU.
pub mod syscall {
    pub const PUTC: u8 = 0;
    pub const PRINTS: u8 = 1;
    pub const CLS: u8 = 2;
    pub const PUTXY: u8 = 3;
    pub const RENDER: u8 = 4;
    pub const SLEEP: u8 = 5;
    pub const KEY: u8 = 6;
    pub const GRIDSET: u8 = 10;
    pub const GGET: u8 = 11;
    pub const GSET: u8 = 12;
    pub const GNSET: u8 = 13;
    pub const GSWAP: u8 = 14;
    pub const AGET: u8 = 20;
    pub const ASET: u8 = 21;
    pub const RAND: u8 = 22;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_round_trips_through_byte() {
        for opcode in [
            Opcode::Ldi, Opcode::Ldm, Opcode::Stm, Opcode::Mov, Opcode::Add, Opcode::Addi,
            Opcode::Sub, Opcode::Subi, Opcode::Cmp, Opcode::Jmp, Opcode::Jz, Opcode::Jnz,
            Opcode::Cmpi, Opcode::Sys, Opcode::Hlt,
        ] {
            assert_eq!(Opcode::from_byte(opcode.to_byte()), Some(opcode));
        }
    }

    #[test]
    fn unknown_opcode_byte_is_none() {
        assert_eq!(Opcode::from_byte(0xFF), None);
    }

    #[test]
    fn register_names_are_case_insensitive() {
        assert_eq!(RegisterId::from_name("r2"), Some(RegisterId::R2));
        assert_eq!(RegisterId::from_name("R2"), Some(RegisterId::R2));
    }

    #[test]
    fn var_addr_matches_convention() {
        assert_eq!(var_addr('A'), 0x0100);
        assert_eq!(var_addr('j'), 0x0100 + 9);
    }
}
