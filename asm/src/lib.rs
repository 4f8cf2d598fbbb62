//! Two-pass assembler for the 8-bit instruction set defined in [`karambit_vm::isa`].
//!
//! [`assemble`] is the only public entry point: given assembly text it returns
//! `(origin, blob, entry)`, where `origin` is the load address of `blob[0]`, `blob` is the
//! contiguous byte image, and `entry` is the starting program counter. Re-assembling identical
//! text always produces a byte-identical result.

mod error;
mod lexer;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use karambit_vm::isa::{Opcode, RegisterId, CODE_BASE};

pub use error::AssembleError;

use lexer::{encode_string, extract_string, parse_number, strip_comment, tokenize};

type LabelMap = HashMap<String, u16>;

/// A source line with its one-based line number, already comment-stripped and blank-filtered.
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

fn preprocess(text: &str) -> Vec<SourceLine<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| SourceLine { number: i + 1, text: strip_comment(line) })
        .filter(|line| !line.text.is_empty())
        .collect()
}

/// Splits a non-`.org` line into an optional label definition and the remaining directive or
/// instruction text, matching the lexical rule that a label may share its line with what follows
/// the colon.
fn split_label<'a>(text: &'a str) -> (Option<&'a str>, &'a str) {
    match text.split_once(':') {
        Some((label, rest)) => (Some(label.trim()), rest.trim()),
        None => (None, text),
    }
}

fn directive_size(keyword: &str, text: &str, line_no: usize) -> Result<u16, AssembleError> {
    match keyword {
        ".byte" => Ok(1),
        ".word" => Ok(2),
        ".string" | ".asciiz" => {
            let body = extract_string(text, line_no)?;
            Ok(encode_string(body, line_no)?.len() as u16)
        }
        _ => unreachable!("caller already matched a known directive keyword"),
    }
}

fn resolve_register(token: &str, line_no: usize) -> Result<u8, AssembleError> {
    RegisterId::from_name(token)
        .map(|r| r.index() as u8)
        .ok_or_else(|| AssembleError::UnknownRegister { line: line_no, register: token.to_string() })
}

fn resolve_address(token: &str, labels: &LabelMap, line_no: usize) -> Result<u16, AssembleError> {
    if let Some(&addr) = labels.get(token) {
        return Ok(addr);
    }
    match parse_number(token, line_no) {
        Ok(value) => Ok(value as u16),
        Err(_) => Err(AssembleError::UnresolvedIdentifier { line: line_no, identifier: token.to_string() }),
    }
}

fn require_operands(
    tokens: &[String],
    expected: usize,
    mnemonic: &str,
    line_no: usize,
) -> Result<(), AssembleError> {
    if tokens.len() != expected + 1 {
        return Err(AssembleError::WrongOperandCount {
            line: line_no,
            mnemonic: mnemonic.to_string(),
            expected,
            found: tokens.len().saturating_sub(1),
        });
    }
    Ok(())
}

/// Encodes one instruction line's tokens (mnemonic first) into its instruction bytes.
fn encode_instruction(tokens: &[String], labels: &LabelMap, line_no: usize) -> Result<Vec<u8>, AssembleError> {
    let mnemonic = tokens[0].as_str();
    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AssembleError::UnknownMnemonic { line: line_no, token: mnemonic.to_string() })?;

    Ok(match opcode {
        Opcode::Hlt => {
            require_operands(tokens, 0, mnemonic, line_no)?;
            vec![opcode.to_byte()]
        }
        Opcode::Sys => {
            require_operands(tokens, 1, mnemonic, line_no)?;
            let imm = parse_number(&tokens[1], line_no)? as u8;
            vec![opcode.to_byte(), imm]
        }
        Opcode::Jmp | Opcode::Jz | Opcode::Jnz => {
            require_operands(tokens, 1, mnemonic, line_no)?;
            let addr = resolve_address(&tokens[1], labels, line_no)?;
            vec![opcode.to_byte(), (addr & 0xFF) as u8, (addr >> 8) as u8]
        }
        Opcode::Ldi | Opcode::Addi | Opcode::Subi | Opcode::Cmpi => {
            require_operands(tokens, 2, mnemonic, line_no)?;
            let r = resolve_register(&tokens[1], line_no)?;
            let imm = parse_number(&tokens[2], line_no)? as u8;
            vec![opcode.to_byte(), r, imm]
        }
        Opcode::Ldm | Opcode::Stm => {
            require_operands(tokens, 2, mnemonic, line_no)?;
            let r = resolve_register(&tokens[1], line_no)?;
            let addr = resolve_address(&tokens[2], labels, line_no)?;
            vec![opcode.to_byte(), r, (addr & 0xFF) as u8, (addr >> 8) as u8]
        }
        Opcode::Mov | Opcode::Add | Opcode::Sub | Opcode::Cmp => {
            require_operands(tokens, 2, mnemonic, line_no)?;
            let rd = resolve_register(&tokens[1], line_no)?;
            let rs = resolve_register(&tokens[2], line_no)?;
            vec![opcode.to_byte(), rd, rs]
        }
    })
}

/// Accumulates pass-2 output: a flat scratch buffer plus a parallel written-bitmap, so the final
/// min/max scan is a single linear pass with no map overhead (Design Notes).
struct Scratch {
    bytes: Box<[u8; 65536]>,
    written: Box<[bool; 65536]>,
}

impl Scratch {
    fn new() -> Scratch {
        Scratch { bytes: Box::new([0; 65536]), written: Box::new([false; 65536]) }
    }

    fn put(&mut self, addr: u16, byte: u8) {
        self.bytes[addr as usize] = byte;
        self.written[addr as usize] = true;
    }

    fn bounds(&self) -> Option<(u16, u16)> {
        let min = self.written.iter().position(|&w| w)?;
        let max = self.written.iter().rposition(|&w| w)?;
        Some((min as u16, max as u16))
    }
}

/// Pass 1: computes every label's address by walking the source once, advancing a cursor by each
/// directive's or instruction's declared size.
fn pass1(lines: &[SourceLine]) -> Result<(LabelMap, u16), AssembleError> {
    let mut labels = LabelMap::new();
    let mut addr = CODE_BASE;
    let mut origin = CODE_BASE;
    let mut origin_set = false;

    for line in lines {
        if let Some(rest) = line.text.strip_prefix(".org") {
            addr = parse_number(rest.trim(), line.number)? as u16;
            if !origin_set {
                origin = addr;
                origin_set = true;
            }
            continue;
        }

        let (label, rest) = split_label(line.text);
        if let Some(label) = label {
            labels.insert(label.to_string(), addr);
        }
        if rest.is_empty() {
            continue;
        }

        if let Some(keyword) = rest.split_whitespace().next() {
            if keyword == ".byte" || keyword == ".word" || keyword == ".string" || keyword == ".asciiz" {
                addr += directive_size(keyword, rest, line.number)?;
            } else if let Some(opcode) = Opcode::from_mnemonic(keyword) {
                addr += opcode.size() as u16;
            } else {
                return Err(AssembleError::UnknownMnemonic { line: line.number, token: keyword.to_string() });
            }
        }
    }

    Ok((labels, origin))
}

/// Pass 2: re-walks the same lines, this time emitting bytes and resolving label references.
fn pass2(lines: &[SourceLine], labels: &LabelMap) -> Result<Scratch, AssembleError> {
    let mut scratch = Scratch::new();
    let mut addr = CODE_BASE;

    for line in lines {
        if let Some(rest) = line.text.strip_prefix(".org") {
            addr = parse_number(rest.trim(), line.number)? as u16;
            continue;
        }

        let (_, rest) = split_label(line.text);
        if rest.is_empty() {
            continue;
        }

        let keyword = rest.split_whitespace().next().unwrap();
        match keyword {
            ".byte" => {
                let tokens = tokenize(rest);
                let operand = tokens.get(1).ok_or(AssembleError::MissingOperand { line: line.number })?;
                let value = parse_number(operand, line.number)? as u8;
                scratch.put(addr, value);
                addr += 1;
            }
            ".word" => {
                let tokens = tokenize(rest);
                let value = tokens.get(1).ok_or(AssembleError::MissingOperand { line: line.number })?;
                let value = parse_number(value, line.number)? as u16;
                scratch.put(addr, (value & 0xFF) as u8);
                scratch.put(addr + 1, (value >> 8) as u8);
                addr += 2;
            }
            ".string" | ".asciiz" => {
                let body = extract_string(rest, line.number)?;
                for byte in encode_string(body, line.number)? {
                    scratch.put(addr, byte);
                    addr += 1;
                }
            }
            _ => {
                let tokens = tokenize(rest);
                let instruction_bytes = encode_instruction(&tokens, labels, line.number)?;
                for byte in instruction_bytes {
                    scratch.put(addr, byte);
                    addr += 1;
                }
            }
        }
    }

    Ok(scratch)
}

/// Assembles `text` into `(origin, blob, entry)`. See module docs for the contract.
pub fn assemble(text: &str) -> Result<(u16, Vec<u8>, u16), AssembleError> {
    let lines = preprocess(text);
    let (labels, origin) = pass1(&lines)?;
    let scratch = pass2(&lines, &labels)?;

    let entry = labels.get("start").or_else(|| labels.get("_start")).copied().unwrap_or(origin);

    let Some((min_addr, max_addr)) = scratch.bounds() else {
        return Ok((origin, Vec::new(), origin));
    };

    let mut blob = vec![0u8; (max_addr - min_addr + 1) as usize];
    for addr in min_addr..=max_addr {
        if scratch.written[addr as usize] {
            blob[(addr - min_addr) as usize] = scratch.bytes[addr as usize];
        }
    }

    Ok((min_addr, blob, entry))
}
