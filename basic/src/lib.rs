//! Statement-directed compiler from a small BASIC dialect to [`karambit-asm`](../karambit_asm)
//! assembly text.
//!
//! [`compile_basic`] is the only public entry point. Its output is plain assembly text; nothing
//! here talks to the assembler or the CPU directly, so the front-end's contract is "emits text the
//! assembler accepts," not "emits a working program" — malformed input is a [`BasicError`], not a
//! best-effort fallback.

mod condition;
mod error;
mod expr;
mod statement;
mod strings;

pub use error::BasicError;

use statement::compile_statement;
use strings::StringTable;

struct Line<'a> {
    number: usize,
    label: Option<&'a str>,
    stmt: &'a str,
}

fn preprocess(source: &str) -> Vec<Line<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| match line.split_once(':') {
            Some((label, rest)) => Line { number, label: Some(label.trim()), stmt: rest.trim() },
            None => Line { number, label: None, stmt: line },
        })
        .collect()
}

/// Compiles `source` into assembly text accepted by [`karambit_asm::assemble`].
///
/// Emits a `.org 0x0200` code section opening with a `start:` label, the translated body, a
/// trailing `HLT`, and — only if any `PRINT` literal was seen — a `.org 0x3000` section of
/// labelled `.string` directives in declaration order.
pub fn compile_basic(source: &str) -> Result<String, BasicError> {
    let lines = preprocess(source);
    let mut strings = StringTable::new();

    let mut asm = vec![".org 0x0200".to_string(), "start:".to_string()];
    for line in &lines {
        if let Some(label) = line.label {
            asm.push(format!("{label}:"));
        }
        if !line.stmt.is_empty() {
            asm.extend(compile_statement(line.number, line.stmt, &mut strings)?);
        }
    }
    asm.push("HLT".to_string());

    if !strings.is_empty() {
        asm.push(".org 0x3000".to_string());
        asm.extend(strings.directives());
    }

    asm.push(String::new());
    Ok(asm.join("\n"))
}
