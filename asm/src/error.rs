use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("{line}: unknown mnemonic or directive \"{token}\"")]
    UnknownMnemonic { line: usize, token: String },

    #[error("{line}: unresolved identifier \"{identifier}\"")]
    UnresolvedIdentifier { line: usize, identifier: String },

    #[error("{line}: malformed numeric literal \"{literal}\"")]
    MalformedNumber { line: usize, literal: String },

    #[error("{line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("{line}: unknown escape sequence \\{escape}")]
    UnknownEscape { line: usize, escape: char },

    #[error("{line}: unknown register \"{register}\"")]
    UnknownRegister { line: usize, register: String },

    #[error("{line}: expected {expected} operand(s) for \"{mnemonic}\", found {found}")]
    WrongOperandCount { line: usize, mnemonic: String, expected: usize, found: usize },

    #[error("{line}: missing directive operand")]
    MissingOperand { line: usize },
}
