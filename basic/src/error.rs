use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasicError {
    #[error("{line}: unknown statement \"{keyword}\"")]
    UnknownStatement { line: usize, keyword: String },

    #[error("{line}: malformed expression \"{expr}\"")]
    MalformedExpression { line: usize, expr: String },

    #[error("{line}: malformed condition \"{cond}\"")]
    MalformedCondition { line: usize, cond: String },

    #[error("{line}: malformed \"IF ... THEN GOTO\" clause")]
    MalformedIfThenGoto { line: usize },

    #[error("{line}: PRINT requires a string literal argument")]
    PrintRequiresLiteral { line: usize },

    #[error("{line}: missing operand for \"{statement}\"")]
    MissingOperand { line: usize, statement: String },
}
