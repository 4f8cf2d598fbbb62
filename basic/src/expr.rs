use karambit_vm::isa::var_addr;

use crate::error::BasicError;

/// Compiles an expression (`literal`, `variable`, `variable op literal`, or `variable op variable`)
/// into instructions that leave the result in `R0`.
pub fn compile_expr(expr: &str, line: usize) -> Result<Vec<String>, BasicError> {
    let expr = expr.trim();

    if let Ok(value) = expr.parse::<u8>() {
        return Ok(vec![format!("LDI R0, {value}")]);
    }

    if is_variable(expr) {
        let addr = var_addr(expr.chars().next().unwrap());
        return Ok(vec![format!("LDM R0, 0x{addr:04X}")]);
    }

    for op in ['+', '-'] {
        if let Some((left, right)) = split_once_trimmed(expr, op) {
            if is_variable(left) && right.parse::<u8>().is_ok() {
                let addr = var_addr(left.chars().next().unwrap());
                let mnemonic = if op == '+' { "ADDI" } else { "SUBI" };
                return Ok(vec![
                    format!("LDM R0, 0x{addr:04X}"),
                    format!("{mnemonic} R0, {right}"),
                ]);
            }

            if is_variable(left) && is_variable(right) {
                let left_addr = var_addr(left.chars().next().unwrap());
                let right_addr = var_addr(right.chars().next().unwrap());
                let mnemonic = if op == '+' { "ADD" } else { "SUB" };
                return Ok(vec![
                    format!("LDM R0, 0x{left_addr:04X}"),
                    format!("LDM R1, 0x{right_addr:04X}"),
                    format!("{mnemonic} R0, R1"),
                ]);
            }
        }
    }

    Err(BasicError::MalformedExpression { line, expr: expr.to_string() })
}

fn is_variable(token: &str) -> bool {
    token.len() == 1 && token.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn split_once_trimmed(expr: &str, op: char) -> Option<(&str, &str)> {
    let (left, right) = expr.split_once(op)?;
    Some((left.trim(), right.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_loads_immediate() {
        assert_eq!(compile_expr("5", 1).unwrap(), vec!["LDI R0, 5"]);
    }

    #[test]
    fn variable_loads_from_memory() {
        assert_eq!(compile_expr("B", 1).unwrap(), vec!["LDM R0, 0x0101"]);
    }

    #[test]
    fn variable_plus_literal() {
        assert_eq!(compile_expr("A + 3", 1).unwrap(), vec!["LDM R0, 0x0100", "ADDI R0, 3"]);
    }

    #[test]
    fn variable_minus_variable() {
        assert_eq!(
            compile_expr("A-B", 1).unwrap(),
            vec!["LDM R0, 0x0100", "LDM R1, 0x0101", "SUB R0, R1"]
        );
    }

    #[test]
    fn unrecognised_expression_is_a_hard_error() {
        assert_eq!(
            compile_expr("A * B", 1),
            Err(BasicError::MalformedExpression { line: 1, expr: "A * B".to_string() })
        );
    }
}
