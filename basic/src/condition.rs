use crate::error::BasicError;
use crate::expr::compile_expr;

/// A compiled condition, carrying whether it branches on equal (`=`) or not-equal (`<>`).
pub struct Condition {
    pub code: Vec<String>,
    pub negated: bool,
}

/// Compiles `LHS = RHS` or `LHS <> RHS`, leaving the comparison result in the CPU flag.
pub fn compile_condition(cond: &str, line: usize) -> Result<Condition, BasicError> {
    let cond = cond.trim();

    let (left, right, negated) = if let Some((left, right)) = cond.split_once("<>") {
        (left.trim(), right.trim(), true)
    } else if let Some((left, right)) = cond.split_once('=') {
        (left.trim(), right.trim(), false)
    } else {
        return Err(BasicError::MalformedCondition { line, cond: cond.to_string() });
    };

    let mut code = compile_expr(left, line)?;
    code.push("MOV R3, R0".to_string());
    code.extend(compile_expr(right, line)?);
    code.push("CMP R3, R0".to_string());

    Ok(Condition { code, negated })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_condition_compares_into_flag() {
        let cond = compile_condition("A = 5", 1).unwrap();
        assert!(!cond.negated);
        assert_eq!(
            cond.code,
            vec!["LDM R0, 0x0100", "MOV R3, R0", "LDI R0, 5", "CMP R3, R0"]
        );
    }

    #[test]
    fn not_equal_condition_is_negated() {
        let cond = compile_condition("A <> B", 1).unwrap();
        assert!(cond.negated);
    }

    #[test]
    fn missing_operator_is_a_hard_error() {
        assert!(matches!(
            compile_condition("A", 1),
            Err(BasicError::MalformedCondition { .. })
        ));
    }
}
