use crate::condition::compile_condition;
use crate::error::BasicError;
use crate::expr::compile_expr;
use crate::strings::StringTable;

fn tokenize(stmt: &str) -> Vec<String> {
    stmt.replace(',', " ").split_whitespace().map(str::to_owned).collect()
}

/// Compiles one BASIC statement (a label, if any, has already been stripped) into assembly lines.
pub fn compile_statement(
    line: usize,
    stmt: &str,
    strings: &mut StringTable,
) -> Result<Vec<String>, BasicError> {
    let tokens = tokenize(stmt);
    let Some(first) = tokens.first() else { return Ok(Vec::new()) };
    let cmd = first.to_ascii_uppercase();

    match cmd.as_str() {
        "LET" => {
            let var = tokens.get(1).ok_or_else(|| missing(line, stmt))?;
            let expr = stmt
                .splitn(2, '=')
                .nth(1)
                .ok_or_else(|| missing(line, stmt))?
                .trim();
            let mut code = compile_expr(expr, line)?;
            code.push(format!("STM R0, 0x{:04X}", karambit_vm::isa::var_addr(var.chars().next().unwrap())));
            Ok(code)
        }

        "PRINT" => {
            let start = stmt.find('"');
            let end = stmt.rfind('"');
            let (Some(start), Some(end)) = (start, end) else {
                return Err(BasicError::PrintRequiresLiteral { line });
            };
            if end <= start {
                return Err(BasicError::PrintRequiresLiteral { line });
            }
            let text = &stmt[start + 1..end];
            let (addr, _label) = strings.push(text);
            Ok(vec![
                format!("LDI R0, {}", addr & 0xFF),
                format!("LDI R1, {}", (addr >> 8) & 0xFF),
                "SYS 1".to_string(),
            ])
        }

        "PRINTC" => {
            let expr = tokens[1..].join(" ");
            let mut code = compile_expr(&expr, line)?;
            code.push("SYS 0".to_string());
            Ok(code)
        }

        "CLS" => Ok(vec!["SYS 2".to_string()]),

        "PLOT" => {
            if tokens.len() < 4 {
                return Err(missing(line, stmt));
            }
            let mut code = compile_expr(&tokens[1], line)?;
            code.push("MOV R3, R0".to_string());
            code.extend(compile_expr(&tokens[2], line)?);
            code.push("MOV R1, R0".to_string());
            code.push("MOV R0, R3".to_string());
            code.extend(compile_expr(&tokens[3], line)?);
            code.push("MOV R2, R0".to_string());
            code.push("SYS 3".to_string());
            Ok(code)
        }

        "RENDER" => Ok(vec!["SYS 4".to_string()]),

        "SLEEP" => {
            let expr = tokens[1..].join(" ");
            let mut code = compile_expr(&expr, line)?;
            code.push("SYS 5".to_string());
            Ok(code)
        }

        "KEY" => {
            let var = tokens.get(1).ok_or_else(|| missing(line, stmt))?;
            Ok(vec![
                "SYS 6".to_string(),
                format!("STM R0, 0x{:04X}", karambit_vm::isa::var_addr(var.chars().next().unwrap())),
            ])
        }

        "GOTO" => {
            let label = tokens.get(1).ok_or_else(|| missing(line, stmt))?;
            Ok(vec![format!("JMP {label}")])
        }

        "IF" => {
            let upper = stmt.to_ascii_uppercase();
            let then_idx = upper.find("THEN").ok_or(BasicError::MalformedIfThenGoto { line })?;
            let cond_text = stmt[2..then_idx].trim();
            let goto_part = stmt[then_idx + 4..].trim();
            let goto_tokens = tokenize(goto_part);
            if goto_tokens.len() != 2 || !goto_tokens[0].eq_ignore_ascii_case("GOTO") {
                return Err(BasicError::MalformedIfThenGoto { line });
            }
            let label = &goto_tokens[1];

            let condition = compile_condition(cond_text, line)?;
            let mut code = condition.code;
            code.push(if condition.negated { format!("JNZ {label}") } else { format!("JZ {label}") });
            Ok(code)
        }

        "END" => Ok(vec!["HLT".to_string()]),

        _ => Err(BasicError::UnknownStatement { line, keyword: first.to_string() }),
    }
}

fn missing(line: usize, stmt: &str) -> BasicError {
    BasicError::MissingOperand { line, statement: stmt.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_assigns_expression_to_variable() {
        let mut strings = StringTable::new();
        let code = compile_statement(1, "LET A = 5", &mut strings).unwrap();
        assert_eq!(code, vec!["LDI R0, 5", "STM R0, 0x0100"]);
    }

    #[test]
    fn print_records_a_string_and_loads_its_address() {
        let mut strings = StringTable::new();
        let code = compile_statement(1, "PRINT \"Hi\"", &mut strings).unwrap();
        assert_eq!(code, vec!["LDI R0, 0", "LDI R1, 48", "SYS 1"]);
        assert!(!strings.is_empty());
    }

    #[test]
    fn print_without_a_literal_is_a_hard_error() {
        let mut strings = StringTable::new();
        assert_eq!(
            compile_statement(1, "PRINT A", &mut strings),
            Err(BasicError::PrintRequiresLiteral { line: 1 })
        );
    }

    #[test]
    fn if_then_goto_compiles_condition_and_branch() {
        let mut strings = StringTable::new();
        let code = compile_statement(1, "IF A = 5 THEN GOTO done", &mut strings).unwrap();
        assert_eq!(code.last().unwrap(), "JZ done");
    }

    #[test]
    fn if_without_then_is_a_hard_error() {
        let mut strings = StringTable::new();
        assert_eq!(
            compile_statement(1, "IF A = 5 GOTO done", &mut strings),
            Err(BasicError::MalformedIfThenGoto { line: 1 })
        );
    }

    #[test]
    fn unknown_statement_is_a_hard_error() {
        let mut strings = StringTable::new();
        assert_eq!(
            compile_statement(1, "FROBNICATE A", &mut strings),
            Err(BasicError::UnknownStatement { line: 1, keyword: "FROBNICATE".to_string() })
        );
    }
}
