use crate::error::AssembleError;

/// Strips a `;`-to-end-of-line comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

/// Splits an operand list on whitespace, treating commas as whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    line.replace(',', " ").split_whitespace().map(str::to_owned).collect()
}

pub fn parse_number(token: &str, line: usize) -> Result<i64, AssembleError> {
    let trimmed = token.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<i64>()
    };
    parsed.map_err(|_| AssembleError::MalformedNumber { line, literal: token.to_string() })
}

/// Extracts the text between the first and last double quote on the line.
pub fn extract_string<'a>(line: &'a str, line_no: usize) -> Result<&'a str, AssembleError> {
    let start = line.find('"').ok_or(AssembleError::UnterminatedString { line: line_no })?;
    let end = line.rfind('"').ok_or(AssembleError::UnterminatedString { line: line_no })?;
    if end <= start {
        return Err(AssembleError::UnterminatedString { line: line_no });
    }
    Ok(&line[start + 1..end])
}

/// Encodes a string literal's body into its null-terminated byte form, resolving the `\n`, `\"`,
/// and `\\` escapes. Any other backslash sequence is a hard error.
pub fn encode_string(s: &str, line_no: usize) -> Result<Vec<u8>, AssembleError> {
    let chars: Vec<char> = s.chars().collect();
    let mut result = Vec::with_capacity(chars.len() + 1);
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            match chars[i + 1] {
                'n' => result.push(b'\n'),
                '"' => result.push(b'"'),
                '\\' => result.push(b'\\'),
                other => return Err(AssembleError::UnknownEscape { line: line_no, escape: other }),
            }
            i += 2;
        } else {
            result.push(chars[i] as u8);
            i += 1;
        }
    }
    result.push(0);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comment_and_trims() {
        assert_eq!(strip_comment("  LDI R0, 5 ; load five"), "LDI R0, 5");
        assert_eq!(strip_comment("; only comment"), "");
    }

    #[test]
    fn tokenizes_commas_as_whitespace() {
        assert_eq!(tokenize("LDI R0, 5"), vec!["LDI", "R0", "5"]);
    }

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_number("0x10", 1).unwrap(), 16);
        assert_eq!(parse_number("0X10", 1).unwrap(), 16);
        assert_eq!(parse_number("16", 1).unwrap(), 16);
    }

    #[test]
    fn rejects_malformed_number() {
        assert!(parse_number("abc", 1).is_err());
    }

    #[test]
    fn encodes_known_escapes_and_null_terminates() {
        let encoded = encode_string(r#"Hi\n\"\\"#, 1).unwrap();
        assert_eq!(encoded, vec![b'H', b'i', b'\n', b'"', b'\\', 0]);
    }

    #[test]
    fn rejects_unknown_escape() {
        assert_eq!(encode_string(r"\q", 1), Err(AssembleError::UnknownEscape { line: 1, escape: 'q' }));
    }
}
