//! Minimal CSV codec for the score ledger.
//!
//! One record per line; fields containing commas, quotes or newlines are
//! quoted, with embedded quotes doubled. Records never span lines: crew,
//! judge and age-group names are single-line by construction, so the
//! parser treats an unterminated quote as a malformed row.

/// Encode a single field, quoting when needed
pub fn encode_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encode one row
pub fn encode_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| encode_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse one row into fields.
///
/// Returns `None` for malformed rows (unterminated quote).
pub fn parse_row(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        current.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => current.push(c),
            }
        } else {
            match c {
                '"' if current.is_empty() => in_quotes = true,
                ',' => {
                    fields.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }
    }

    if in_quotes {
        return None;
    }

    fields.push(current);
    Some(fields)
}
