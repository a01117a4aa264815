//! Text sanitizers applied before values are placed into generated output.

/// Remove carriage returns and newlines so a value fits on one line.
pub fn flatten(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

/// Make text safe for a Markdown table cell: one line, `|` escaped.
pub fn markdown_cell(text: &str) -> String {
    flatten(text).replace('|', "\\|")
}

/// Make text safe inside a gorm tag value.
///
/// The tag lives in a Go raw string, so backticks become `'`. The value is
/// later unquoted by `reflect.StructTag`, so `\` and `"` are escaped, and
/// gorm's `;` separator is written as the escaped `\;`.
pub fn gorm_tag_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in flatten(text).chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            ';' => out.push_str("\\\\;"),
            '`' => out.push('\''),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text as the body of a Go interpreted string literal.
pub fn go_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
