//! Identifier casing for generated Go code.

/// Convert a snake_case (or space separated) database identifier to
/// UpperCamelCase, e.g. `user_name` → `UserName`.
///
/// Only `_` and whitespace separate words, and each word is title-cased:
/// first letter upper, the rest lower, so `createTime` → `Createtime`.
/// Other punctuation is kept and starts a new title-cased word
/// (`user-name` → `User-Name`). Repeated separators collapse, so `a__b` →
/// `AB`.
pub fn to_upper_camel(identifier: &str) -> String {
    identifier
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect()
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for c in word.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'');
    }
    out
}

/// Derive a Go package name from a table name: lowercase ASCII letters,
/// digits and underscores only. Falls back to `model` when nothing usable
/// remains.
pub fn go_package_name(name: &str) -> String {
    let mut pkg: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if pkg.starts_with(|c: char| c.is_ascii_digit()) {
        pkg.insert(0, '_');
    }
    if pkg.is_empty() {
        pkg.push_str("model");
    }
    pkg
}
