//! Constant-lookup view model: a Go `GetMsg` table built from constant
//! comments.

use std::collections::BTreeMap;

use serde::Serialize;

use super::escape::go_string;

/// Const type for which no `String()` method is generated.
pub const DEFAULT_CONST_TYPE: &str = "int";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstEntry {
    /// Constant identifier
    pub name: String,
    /// Extracted comment text
    pub message: String,
    /// `message` escaped for a Go string literal
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstContext {
    pub package: String,
    pub const_type: String,
    /// Sorted by constant name
    pub entries: Vec<ConstEntry>,
    /// Whether `func (code T) String() string` is generated
    pub emit_stringer: bool,
}

impl ConstContext {
    pub fn new(package: &str, const_type: &str, comments: &BTreeMap<String, String>) -> Self {
        let const_type = match const_type.trim() {
            "" => DEFAULT_CONST_TYPE,
            other => other,
        };
        let entries = comments
            .iter()
            .map(|(name, message)| ConstEntry {
                name: name.clone(),
                message: message.clone(),
                literal: go_string(message),
            })
            .collect();

        Self {
            package: package.to_string(),
            const_type: const_type.to_string(),
            entries,
            emit_stringer: const_type != DEFAULT_CONST_TYPE,
        }
    }
}
