//! Go data-model struct view model with gorm tags.

use serde::Serialize;
use tracing::warn;

use super::escape::{flatten, go_string, gorm_tag_value};
use super::naming::{go_package_name, to_upper_camel};
use crate::schema::{Column, Table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructField {
    /// Go field name
    pub name: String,
    /// Go type, empty when the column type has no mapping
    pub go_type: String,
    /// Column name as declared
    pub column: String,
    /// Struct tag body without the surrounding backticks
    pub tag: String,
    /// Single-line column comment, may be empty
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructContext {
    pub package: String,
    pub struct_name: String,
    pub table_name: String,
    /// `table_name` escaped for the `TableName()` string literal
    pub table_literal: String,
    pub comment: String,
    pub needs_time_import: bool,
    pub fields: Vec<StructField>,
}

impl StructContext {
    /// Build the view model for `table`. The package defaults to one derived
    /// from the table name.
    pub fn from_table(table: &Table, package: Option<&str>) -> Self {
        let fields = table
            .columns
            .iter()
            .map(|column| {
                let go_type = column.go_type();
                if !go_type.is_known() {
                    warn!(
                        table = %table.name,
                        column = %column.name,
                        data_type = %column.data_type,
                        "No Go type for column data type; field type left empty"
                    );
                }
                StructField {
                    name: column.field_name(),
                    go_type: go_type.as_str().to_string(),
                    column: column.name.clone(),
                    tag: gorm_tag(column),
                    comment: flatten(column.comment_text()),
                }
            })
            .collect();

        Self {
            package: package
                .filter(|p| !p.trim().is_empty())
                .map_or_else(|| go_package_name(&table.name), |p| p.trim().to_string()),
            struct_name: to_upper_camel(&table.name),
            table_name: table.name.clone(),
            table_literal: go_string(&table.name),
            comment: flatten(&table.comment),
            needs_time_import: table.uses_time(),
            fields,
        }
    }
}

/// The gorm struct tag for a column, e.g.
/// `gorm:"column:id;primary_key;AUTO_INCREMENT;NOT NULL;comment:'primary key'"`.
///
/// Markers appear only when the column has the attribute. An empty default
/// is written as `default:''` so it stays distinguishable from no default.
pub fn gorm_tag(column: &Column) -> String {
    let mut parts = vec![format!("column:{}", gorm_tag_value(&column.name))];

    if column.is_primary_key() {
        parts.push("primary_key".to_string());
    }
    if column.is_auto_increment() {
        parts.push("AUTO_INCREMENT".to_string());
    }
    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }
    match column.default_value.as_deref() {
        Some("") => parts.push("default:''".to_string()),
        Some(value) => parts.push(format!("default:{}", gorm_tag_value(value))),
        None => {}
    }
    let comment = column.comment_text();
    if !comment.is_empty() {
        parts.push(format!("comment:'{}'", gorm_tag_value(comment)));
    }

    format!("gorm:\"{}\"", parts.join(";"))
}
