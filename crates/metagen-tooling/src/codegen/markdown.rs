//! Markdown table documentation view model.

use serde::Serialize;

use super::escape::{flatten, markdown_cell};
use crate::schema::{Column, Table};

/// Column titles of the generated table.
pub const HEADER: [&str; 8] = [
    "No.", "Name", "Type", "Key", "Nullable", "Extra", "Default", "Comment",
];

/// Centered alignment row matching the cell widths.
pub const ALIGN: &str = "| :---: | :-------------: | :-------------: | :---: | :---: | :------------------: | :--------: | :------------------: |";

fn grid_line(cells: [&str; 8]) -> String {
    format!(
        "| {:>5} | {:>15} | {:>15} | {:>5} | {:>5} | {:>20} | {:>10} | {:>20} |",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
    )
}

/// One table row; every text cell is already escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownRow {
    pub ordinal: u32,
    pub name: String,
    pub column_type: String,
    pub key: String,
    pub nullable: String,
    pub extra: String,
    pub default: String,
    pub comment: String,
    /// The full `| ... |` line
    pub line: String,
}

impl From<&Column> for MarkdownRow {
    fn from(column: &Column) -> Self {
        let cell = |value: Option<&str>| markdown_cell(value.unwrap_or_default());
        let ordinal = column.ordinal_position;
        let name = markdown_cell(&column.name);
        let column_type = markdown_cell(&column.column_type);
        let key = cell(column.key.as_deref());
        let nullable = if column.nullable { "YES" } else { "NO" }.to_string();
        let extra = cell(column.extra.as_deref());
        let default = cell(column.default_value.as_deref());
        let comment = cell(column.comment.as_deref());

        let line = grid_line([
            &ordinal.to_string(),
            &name,
            &column_type,
            &key,
            &nullable,
            &extra,
            &default,
            &comment,
        ]);

        Self {
            ordinal,
            name,
            column_type,
            key,
            nullable,
            extra,
            default,
            comment,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownContext {
    pub schema: String,
    pub table: String,
    /// Table comment on one line, may be empty
    pub comment: String,
    pub header: String,
    pub align: String,
    pub rows: Vec<MarkdownRow>,
}

impl From<&Table> for MarkdownContext {
    fn from(table: &Table) -> Self {
        Self {
            schema: table.schema.clone(),
            table: table.name.clone(),
            comment: flatten(&table.comment),
            header: grid_line(HEADER),
            align: ALIGN.to_string(),
            rows: table.columns.iter().map(MarkdownRow::from).collect(),
        }
    }
}
