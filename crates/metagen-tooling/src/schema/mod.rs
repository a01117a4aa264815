//! Table metadata read from a relational catalog.
//!
//! [`SchemaCatalog`] is the seam between the renderers and the database:
//! [`MySqlCatalog`] answers it from `information_schema`, tests answer it
//! from memory.

mod mysql;

#[cfg(test)]
pub(crate) mod memory;

pub use mysql::{DatabaseConfig, MySqlCatalog, DEFAULT_MYSQL_PORT};

use async_trait::async_trait;

use crate::codegen::naming::to_upper_camel;
use crate::codegen::types::GoType;
use crate::error::{Error, Result};

/// One column of a table, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// 1-based position in the table definition
    pub ordinal_position: u32,
    pub name: String,
    /// Full declared type, e.g. `varchar(255)`
    pub column_type: String,
    /// Base data type, e.g. `varchar`
    pub data_type: String,
    /// `PRI`, `UNI`, `MUL` or empty
    pub key: Option<String>,
    pub nullable: bool,
    /// e.g. `auto_increment`
    pub extra: Option<String>,
    pub comment: Option<String>,
    pub default_value: Option<String>,
}

impl Column {
    pub fn is_primary_key(&self) -> bool {
        self.key.as_deref() == Some("PRI")
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("auto_increment"))
    }

    pub fn go_type(&self) -> GoType {
        GoType::from_data_type(&self.data_type)
    }

    /// Go field name for this column.
    pub fn field_name(&self) -> String {
        to_upper_camel(&self.name)
    }

    /// Column comment, or `""` when the catalog has none.
    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or_default()
    }
}

/// A table and its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    /// Table comment; may be empty
    pub comment: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// Build a table, ordering columns by ordinal position.
    ///
    /// Ordinals must be unique and start at 1; anything else means the
    /// catalog answered with rows from more than one table.
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        comment: impl Into<String>,
        mut columns: Vec<Column>,
    ) -> Result<Self> {
        let name = name.into();
        columns.sort_by_key(|c| c.ordinal_position);

        if let Some(first) = columns.first() {
            if first.ordinal_position == 0 {
                return Err(Error::query(format!(
                    "column '{}' of table '{}' has ordinal position 0",
                    first.name, name
                )));
            }
        }
        if let Some(pair) = columns
            .windows(2)
            .find(|w| w[0].ordinal_position == w[1].ordinal_position)
        {
            return Err(Error::query(format!(
                "columns '{}' and '{}' of table '{}' share ordinal position {}",
                pair[0].name, pair[1].name, name, pair[0].ordinal_position
            )));
        }

        Ok(Self {
            schema: schema.into(),
            name,
            comment: comment.into(),
            columns,
        })
    }

    /// Whether any column renders as `time.Time`.
    pub fn uses_time(&self) -> bool {
        self.columns.iter().any(|c| c.go_type().needs_time_import())
    }
}

/// Read-only access to table metadata.
#[async_trait]
pub trait SchemaCatalog: Send {
    /// Comment of exactly one table. Zero or several matching rows is a
    /// [`Error::Query`].
    async fn fetch_table_comment(&mut self, schema: &str, table: &str) -> Result<String>;

    /// Columns of a table ordered by ordinal position ascending.
    async fn fetch_columns(&mut self, schema: &str, table: &str) -> Result<Vec<Column>>;

    /// Comment and columns combined into a [`Table`].
    async fn fetch_table(&mut self, schema: &str, table: &str) -> Result<Table> {
        let comment = self.fetch_table_comment(schema, table).await?;
        let columns = self.fetch_columns(schema, table).await?;
        tracing::debug!(schema, table, columns = columns.len(), "Fetched table metadata");
        Table::new(schema, table, comment, columns)
    }
}
