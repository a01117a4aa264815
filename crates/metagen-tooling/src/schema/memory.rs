//! In-memory catalog for exercising pipelines without a database.

use async_trait::async_trait;

use super::{Column, SchemaCatalog};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct MemoryCatalog {
    tables: Vec<(String, String, String, Vec<Column>)>,
    pub queries: usize,
}

impl MemoryCatalog {
    pub fn with_table(
        mut self,
        schema: &str,
        table: &str,
        comment: &str,
        columns: Vec<Column>,
    ) -> Self {
        self.tables.push((
            schema.to_string(),
            table.to_string(),
            comment.to_string(),
            columns,
        ));
        self
    }

    fn matching(&self, schema: &str, table: &str) -> Vec<&(String, String, String, Vec<Column>)> {
        self.tables
            .iter()
            .filter(|(s, t, _, _)| s == schema && t == table)
            .collect()
    }
}

#[async_trait]
impl SchemaCatalog for MemoryCatalog {
    async fn fetch_table_comment(&mut self, schema: &str, table: &str) -> Result<String> {
        self.queries += 1;
        match self.matching(schema, table).as_slice() {
            [(_, _, comment, _)] => Ok(comment.clone()),
            [] => Err(Error::query(format!("table {schema}.{table} not found"))),
            many => Err(Error::query(format!(
                "table comment lookup for {schema}.{table} returned {} rows",
                many.len()
            ))),
        }
    }

    async fn fetch_columns(&mut self, schema: &str, table: &str) -> Result<Vec<Column>> {
        self.queries += 1;
        let mut columns: Vec<Column> = self
            .matching(schema, table)
            .into_iter()
            .flat_map(|(_, _, _, cols)| cols.iter().cloned())
            .collect();
        columns.sort_by_key(|c| c.ordinal_position);
        Ok(columns)
    }
}

/// Column fixture with everything optional left unset.
pub(crate) fn column(ordinal: u32, name: &str, column_type: &str) -> Column {
    let data_type = column_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_string();
    Column {
        ordinal_position: ordinal,
        name: name.to_string(),
        column_type: column_type.to_string(),
        data_type,
        key: None,
        nullable: true,
        extra: None,
        comment: None,
        default_value: None,
    }
}

/// `users(id bigint PRI auto_increment, name varchar(50))`.
pub(crate) fn users_columns() -> Vec<Column> {
    let mut id = column(1, "id", "bigint");
    id.key = Some("PRI".to_string());
    id.nullable = false;
    id.extra = Some("auto_increment".to_string());
    id.comment = Some("primary key".to_string());

    let mut name = column(2, "name", "varchar(50)");
    name.key = Some(String::new());
    name.extra = Some(String::new());
    name.comment = Some("display name".to_string());

    vec![id, name]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_table_through_default_method() {
        let mut catalog =
            MemoryCatalog::default().with_table("mydb", "users", "Users table", users_columns());
        let table = catalog.fetch_table("mydb", "users").await.unwrap();
        assert_eq!(table.comment, "Users table");
        assert_eq!(table.columns.len(), 2);
        assert_eq!(catalog.queries, 2);
    }

    #[tokio::test]
    async fn test_missing_table_is_query_error() {
        let mut catalog = MemoryCatalog::default();
        let err = catalog.fetch_table("mydb", "ghost").await.unwrap_err();
        assert_eq!(err.kind(), "query");
        assert_eq!(catalog.queries, 1);
    }

    #[tokio::test]
    async fn test_ambiguous_table_is_query_error() {
        let mut catalog = MemoryCatalog::default()
            .with_table("mydb", "users", "a", vec![])
            .with_table("mydb", "users", "b", vec![]);
        let err = catalog.fetch_table_comment("mydb", "users").await.unwrap_err();
        assert!(err.to_string().contains("returned 2 rows"));
    }
}
