//! MySQL catalog reader over a single connection.
//!
//! Only two read-only statements are ever issued, both against
//! `information_schema`. Text columns are cast to `CHAR` because MySQL 8
//! reports several catalog columns with a binary collation, which the driver
//! refuses to decode as `String`.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::debug;

use super::{Column, SchemaCatalog};
use crate::error::{Error, Result};

pub const DEFAULT_MYSQL_PORT: u16 = 3306;

const TABLE_COMMENT_SQL: &str = "SELECT CAST(TABLE_COMMENT AS CHAR) AS table_comment \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?";

const COLUMNS_SQL: &str = "SELECT \
     CAST(ORDINAL_POSITION AS UNSIGNED) AS ordinal_position, \
     CAST(COLUMN_NAME AS CHAR) AS column_name, \
     CAST(COLUMN_TYPE AS CHAR) AS column_type, \
     CAST(DATA_TYPE AS CHAR) AS data_type, \
     CAST(COLUMN_KEY AS CHAR) AS column_key, \
     CAST(IS_NULLABLE AS CHAR) AS is_nullable, \
     CAST(EXTRA AS CHAR) AS extra, \
     CAST(COLUMN_COMMENT AS CHAR) AS column_comment, \
     CAST(COLUMN_DEFAULT AS CHAR) AS column_default \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION ASC";

/// Connection settings for the catalog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `host:port`; the port defaults to 3306 when omitted
    pub addr: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Split `addr` into host and port.
    pub fn host_port(&self) -> Result<(String, u16)> {
        let addr = self.addr.trim();
        if addr.is_empty() {
            return Err(Error::connection("database address is empty"));
        }
        match addr.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    Error::connection(format!("invalid port in address '{addr}': {e}"))
                })?;
                if host.is_empty() {
                    return Err(Error::connection(format!(
                        "missing host in address '{addr}'"
                    )));
                }
                Ok((host.to_string(), port))
            }
            None => Ok((addr.to_string(), DEFAULT_MYSQL_PORT)),
        }
    }

    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        let (host, port) = self.host_port()?;
        let mut options = MySqlConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&self.user)
            .charset("utf8mb4");
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.database.is_empty() {
            options = options.database(&self.database);
        }
        Ok(options)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    ordinal_position: u64,
    column_name: String,
    column_type: String,
    data_type: String,
    column_key: Option<String>,
    is_nullable: String,
    extra: Option<String>,
    column_comment: Option<String>,
    column_default: Option<String>,
}

impl TryFrom<ColumnRow> for Column {
    type Error = Error;

    fn try_from(row: ColumnRow) -> Result<Self> {
        let ordinal_position = u32::try_from(row.ordinal_position).map_err(|_| {
            Error::query(format!(
                "ordinal position {} of column '{}' is out of range",
                row.ordinal_position, row.column_name
            ))
        })?;
        Ok(Column {
            ordinal_position,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            name: row.column_name,
            column_type: row.column_type,
            data_type: row.data_type,
            key: row.column_key,
            extra: row.extra,
            comment: row.column_comment,
            default_value: row.column_default,
        })
    }
}

/// Catalog backed by one MySQL connection.
///
/// Release it with [`MySqlCatalog::finish`] so the connection is closed on
/// both the success and the failure path.
#[derive(Debug)]
pub struct MySqlCatalog {
    conn: MySqlConnection,
}

impl MySqlCatalog {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;
        debug!(addr = %config.addr, database = %config.database, "Connecting to MySQL");
        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(|e| {
                Error::connection(format!(
                    "cannot connect to '{}' as '{}': {e}",
                    config.addr, config.user
                ))
            })?;
        Ok(Self { conn })
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| Error::connection(format!("failed to close connection: {e}")))
    }

    /// Close the connection and hand back the pipeline outcome. A pipeline
    /// error takes precedence over a close error.
    pub async fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        let closed = self.close().await;
        settle(closed, outcome)
    }
}

/// Combine the close result with the pipeline outcome. The connection has
/// already been closed either way; a pipeline error wins over a close error.
fn settle<T>(closed: Result<()>, outcome: Result<T>) -> Result<T> {
    let value = outcome?;
    closed?;
    Ok(value)
}

#[async_trait]
impl SchemaCatalog for MySqlCatalog {
    async fn fetch_table_comment(&mut self, schema: &str, table: &str) -> Result<String> {
        let rows: Vec<Option<String>> = sqlx::query_scalar(TABLE_COMMENT_SQL)
            .bind(schema)
            .bind(table)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| Error::query(format!("table comment lookup for {schema}.{table}: {e}")))?;

        match rows.as_slice() {
            [comment] => Ok(comment.clone().unwrap_or_default()),
            [] => Err(Error::query(format!("table {schema}.{table} not found"))),
            many => Err(Error::query(format!(
                "table comment lookup for {schema}.{table} returned {} rows",
                many.len()
            ))),
        }
    }

    async fn fetch_columns(&mut self, schema: &str, table: &str) -> Result<Vec<Column>> {
        let rows: Vec<ColumnRow> = sqlx::query_as(COLUMNS_SQL)
            .bind(schema)
            .bind(table)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| Error::query(format!("column lookup for {schema}.{table}: {e}")))?;

        debug!(schema, table, rows = rows.len(), "Fetched column rows");
        rows.into_iter().map(Column::try_from).collect()
    }
}
