//! MySQL base data type to Go type mapping.
//!
//! The table is fixed. Types outside of it map to [`GoType::Unknown`], whose
//! rendered name is the empty string; callers never get an error for an
//! unmapped type.

use std::fmt;

/// Go primitive a MySQL column is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoType {
    Int64,
    Float64,
    Time,
    String,
    /// No mapping exists for the base type
    Unknown,
}

/// Every base data type the mapper knows about.
pub const MAPPED_DATA_TYPES: &[&str] = &[
    "tinyint",
    "smallint",
    "mediumint",
    "int",
    "integer",
    "bigint",
    "float",
    "double",
    "decimal",
    "date",
    "time",
    "year",
    "datetime",
    "timestamp",
    "char",
    "varchar",
    "tinyblob",
    "tinytext",
    "blob",
    "text",
    "mediumblob",
    "mediumtext",
    "longblob",
    "longtext",
];

impl GoType {
    /// Map a base data type (`DATA_TYPE`, e.g. `varchar`) to its Go type.
    /// The lookup is exact; MySQL reports `DATA_TYPE` in lowercase.
    pub fn from_data_type(data_type: &str) -> Self {
        match data_type {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => GoType::Int64,
            "float" | "double" | "decimal" => GoType::Float64,
            "datetime" | "timestamp" => GoType::Time,
            "date" | "time" | "year" | "char" | "varchar" | "tinyblob" | "tinytext" | "blob"
            | "text" | "mediumblob" | "mediumtext" | "longblob" | "longtext" => GoType::String,
            _ => GoType::Unknown,
        }
    }

    /// Go source spelling of the type; empty for [`GoType::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            GoType::Int64 => "int64",
            GoType::Float64 => "float64",
            GoType::Time => "time.Time",
            GoType::String => "string",
            GoType::Unknown => "",
        }
    }

    /// Whether a file using this type must import `time`.
    pub fn needs_time_import(&self) -> bool {
        matches!(self, GoType::Time)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, GoType::Unknown)
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Go type name for a base data type, or `""` when unmapped.
pub fn map_data_type(data_type: &str) -> &'static str {
    GoType::from_data_type(data_type).as_str()
}
