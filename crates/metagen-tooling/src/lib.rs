//! Metadata extraction and code generation for metagen: Go constant
//! comments, MySQL table schemas, and the templates that turn them into Go
//! and Markdown files.
//!
//! This crate holds everything `metagen-ctl` does apart from argument and
//! config handling. Pipelines take explicit job structs and never read the
//! environment.
//!
//! # Modules
//!
//! - [`codegen`]: View models, Go type mapping, identifier casing and rendering
//! - [`comment`]: Constant comment extraction from Go source
//! - [`error`]: Error taxonomy shared by every stage
//! - [`format`]: Source formatters applied to generated Go code
//! - [`pipeline`]: End-to-end runs that read, render and write one file
//! - [`schema`]: Table metadata and the MySQL `information_schema` reader
//! - [`template_engine`]: Tera-based user template overrides

pub mod codegen;
pub mod comment;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod schema;
pub mod template_engine;

mod golex;

pub use error::{Error, Result};
