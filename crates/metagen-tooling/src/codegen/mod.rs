//! Code and documentation generation from table metadata and constant
//! comments.
//!
//! Each output kind has a serializable view model ([`StructContext`],
//! [`MarkdownContext`], [`ConstContext`]) built from the extracted metadata.
//! [`Renderer`] turns a view model into text with either the built-in Askama
//! template or a user override, then formats Go output.

pub mod constants;
pub mod escape;
pub mod markdown;
pub mod naming;
pub mod render;
pub mod structs;
pub mod types;

pub use constants::{ConstContext, ConstEntry};
pub use markdown::{MarkdownContext, MarkdownRow};
pub use render::{RenderMode, Renderer};
pub use structs::{gorm_tag, StructContext, StructField};
pub use types::{map_data_type, GoType};
