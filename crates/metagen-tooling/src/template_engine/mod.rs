//! Runtime templates that override the built-in renderers.
//!
//! A template directory holds `.tera` files named after the output they
//! replace (`struct.go.tera`, `markdown.md.tera`, `constants.go.tera`). Each
//! receives the same view model the built-in template gets, and can use the
//! case-conversion filters registered in [`filters`].

mod engine;
mod filters;
mod loader;

pub use engine::{EngineError, TemplateEngine};
pub use loader::LoaderError;
