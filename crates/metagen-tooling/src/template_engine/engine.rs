//! Tera wrapper holding the override templates of one directory.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use super::filters;
use super::loader::{load_templates_from_dir, LoaderError};

#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
    dir: PathBuf,
}

impl TemplateEngine {
    /// Load all override templates in `template_dir` and register filters.
    pub fn load(template_dir: &Path) -> Result<Self, EngineError> {
        let mut tera = load_templates_from_dir(template_dir)?;
        filters::register(&mut tera);
        debug!(
            dir = %template_dir.display(),
            templates = tera.get_template_names().count(),
            "Loaded override templates"
        );
        Ok(Self {
            tera,
            dir: template_dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|t| t == name)
    }

    /// Render `name` with the view model exposed as `ctx`.
    pub fn render<T: Serialize>(&self, name: &str, view: &T) -> Result<String, EngineError> {
        let render_error = |source| EngineError::Render {
            template: name.to_string(),
            source,
        };
        let mut context = Context::new();
        context.try_insert("ctx", view).map_err(render_error)?;
        self.tera.render(name, &context).map_err(render_error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("render error for '{template}': {}", chain(source))]
    Render {
        template: String,
        source: tera::Error,
    },
}

impl From<EngineError> for crate::Error {
    fn from(e: EngineError) -> Self {
        crate::Error::template(e.to_string())
    }
}

/// Tera's top-level message is generic; the useful detail sits in the
/// source chain.
fn chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Serialize)]
    struct View {
        table: &'static str,
        columns: Vec<&'static str>,
    }

    fn view() -> View {
        View {
            table: "user_login_log",
            columns: vec!["id", "created_at"],
        }
    }

    #[test]
    fn test_render_exposes_view_as_ctx_with_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("struct.go.tera"),
            "type {{ ctx.table | pascal_case }} struct {\n{% for c in ctx.columns %}\t{{ c | pascal_case }}\n{% endfor %}}\n",
        )
        .unwrap();

        let engine = TemplateEngine::load(dir.path()).unwrap();
        assert!(engine.has_template("struct.go.tera"));
        assert!(!engine.has_template("markdown.md.tera"));
        assert_eq!(engine.dir(), dir.path());

        let out = engine.render("struct.go.tera", &view()).unwrap();
        assert_eq!(out, "type UserLoginLog struct {\n\tId\n\tCreatedAt\n}\n");
    }

    #[test]
    fn test_render_error_names_template_and_cause() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("markdown.md.tera"), "{{ ctx.missing_field }}").unwrap();

        let engine = TemplateEngine::load(dir.path()).unwrap();
        let err = engine.render("markdown.md.tera", &view()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("markdown.md.tera"));
        assert!(msg.contains("missing_field"));

        let converted: crate::Error = err.into();
        assert_eq!(converted.kind(), "template");
    }

    #[test]
    fn test_load_error_converts_to_template_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateEngine::load(&dir.path().join("absent")).unwrap_err();
        let converted: crate::Error = err.into();
        assert_eq!(converted.kind(), "template");
        assert!(converted.to_string().contains("does not exist"));
    }
}
