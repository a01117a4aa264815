//! Template rendering for every output kind.

use std::path::Path;

use askama::Template;
use serde::Serialize;
use tracing::debug;

use super::{ConstContext, MarkdownContext, StructContext};
use crate::error::Result;
use crate::format::{BuiltinFormatter, SourceFormatter};
use crate::template_engine::TemplateEngine;

/// What is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Struct,
    Markdown,
    ConstLookup,
}

impl RenderMode {
    /// Name of the `.tera` file in a template directory that replaces the
    /// built-in template.
    pub fn override_file_name(self) -> &'static str {
        match self {
            RenderMode::Struct => "struct.go.tera",
            RenderMode::Markdown => "markdown.md.tera",
            RenderMode::ConstLookup => "constants.go.tera",
        }
    }

    /// Extension of the generated file.
    pub fn extension(self) -> &'static str {
        match self {
            RenderMode::Struct | RenderMode::ConstLookup => "go",
            RenderMode::Markdown => "md",
        }
    }

    /// Go output goes through the source formatter; Markdown does not.
    pub fn formats_output(self) -> bool {
        !matches!(self, RenderMode::Markdown)
    }
}

#[derive(Template, Debug)]
#[template(path = "codegen/struct.go", escape = "none")]
struct StructTemplate<'a> {
    ctx: &'a StructContext,
}

#[derive(Template, Debug)]
#[template(path = "codegen/table.md", escape = "none")]
struct MarkdownTemplate<'a> {
    ctx: &'a MarkdownContext,
}

#[derive(Template, Debug)]
#[template(path = "codegen/constants.go", escape = "none")]
struct ConstantsTemplate<'a> {
    ctx: &'a ConstContext,
}

/// Renders view models to final file contents.
#[derive(Debug)]
pub struct Renderer {
    overrides: Option<TemplateEngine>,
    formatter: Box<dyn SourceFormatter>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Box::new(BuiltinFormatter))
    }
}

impl Renderer {
    pub fn new(formatter: Box<dyn SourceFormatter>) -> Self {
        Self {
            overrides: None,
            formatter,
        }
    }

    /// Use the `.tera` files in `dir` in place of the built-in templates
    /// they name.
    pub fn with_template_dir(mut self, dir: &Path) -> Result<Self> {
        self.overrides = Some(TemplateEngine::load(dir)?);
        Ok(self)
    }

    pub fn render_struct(&self, ctx: &StructContext) -> Result<String> {
        self.render(RenderMode::Struct, ctx, || StructTemplate { ctx }.render())
    }

    pub fn render_markdown(&self, ctx: &MarkdownContext) -> Result<String> {
        self.render(RenderMode::Markdown, ctx, || MarkdownTemplate { ctx }.render())
    }

    pub fn render_constants(&self, ctx: &ConstContext) -> Result<String> {
        self.render(RenderMode::ConstLookup, ctx, || {
            ConstantsTemplate { ctx }.render()
        })
    }

    fn render<V, F>(&self, mode: RenderMode, view: &V, builtin: F) -> Result<String>
    where
        V: Serialize,
        F: FnOnce() -> askama::Result<String>,
    {
        let name = mode.override_file_name();
        let rendered = match &self.overrides {
            Some(engine) if engine.has_template(name) => {
                debug!(template = name, dir = %engine.dir().display(), "Rendering override template");
                engine.render(name, view)?
            }
            _ => builtin()?,
        };

        if mode.formats_output() {
            self.formatter.format(&rendered)
        } else {
            let mut text = rendered.trim_end().to_string();
            text.push('\n');
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use super::*;
    use crate::error::Error;
    use crate::format::Passthrough;
    use crate::schema::memory::{column, users_columns};
    use crate::schema::Table;

    fn users() -> Table {
        Table::new("mydb", "users", "Users table", users_columns()).unwrap()
    }

    #[derive(Debug)]
    struct Rejecting;

    impl SourceFormatter for Rejecting {
        fn format(&self, _source: &str) -> Result<String> {
            Err(Error::format("expected declaration"))
        }
    }

    #[test]
    fn test_markdown_for_users_table() {
        let out = Renderer::default()
            .render_markdown(&MarkdownContext::from(&users()))
            .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "#### mydb.users");
        assert_eq!(lines[1], "Users table");
        assert_eq!(lines[2], "");
        assert!(lines[3].contains("No.") && lines[3].contains("Comment"));
        assert!(lines[4].starts_with("| :---: |"));
        assert_eq!(lines.len(), 7);
        assert!(lines[5].contains(" id ") && lines[5].contains("primary key"));
        assert!(lines[6].contains(" name ") && lines[6].contains("varchar(50)"));
        assert!(out.ends_with("|\n"));
    }

    #[test]
    fn test_markdown_without_comment_skips_line() {
        let table = Table::new("mydb", "users", "", users_columns()).unwrap();
        let out = Renderer::default()
            .render_markdown(&MarkdownContext::from(&table))
            .unwrap();
        assert!(out.starts_with("#### mydb.users\n\n| "));
    }

    #[test]
    fn test_struct_output() {
        let out = Renderer::default()
            .render_struct(&StructContext::from_table(&users(), None))
            .unwrap();
        let expected = "package users\n\
            \n\
            // Users Users table\n\
            type Users struct {\n\
            \tId int64 `gorm:\"column:id;primary_key;AUTO_INCREMENT;NOT NULL;comment:'primary key'\"` // primary key\n\
            \tName string `gorm:\"column:name;comment:'display name'\"` // display name\n\
            }\n\
            \n\
            // TableName returns the table backing Users.\n\
            func (Users) TableName() string {\n\
            \treturn \"users\"\n\
            }\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_struct_table_name_literal_is_escaped() {
        let table = Table::new("mydb", "odd\"name\\x", "", users_columns()).unwrap();
        let out = Renderer::new(Box::new(Passthrough))
            .render_struct(&StructContext::from_table(&table, None))
            .unwrap();
        assert!(out.contains("\treturn \"odd\\\"name\\\\x\"\n"));
    }

    #[test]
    fn test_struct_imports_time_only_when_needed() {
        let table = Table::new(
            "mydb",
            "events",
            "",
            vec![column(1, "id", "int"), column(2, "created_at", "timestamp")],
        )
        .unwrap();
        let out = Renderer::default()
            .render_struct(&StructContext::from_table(&table, None))
            .unwrap();
        assert!(out.starts_with("package events\n\nimport \"time\"\n\n// Events maps the events table.\n"));
        assert!(out.contains("\tCreatedAt time.Time `gorm:\"column:created_at\"`\n"));

        let out = Renderer::default()
            .render_struct(&StructContext::from_table(&users(), None))
            .unwrap();
        assert!(!out.contains("import"));
    }

    #[test]
    fn test_constants_output() {
        let comments = BTreeMap::from([
            ("Success".to_string(), "ok".to_string()),
            ("ErrParam".to_string(), "invalid param".to_string()),
        ]);
        let out = Renderer::default()
            .render_constants(&ConstContext::new("errcode", "int", &comments))
            .unwrap();
        assert!(out.starts_with("// Code generated by metagen-ctl. DO NOT EDIT.\n"));
        assert!(out.contains("package errcode\n"));
        assert!(out.contains("const noMsg = \"unknown\"\n"));
        assert!(out.contains(
            "var messages = map[int]string{\n\tErrParam: \"invalid param\",\n\tSuccess: \"ok\",\n}\n"
        ));
        assert!(out.contains("func GetMsg(code int) string {\n\tif msg, ok := messages[code]; ok {\n\t\treturn msg\n\t}\n\treturn noMsg\n}\n"));
        assert!(!out.contains("String() string"));

        let out = Renderer::default()
            .render_constants(&ConstContext::new("errcode", "ErrCode", &comments))
            .unwrap();
        assert!(out.contains("func (code ErrCode) String() string {\n\treturn GetMsg(code)\n}\n"));
        assert!(out.contains("map[ErrCode]string{"));
    }

    #[test]
    fn test_format_failure_is_fatal_for_go_only() {
        let renderer = Renderer::new(Box::new(Rejecting));
        let err = renderer
            .render_struct(&StructContext::from_table(&users(), None))
            .unwrap_err();
        assert_eq!(err.kind(), "format");

        assert!(renderer
            .render_markdown(&MarkdownContext::from(&users()))
            .is_ok());
    }

    #[test]
    fn test_override_template_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("markdown.md.tera"),
            "# {{ ctx.table | pascal_case }}\n{% for row in ctx.rows %}- {{ row.name }} ({{ row.column_type }})\n{% endfor %}\n\n",
        )
        .unwrap();

        let renderer = Renderer::new(Box::new(Passthrough))
            .with_template_dir(dir.path())
            .unwrap();
        let out = renderer
            .render_markdown(&MarkdownContext::from(&users()))
            .unwrap();
        assert_eq!(out, "# Users\n- id (bigint)\n- name (varchar(50))\n");

        // No struct override in the directory: built-in template is used
        let out = renderer
            .render_struct(&StructContext::from_table(&users(), None))
            .unwrap();
        assert!(out.contains("type Users struct {"));
    }

    #[test]
    fn test_broken_override_is_template_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("struct.go.tera"), "{{ ctx.nope.deeper }}").unwrap();
        let renderer = Renderer::default().with_template_dir(dir.path()).unwrap();
        let err = renderer
            .render_struct(&StructContext::from_table(&users(), None))
            .unwrap_err();
        assert_eq!(err.kind(), "template");
    }

    #[test]
    fn test_render_mode_properties() {
        assert_eq!(RenderMode::Struct.extension(), "go");
        assert_eq!(RenderMode::Markdown.extension(), "md");
        assert!(RenderMode::ConstLookup.formats_output());
        assert!(!RenderMode::Markdown.formats_output());
    }
}
