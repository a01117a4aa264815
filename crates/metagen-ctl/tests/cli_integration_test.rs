//! Integration tests for the metagen-ctl binary.
//!
//! Each test runs the compiled binary from a temp directory with a clean
//! environment, so neither a developer's `.metagen.toml` nor `go generate`
//! variables leak in. Schema commands are only exercised up to the
//! connection step; a reachable MySQL server is not assumed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const ERRCODE_GO: &str = r#"package errcode

type ErrCode int

const (
	// request succeeded
	Success ErrCode = 0
	ErrParam ErrCode = 1001 // invalid parameter
	ErrUnknown ErrCode = 9999
)
"#;

fn metagen_ctl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_metagen-ctl"))
}

fn run_metagen_ctl(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(metagen_ctl_bin())
        .args(args)
        .current_dir(work_dir)
        .env("HOME", work_dir)
        .env_remove("GOFILE")
        .env_remove("GOPACKAGE")
        .env_remove("METAGEN_DB_ADDR")
        .env_remove("METAGEN_DB_USER")
        .env_remove("METAGEN_DB_PASS")
        .env_remove("METAGEN_DB_NAME")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute metagen-ctl")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn work_dir_with_errcode() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("errcode.go"), ERRCODE_GO).unwrap();
    dir
}

#[test]
fn test_comment_extract_writes_lookup_file() {
    let dir = work_dir_with_errcode();

    let output = run_metagen_ctl(dir.path(), &["comment-extract", "-i", "errcode.go", "-t", "ErrCode"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout}");
    assert!(stdout.contains("errcode_msg.go"));
    assert!(stdout.contains("errcode.go"));

    let code = fs::read_to_string(dir.path().join("errcode_msg.go")).unwrap();
    assert!(code.starts_with("// Code generated by metagen-ctl. DO NOT EDIT.\n"));
    assert!(code.contains("package errcode\n"));
    assert!(code.contains("\tErrParam: \"invalid parameter\",\n\tSuccess: \"request succeeded\",\n}"));
    assert!(!code.contains("ErrUnknown"));
    assert!(code.contains("func (code ErrCode) String() string {"));
}

#[test]
fn test_comment_extract_reads_go_generate_env() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("codes.go"), "const (\n\tA = 1 // first\n)\n").unwrap();

    let output = Command::new(metagen_ctl_bin())
        .args(["comment-extract", "-o", "gen/messages.go"])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("GOFILE", "codes.go")
        .env("GOPACKAGE", "codes")
        .output()
        .expect("Failed to execute metagen-ctl");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let code = fs::read_to_string(dir.path().join("gen/messages.go")).unwrap();
    assert!(code.contains("package codes\n"));
    assert!(code.contains("map[int]string{\n\tA: \"first\",\n}"));
}

#[test]
fn test_comment_extract_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    let output = run_metagen_ctl(dir.path(), &["comment-extract", "-i", "absent.go"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("IO error"));
    assert!(stderr(&output).contains("absent.go"));
}

#[test]
fn test_config_file_supplies_const_type() {
    let dir = work_dir_with_errcode();
    fs::write(dir.path().join(".metagen.toml"), "const-type = \"ErrCode\"\nformatter = \"none\"\n").unwrap();

    let output = run_metagen_ctl(dir.path(), &["comment-extract", "-i", "errcode.go"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let code = fs::read_to_string(dir.path().join("errcode_msg.go")).unwrap();
    assert!(code.contains("map[ErrCode]string{"));
}

#[test]
fn test_template_override_flag() {
    let dir = work_dir_with_errcode();
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("constants.go.tera"),
        "package {{ ctx.package }}\n\n// {% for e in ctx.entries %}{{ e.name }}{% if not loop.last %} {% endif %}{% endfor %}\n",
    )
    .unwrap();

    let output = run_metagen_ctl(
        dir.path(),
        &["comment-extract", "-i", "errcode.go", "--template-dir", "templates"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let code = fs::read_to_string(dir.path().join("errcode_msg.go")).unwrap();
    assert_eq!(code, "package errcode\n\n// ErrParam Success\n");
}

#[test]
fn test_unknown_formatter_is_usage_error() {
    let dir = work_dir_with_errcode();

    let output = run_metagen_ctl(
        dir.path(),
        &["comment-extract", "-i", "errcode.go", "--formatter", "prettier"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("prettier"));
    assert!(!dir.path().join("errcode_msg.go").exists());
}

#[test]
fn test_schema_command_requires_database_name() {
    let dir = TempDir::new().unwrap();

    let output = run_metagen_ctl(dir.path(), &["schema-to-markdown", "--table", "users"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_schema_command_unreachable_database() {
    let dir = TempDir::new().unwrap();

    let output = run_metagen_ctl(
        dir.path(),
        &["schema-to-struct", "--addr", "127.0.0.1:1", "--db", "shop", "--table", "users"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Connection error"));
    assert!(!dir.path().join("users.go").exists());
}
