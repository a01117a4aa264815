//! Constant comment extraction from Go source.
//!
//! Only top-level `const` declarations are read, both the single form
//! (`const A = 1`) and groups (`const ( ... )`). For each single-name entry
//! the comment on the entry's own line wins; otherwise the comment group
//! directly above it is used. A standalone `const` only has its own line:
//! the group above the keyword documents the declaration, not the constant.
//! Entries with neither are left out.
//!
//! Comment text follows the `//` marker with only the first line trimmed,
//! and the lines of a group are joined without a separator. Block comments
//! are kept as written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::golex::{tokenize, Token, TokenKind};

/// What a Go file declares: its package clause and the comment of each
/// commented constant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFile {
    pub package: Option<String>,
    pub comments: BTreeMap<String, String>,
}

impl ExtractedFile {
    /// The file's own package name, else `fallback`.
    pub fn resolve_package(&self, fallback: Option<&str>) -> Result<String> {
        self.package
            .clone()
            .or_else(|| {
                fallback
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
            })
            .ok_or_else(|| {
                Error::parse(1, "no package clause and no fallback package (GOPACKAGE) given")
            })
    }
}

/// `foo/errcode.go` → `foo/errcode_msg.go`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let input = input.to_string_lossy();
    let stem = input.strip_suffix(".go").unwrap_or(&input);
    PathBuf::from(format!("{stem}_msg.go"))
}

/// Extract the package name and constant comments from Go source.
pub fn extract(source: &str) -> Result<ExtractedFile> {
    let tokens = tokenize(source)?;
    let mut file = ExtractedFile::default();
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];
        if depth == 0 && tok.is_ident("package") && file.package.is_none() {
            if let Some(name) = next_significant(&tokens, i + 1)
                .map(|j| &tokens[j])
                .filter(|t| t.kind == TokenKind::Ident)
            {
                file.package = Some(name.text.to_string());
            }
        } else if depth == 0 && tok.is_ident("const") {
            i = const_decl(&tokens, i, &mut file.comments)?;
            continue;
        } else if tok.is_open() {
            depth += 1;
        } else if tok.is_close() {
            depth = depth.saturating_sub(1);
        }
        i += 1;
    }

    debug!(
        package = ?file.package,
        constants = file.comments.len(),
        "Extracted constant comments"
    );
    Ok(file)
}

/// An entry inside a const declaration: index of its first token, index of
/// its last non-comment token, and the index just past it.
#[derive(Debug, Clone, Copy)]
struct Entry {
    first: usize,
    last: usize,
    end: usize,
}

/// Handle the `const` declaration at `kw`, returning the index to resume
/// scanning from.
fn const_decl(
    tokens: &[Token<'_>],
    kw: usize,
    comments: &mut BTreeMap<String, String>,
) -> Result<usize> {
    let Some(next) = next_significant(tokens, kw + 1) else {
        return Ok(tokens.len());
    };

    if tokens[next].kind != TokenKind::Punct('(') {
        let Some(entry) = scan_entry(tokens, next, false) else {
            return Ok(tokens.len());
        };
        record(tokens, entry, None, comments);
        return Ok(entry.end);
    }

    let open_line = tokens[next].line;
    let mut i = next + 1;
    loop {
        match tokens.get(i) {
            None => {
                return Err(Error::parse(
                    open_line,
                    "const group opened here is never closed",
                ))
            }
            Some(t) if t.kind == TokenKind::Punct(')') => return Ok(i + 1),
            Some(t) if t.kind == TokenKind::Newline || t.kind == TokenKind::Punct(';') => i += 1,
            Some(t) if t.is_comment() => i += 1,
            Some(_) => {
                let Some(entry) = scan_entry(tokens, i, true) else {
                    return Err(Error::parse(
                        open_line,
                        "const group opened here is never closed",
                    ));
                };
                record(tokens, entry, Some(entry.first), comments);
                i = entry.end;
            }
        }
    }
}

/// Find where the entry starting at `first` ends: at a newline that Go would
/// turn into a semicolon, at `;`, or before the `)` closing its group.
/// Running out of input only ends a entry outside a group.
fn scan_entry(tokens: &[Token<'_>], first: usize, in_group: bool) -> Option<Entry> {
    let mut depth = 0usize;
    let mut last = first;

    for (i, tok) in tokens.iter().enumerate().skip(first) {
        match tok.kind {
            TokenKind::Newline if depth == 0 && ends_statement(&tokens[last]) => {
                return Some(Entry { first, last, end: i });
            }
            TokenKind::Punct(';' | ')') if depth == 0 => {
                return Some(Entry { first, last, end: i });
            }
            _ if tok.is_open() => depth += 1,
            _ if tok.is_close() => depth = depth.saturating_sub(1),
            _ => {}
        }
        if !tok.is_comment() && tok.kind != TokenKind::Newline {
            last = i;
        }
    }

    (!in_group).then_some(Entry {
        first,
        last,
        end: tokens.len(),
    })
}

/// Go inserts a semicolon after a line ending in one of these.
fn ends_statement(tok: &Token<'_>) -> bool {
    matches!(
        tok.kind,
        TokenKind::Ident
            | TokenKind::Number
            | TokenKind::Literal
            | TokenKind::RawString
            | TokenKind::Punct(')' | ']' | '}')
    )
}

fn record(
    tokens: &[Token<'_>],
    entry: Entry,
    doc_anchor: Option<usize>,
    comments: &mut BTreeMap<String, String>,
) {
    let Some(name) = single_name(&tokens[entry.first..=entry.last]) else {
        return;
    };

    let trailing = line_comment(tokens, entry);
    let group = if trailing.is_empty() {
        doc_anchor.and_then(|anchor| doc_comment(tokens, anchor))
    } else {
        Some(trailing)
    };
    if let Some(group) = group {
        comments.insert(name.to_string(), comment_text(&group));
    }
}

/// The declared name when the entry declares exactly one, non-blank name.
fn single_name<'a>(entry: &[Token<'a>]) -> Option<&'a str> {
    let first = entry.first().filter(|t| t.kind == TokenKind::Ident)?;
    if first.text == "_" {
        return None;
    }
    let multi = entry
        .iter()
        .skip(1)
        .take_while(|t| t.kind != TokenKind::Punct('='))
        .any(|t| t.kind == TokenKind::Punct(','));
    (!multi).then_some(first.text)
}

/// Comments that follow the entry on the line where it ends.
fn line_comment<'t, 'a>(tokens: &'t [Token<'a>], entry: Entry) -> Vec<&'t Token<'a>> {
    let end_line = tokens[entry.last].end_line;
    tokens[entry.last + 1..]
        .iter()
        .take_while(|t| t.kind != TokenKind::Newline)
        .filter(|t| t.is_comment() && t.line == end_line)
        .collect()
}

/// The comment group ending on the line directly above `anchor`: comments
/// on consecutive lines, each line holding only comments. A blank line or a
/// line with code ends the group.
fn doc_comment<'t, 'a>(tokens: &'t [Token<'a>], anchor: usize) -> Option<Vec<&'t Token<'a>>> {
    let before_anchor = anchor.checked_sub(1)?;
    if tokens[before_anchor].kind != TokenKind::Newline {
        return None;
    }

    let mut group = Vec::new();
    let mut newline = before_anchor;
    loop {
        // Comments on the line that ends at `newline`, walking backwards.
        let mut k = newline;
        let mut on_line = Vec::new();
        while let Some(prev) = k.checked_sub(1).filter(|&p| tokens[p].is_comment()) {
            on_line.push(&tokens[prev]);
            k = prev;
        }
        if on_line.is_empty() {
            break;
        }
        let at_file_start = k == 0;
        if !at_file_start && tokens[k - 1].kind != TokenKind::Newline {
            // Trailing comment of a code line
            break;
        }
        group.extend(on_line);
        if at_file_start {
            break;
        }
        newline = k - 1;
    }

    if group.is_empty() {
        return None;
    }
    group.reverse();
    Some(group)
}

fn comment_text(group: &[&Token<'_>]) -> String {
    group
        .iter()
        .enumerate()
        .map(|(idx, tok)| {
            let text = match tok.kind {
                TokenKind::LineComment => {
                    let body = tok.text.strip_prefix("//").unwrap_or(tok.text);
                    body.strip_suffix('\r').unwrap_or(body)
                }
                _ => tok.text,
            };
            if idx == 0 {
                text.trim()
            } else {
                text
            }
        })
        .collect()
}

fn next_significant(tokens: &[Token<'_>], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&i| tokens[i].kind != TokenKind::Newline && !tokens[i].is_comment())
}
