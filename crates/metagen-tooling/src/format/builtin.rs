//! In-process Go formatter.
//!
//! Checks that brackets balance and literals terminate, then re-indents every
//! line with tabs according to bracket depth. Lines inside multi-line raw
//! strings and block comments are left untouched. Field alignment and other
//! column layout are not attempted; use [`super::Gofmt`] for that.

use super::SourceFormatter;
use crate::error::{Error, Result};
use crate::golex::{opener_for, tokenize, TokenKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

#[derive(Debug, Clone, Copy, Default)]
struct LineLayout {
    /// Bracket depth before the first token of the line
    depth: usize,
    /// Closing brackets that open the line
    leading_closers: usize,
    /// Line continues a raw string or block comment from an earlier line
    verbatim: bool,
    /// Line ends inside a raw string or block comment; keep its tail
    keep_tail: bool,
}

impl SourceFormatter for BuiltinFormatter {
    fn format(&self, source: &str) -> Result<String> {
        let layout = analyze(source)?;
        let mut out: Vec<String> = Vec::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = layout.get(idx + 1).copied().unwrap_or_default();
            if line.verbatim {
                out.push(raw.to_string());
                continue;
            }

            let text = if line.keep_tail {
                raw.trim_start()
            } else {
                raw.trim()
            };
            if text.is_empty() {
                if out.last().is_some_and(|prev| !prev.is_empty()) {
                    out.push(String::new());
                }
                continue;
            }

            let indent = line.depth.saturating_sub(line.leading_closers);
            out.push(format!("{}{}", "\t".repeat(indent), text));
        }

        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }
        let mut formatted = out.join("\n");
        formatted.push('\n');
        Ok(formatted)
    }
}

/// Per-line layout, indexed by 1-based line number.
fn analyze(source: &str) -> Result<Vec<LineLayout>> {
    let tokens = tokenize(source).map_err(|e| Error::format(e.to_string()))?;
    let line_count = source.lines().count().max(1);
    let mut layout = vec![LineLayout::default(); line_count + 2];
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut current_line = 0;
    let mut at_line_start = false;

    for tok in &tokens {
        if tok.kind == TokenKind::Newline {
            continue;
        }
        if tok.line != current_line {
            current_line = tok.line;
            at_line_start = true;
            if let Some(entry) = layout.get_mut(tok.line) {
                entry.depth = stack.len();
            }
        }

        if at_line_start && tok.is_close() {
            if let Some(entry) = layout.get_mut(tok.line) {
                entry.leading_closers += 1;
            }
        } else {
            at_line_start = false;
        }

        match tok.kind {
            TokenKind::Punct(c @ ('(' | '[' | '{')) => stack.push((c, tok.line)),
            TokenKind::Punct(c @ (')' | ']' | '}')) => match stack.pop() {
                Some((open, _)) if open == opener_for(c) => {}
                Some((open, opened_at)) => {
                    return Err(Error::format(format!(
                        "line {}: '{c}' does not match '{open}' opened at line {opened_at}",
                        tok.line
                    )));
                }
                None => {
                    return Err(Error::format(format!(
                        "line {}: unexpected '{c}'",
                        tok.line
                    )));
                }
            },
            _ => {}
        }

        if tok.spans_lines() {
            if let Some(entry) = layout.get_mut(tok.line) {
                entry.keep_tail = true;
            }
            for line in tok.line + 1..=tok.end_line {
                if let Some(entry) = layout.get_mut(line) {
                    entry.verbatim = true;
                }
            }
            // The token's last line belongs to it; whatever follows on that
            // line is not at line start.
            current_line = tok.end_line;
            at_line_start = false;
        }
    }

    if let Some((open, opened_at)) = stack.pop() {
        return Err(Error::format(format!(
            "'{open}' opened at line {opened_at} is never closed"
        )));
    }

    Ok(layout)
}
