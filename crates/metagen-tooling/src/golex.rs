//! Line-aware lexer for the subset of Go that the comment extractor and the
//! builtin formatter need.
//!
//! It recognises identifiers (keywords included), numbers, the three literal
//! forms, comments, newlines and single-character punctuation. Operators are
//! not combined; nothing here needs them.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Number,
    /// `"..."` or `'...'`
    Literal,
    /// `` `...` ``, may span lines
    RawString,
    /// `// ...`
    LineComment,
    /// `/* ... */`, may span lines
    BlockComment,
    Newline,
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based line the token starts on
    pub line: usize,
    /// 1-based line the token ends on
    pub end_line: usize,
}

impl Token<'_> {
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, TokenKind::Punct('(' | '[' | '{'))
    }

    pub fn is_close(&self) -> bool {
        matches!(self.kind, TokenKind::Punct(')' | ']' | '}'))
    }

    pub fn spans_lines(&self) -> bool {
        self.end_line > self.line
    }
}

/// Opening bracket matching a closing one.
pub(crate) fn opener_for(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line: 1,
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn token(&mut self, kind: TokenKind, start: usize, line: usize) -> Token<'a> {
        let end = self.offset();
        Token {
            kind,
            text: &self.src[start..end],
            line,
            end_line: self.line,
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.chars.next_if(|&(_, c)| pred(c)).is_some() {}
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        self.eat_while(|c| c != '\n' && c.is_whitespace());

        let Some((start, c)) = self.chars.next() else {
            return Ok(None);
        };
        let line = self.line;

        let kind = match c {
            '\n' => {
                let tok = self.token(TokenKind::Newline, start, line);
                self.line += 1;
                return Ok(Some(tok));
            }
            '/' if self.chars.next_if(|&(_, c)| c == '/').is_some() => {
                self.eat_while(|c| c != '\n');
                TokenKind::LineComment
            }
            '/' if self.chars.next_if(|&(_, c)| c == '*').is_some() => {
                self.block_comment(line)?;
                TokenKind::BlockComment
            }
            '"' | '\'' => {
                self.quoted(c, line)?;
                TokenKind::Literal
            }
            '`' => {
                self.raw_string(line)?;
                TokenKind::RawString
            }
            c if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                TokenKind::Number
            }
            c if c.is_alphabetic() || c == '_' => {
                self.eat_while(|c| c.is_alphanumeric() || c == '_');
                TokenKind::Ident
            }
            other => TokenKind::Punct(other),
        };

        Ok(Some(self.token(kind, start, line)))
    }

    fn block_comment(&mut self, start_line: usize) -> Result<()> {
        let mut prev = '\0';
        for (_, c) in self.chars.by_ref() {
            if c == '\n' {
                self.line += 1;
            }
            if prev == '*' && c == '/' {
                return Ok(());
            }
            prev = c;
        }
        Err(Error::parse(start_line, "comment not terminated"))
    }

    fn quoted(&mut self, quote: char, start_line: usize) -> Result<()> {
        let what = if quote == '"' { "string" } else { "rune" };
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => {
                    if self.chars.next_if(|&(_, c)| c != '\n').is_none() {
                        break;
                    }
                }
                '\n' => break,
                c if c == quote => return Ok(()),
                _ => {}
            }
        }
        Err(Error::parse(
            start_line,
            format!("{what} literal not terminated"),
        ))
    }

    fn raw_string(&mut self, start_line: usize) -> Result<()> {
        for (_, c) in self.chars.by_ref() {
            match c {
                '`' => return Ok(()),
                '\n' => self.line += 1,
                _ => {}
            }
        }
        Err(Error::parse(start_line, "raw string literal not terminated"))
    }
}

/// Split Go source into tokens.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token()? {
        tokens.push(tok);
    }
    Ok(tokens)
}
