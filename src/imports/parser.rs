//! Imports-only reader for Go source files.
//!
//! Reads the package clause and the import declarations that follow it, then
//! stops at the first other top-level declaration. Nothing past the imports is
//! looked at, so function bodies with syntax this reader does not understand
//! never cause an error.

use std::fs;
use std::path::Path;

use crate::error::{AuditError, Result};

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// Read `path` and return the import paths it declares, in source order.
///
/// The file is not required to be valid UTF-8; only import paths are.
pub fn parse_file_imports(path: &Path) -> Result<Vec<String>> {
    let source = fs::read(path).map_err(|e| AuditError::io(path, e))?;
    parse_imports(&source).map_err(|(line, message)| AuditError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parse import paths from Go source text. Errors carry a 1-based line number.
///
/// A single leading byte order mark is ignored.
pub fn parse_imports(source: impl AsRef<[u8]>) -> std::result::Result<Vec<String>, (usize, String)> {
    let source = source.as_ref();
    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
    let mut scanner = Scanner::new(source);

    scanner.skip_trivia()?;
    match scanner.word() {
        Some(b"package") => {}
        _ => return Err(scanner.error("expected 'package' clause")),
    }
    scanner.skip_trivia()?;
    if scanner.word().is_none() {
        return Err(scanner.error("expected package name"));
    }

    let mut imports = Vec::new();
    loop {
        scanner.skip_trivia()?;
        if scanner.word() != Some(&b"import"[..]) {
            break;
        }
        scanner.skip_trivia()?;
        if scanner.eat(b'(') {
            loop {
                scanner.skip_trivia()?;
                if scanner.eat(b')') {
                    break;
                }
                if scanner.at_end() {
                    return Err(scanner.error("import block not terminated"));
                }
                imports.push(scanner.import_spec()?);
            }
        } else {
            imports.push(scanner.import_spec()?);
        }
    }

    Ok(imports)
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> (usize, String) {
        (self.line, message.to_string())
    }

    /// Skip whitespace, semicolons and comments.
    fn skip_trivia(&mut self) -> std::result::Result<(), (usize, String)> {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b';' => {
                    self.bump();
                }
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let start_line = self.line;
                    self.pos += 2;
                    loop {
                        match self.bump() {
                            Some(b'*') if self.peek() == Some(b'/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err((start_line, "comment not terminated".to_string()));
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Consume an identifier or keyword. Non-ASCII bytes count as letters.
    fn word(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80 {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start || self.bytes[start].is_ascii_digit() {
            self.pos = start;
            return None;
        }
        Some(&self.bytes[start..self.pos])
    }

    /// `[name] "path"` where name is an identifier, `.` or `_`.
    fn import_spec(&mut self) -> std::result::Result<String, (usize, String)> {
        if !self.eat(b'.') {
            // The optional package name; `_` is scanned as an identifier.
            let _ = self.word();
        }
        self.skip_trivia()?;

        let path = match self.peek() {
            Some(b'"') => self.interpreted_string()?,
            Some(b'`') => self.raw_string()?,
            _ => return Err(self.error("expected import path")),
        };
        if path.is_empty() {
            return Err(self.error("empty import path"));
        }
        Ok(path)
    }

    fn interpreted_string(&mut self) -> std::result::Result<String, (usize, String)> {
        self.bump();
        let mut out = Vec::new();
        loop {
            match self.peek() {
                Some(b'\n') | None => return Err(self.error("string literal not terminated")),
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => {
                    self.bump();
                    match self.peek() {
                        Some(b'\n') | None => {
                            return Err(self.error("string literal not terminated"))
                        }
                        Some(c) => {
                            self.bump();
                            out.push(c);
                        }
                    }
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
        String::from_utf8(out).map_err(|_| self.error("invalid UTF-8 in import path"))
    }

    fn raw_string(&mut self) -> std::result::Result<String, (usize, String)> {
        let start_line = self.line;
        self.bump();
        let start = self.pos;
        loop {
            match self.bump() {
                Some(b'`') => break,
                Some(_) => {}
                None => return Err((start_line, "raw string literal not terminated".to_string())),
            }
        }
        String::from_utf8(self.bytes[start..self.pos - 1].to_vec())
            .map_err(|_| (start_line, "invalid UTF-8 in import path".to_string()))
    }
}
