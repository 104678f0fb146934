//! Diagnostics and error reporting for minic
//!
//! [`CompileError`] is the one error type produced by the lexer and the parser. It can be rendered two
//! ways:
//! - [`format_error`]: plain text with a source excerpt and caret underline (no colours), used by tests and
//!   `--plain` output.
//! - [`report`]: a [`miette::Report`] carrying the source, for rich terminal output.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource};

use crate::cst::Span;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lex(message: String, span: Span) -> Self {
        Self::new(ErrorKind::Lex, message, span)
    }

    pub fn syntax(message: String, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn unexpected_eof(message: String, span: Span) -> Self {
        Self::new(ErrorKind::UnexpectedEof, message, span)
    }

    /// An inconsistency inside the parser itself (never caused by user input alone).
    pub fn internal(message: String, span: Span) -> Self {
        Self::new(ErrorKind::Internal, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Syntax,
    UnexpectedEof,
    Internal,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lex => "minic::lex",
            ErrorKind::Syntax => "minic::syntax",
            ErrorKind::UnexpectedEof => "minic::unexpected_eof",
            ErrorKind::Internal => "minic::internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lexical error"),
            ErrorKind::Syntax | ErrorKind::UnexpectedEof => write!(f, "syntax error"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let lines: Vec<&str> = self.notes.iter().chain(&self.hints).map(String::as_str).collect();
        if lines.is_empty() {
            None
        } else {
            Some(Box::new(lines.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = match self.kind {
            ErrorKind::UnexpectedEof => "input ends here",
            ErrorKind::Lex | ErrorKind::Syntax | ErrorKind::Internal => "here",
        };
        Some(Box::new(std::iter::once(LabeledSpan::at(
            self.span.start..self.span.end,
            label,
        ))))
    }
}

/// Wrap an error and its source into a [`miette::Report`] for rich rendering.
pub fn report(file_name: &str, source: &str, error: CompileError) -> miette::Report {
    miette::Report::new(error).with_source_code(NamedSource::new(file_name, source.to_string()))
}

/// Render an error with source context as plain text.
///
/// ```text
/// syntax error: unexpected token SEMICOLON ';'
///   --> main.mc:1:9
///     |
///   1 | int x = ;
///     |         ^
///   = note: expected one of: NUMBER, ID, LPAREN
/// ```
pub fn format_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let (line_num, col_num, line_text) = get_line_info(source, error.span.start);
    let width = line_num.to_string().len();
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", error.kind, error.message));
    out.push_str(&format!("  --> {file_name}:{line_num}:{col_num}\n"));
    out.push_str(&format!("  {:>width$} |\n", ""));
    out.push_str(&format!("  {line_num:>width$} | {line_text}\n"));

    let before = &line_text[..(col_num - 1).min(line_text.len())];
    let remaining = line_text.len().saturating_sub(before.len());
    let underline = error.span.len().min(remaining).max(1);
    out.push_str(&format!(
        "  {:>width$} | {}{}\n",
        "",
        " ".repeat(before.chars().count()),
        "^".repeat(underline)
    ));

    for note in &error.notes {
        out.push_str(&format!("  = note: {note}\n"));
    }
    for hint in &error.hints {
        out.push_str(&format!("  = hint: {hint}\n"));
    }

    out
}

/// Get line number, column number, and line text for a byte offset
fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = source[line_start..line_end].trim_end_matches('\r');
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info() {
        let source = "int a;\nint b = ;\n";
        assert_eq!(get_line_info(source, 0), (1, 1, "int a;"));
        assert_eq!(get_line_info(source, 15), (2, 9, "int b = ;"));
        assert_eq!(get_line_info(source, source.len()), (3, 1, ""));
    }

    #[test]
    fn test_format_error_plain() {
        let source = "int a;\nint b = ;\n";
        let error = CompileError::syntax("unexpected token SEMICOLON ';'".to_string(), Span::new(15, 16))
            .with_note("expected one of: NUMBER, ID, LPAREN");
        let expected = "\
syntax error: unexpected token SEMICOLON ';'
  --> main.mc:2:9
    |
  2 | int b = ;
    |         ^
  = note: expected one of: NUMBER, ID, LPAREN
";
        assert_eq!(format_error("main.mc", source, &error), expected);
    }

    #[test]
    fn test_format_error_underlines_whole_span() {
        let source = "x = abc @@@";
        let error = CompileError::lex("unexpected character".to_string(), Span::new(8, 11)).with_hint("remove it");
        let rendered = format_error("t.mc", source, &error);
        assert!(rendered.starts_with("lexical error: unexpected character\n"));
        assert!(rendered.contains(" |         ^^^\n"));
        assert!(rendered.ends_with("  = hint: remove it\n"));
    }

    #[test]
    fn test_format_error_at_end_of_input() {
        let source = "func f (";
        let error = CompileError::unexpected_eof("unexpected end of input".to_string(), Span::new(8, 8));
        let rendered = format_error("t.mc", source, &error);
        assert!(rendered.contains("--> t.mc:1:9"));
        assert!(rendered.contains(" | func f (\n"));
        assert!(rendered.contains(" |         ^\n"));
    }

    #[test]
    fn test_diagnostic_metadata() {
        let error = CompileError::syntax("boom".to_string(), Span::new(2, 4))
            .with_note("a note")
            .with_hint("a hint");
        assert_eq!(error.to_string(), "boom");
        assert_eq!(error.code().map(|c| c.to_string()), Some("minic::syntax".to_string()));
        assert_eq!(error.help().map(|h| h.to_string()), Some("a note\na hint".to_string()));

        let labels: Vec<LabeledSpan> = error.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 2);
        assert_eq!(labels[0].len(), 2);
    }

    #[test]
    fn test_report_keeps_the_error() {
        let error = CompileError::unexpected_eof("unexpected end of input".to_string(), Span::new(3, 3));
        let report = report("t.mc", "int", error);
        assert_eq!(report.to_string(), "unexpected end of input");
        assert_eq!(report.code().map(|c| c.to_string()), Some("minic::unexpected_eof".to_string()));
        assert!(report.source_code().is_some());
    }
}
