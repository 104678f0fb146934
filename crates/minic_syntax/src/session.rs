//! Construction and query contract for parsing a whole source.
//!
//! [`SourceParser`] takes exactly one input (a reader or a string), reads it once, lexes and parses it,
//! and hands back a [`ParsedSource`] holding either the syntax tree or the diagnostics that prevented
//! one.
//!
//! ## Examples
//! ```rust
//! use minic_syntax::session::SourceParser;
//!
//! let parsed = SourceParser::new().text("func main() int { return 0; }").parse().unwrap();
//! assert_eq!(parsed.nodes().map(|n| n.symbol()), Some("compilation_unit"));
//! assert!(parsed.diagnostics().is_empty());
//! ```

use std::io::Read;

use crate::cst::SyntaxNode;
use crate::diagnostics::CompileError;
use crate::{lexer, parser};

/// Misuse of the [`SourceParser`] builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("requires either a reader or a text source")]
    MissingInput,
    #[error("requires either a reader or a text source, not both")]
    ConflictingInputs,
}

/// Failure to produce a [`ParsedSource`] at all (as opposed to a source that does not parse).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder for one parse of one source.
#[derive(Default)]
pub struct SourceParser<'a> {
    reader: Option<Box<dyn Read + 'a>>,
    text: Option<String>,
    debug: bool,
}

impl<'a> SourceParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the source from `reader` (read fully, once, when [`parse`](Self::parse) runs).
    pub fn reader(mut self, reader: impl Read + 'a) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Use `text` as the source.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Trace every shift and reduce while parsing.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Read, lex and parse the source.
    ///
    /// ## Errors
    /// - [`SessionError::Usage`] if neither or both inputs were supplied; nothing is read or parsed.
    /// - [`SessionError::Io`] if the reader fails or yields invalid UTF-8.
    ///
    /// Lexical and syntax errors are not errors here: they are reported through
    /// [`ParsedSource::diagnostics`].
    #[tracing::instrument(skip_all, fields(debug = self.debug))]
    pub fn parse(self) -> Result<ParsedSource, SessionError> {
        let source = match (self.reader, self.text) {
            (Some(mut reader), None) => {
                let mut source = String::new();
                reader.read_to_string(&mut source)?;
                source
            }
            (None, Some(text)) => text,
            (Some(_), Some(_)) => return Err(UsageError::ConflictingInputs.into()),
            (None, None) => return Err(UsageError::MissingInput.into()),
        };

        let (nodes, diagnostics) = match lexer::lex(&source) {
            Err(errors) => (None, errors),
            Ok(tokens) => match parser::parse_with_debug(&tokens, self.debug) {
                Ok(root) => (Some(root), Vec::new()),
                Err(error) => (None, vec![error]),
            },
        };
        tracing::debug!(parsed = nodes.is_some(), diagnostics = diagnostics.len(), "parsed source");

        Ok(ParsedSource {
            source,
            nodes,
            diagnostics,
        })
    }
}

/// Outcome of a [`SourceParser`] run.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    source: String,
    nodes: Option<SyntaxNode>,
    diagnostics: Vec<CompileError>,
}

impl ParsedSource {
    /// The syntax tree, or `None` if the source failed to lex or parse.
    pub fn nodes(&self) -> Option<&SyntaxNode> {
        self.nodes.as_ref()
    }

    /// Lexical errors (possibly several) or the single syntax error; empty on success.
    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    /// The source text exactly as read.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_ok(&self) -> bool {
        self.nodes.is_some()
    }

    /// Take ownership of the tree.
    pub fn into_nodes(self) -> Option<SyntaxNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    /// A reader that always fails.
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_text_source() {
        let parsed = SourceParser::new().text("int x;").parse().unwrap();
        assert!(parsed.is_ok());
        assert_eq!(parsed.source(), "int x;");
        assert_eq!(parsed.nodes().map(SyntaxNode::symbol), Some("compilation_unit"));
    }

    #[test]
    fn test_reader_source() {
        let parsed = SourceParser::new()
            .reader("func f() void { }".as_bytes())
            .parse()
            .unwrap();
        assert!(parsed.diagnostics().is_empty());
        assert_eq!(parsed.into_nodes().map(|n| n.node_count()), Some(12));
    }

    #[test]
    fn test_reader_and_text_agree() {
        let source = "int a = 1 + 2 * 3;";
        let from_text = SourceParser::new().text(source).parse().unwrap();
        let from_reader = SourceParser::new().reader(std::io::Cursor::new(source)).parse().unwrap();
        assert_eq!(from_text.nodes(), from_reader.nodes());
    }

    #[test]
    fn test_missing_input() {
        let err = SourceParser::new().parse().unwrap_err();
        assert!(matches!(err, SessionError::Usage(UsageError::MissingInput)));
        assert_eq!(err.to_string(), "requires either a reader or a text source");
    }

    #[test]
    fn test_conflicting_inputs() {
        let err = SourceParser::new()
            .text("int x;")
            .reader("int y;".as_bytes())
            .parse()
            .unwrap_err();
        assert!(matches!(err, SessionError::Usage(UsageError::ConflictingInputs)));
    }

    #[test]
    fn test_reader_failure() {
        let err = SourceParser::new().reader(Broken).parse().unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_invalid_utf8_is_an_io_error() {
        let err = SourceParser::new().reader(&[0xff, 0xfe][..]).parse().unwrap_err();
        assert!(matches!(err, SessionError::Io(_)));
    }

    #[test]
    fn test_syntax_error_yields_no_nodes() {
        let parsed = SourceParser::new().text("int x = ;").parse().unwrap();
        assert!(parsed.nodes().is_none());
        assert_eq!(parsed.diagnostics().len(), 1);
        assert_eq!(parsed.diagnostics()[0].kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_lex_errors_skip_parsing() {
        let parsed = SourceParser::new().text("int $ = @;").parse().unwrap();
        assert!(parsed.nodes().is_none());
        assert_eq!(parsed.diagnostics().len(), 2);
        assert!(parsed.diagnostics().iter().all(|d| d.kind == ErrorKind::Lex));
    }

    #[test]
    fn test_debug_flag_keeps_result() {
        let source = "func f(int a) int { return a % 2; }";
        let plain = SourceParser::new().text(source).parse().unwrap();
        let traced = SourceParser::new().text(source).debug(true).parse().unwrap();
        assert_eq!(plain.nodes(), traced.nodes());
    }
}
