//! Lexer for the minic language
//!
//! Handles tokenization including:
//! - Keywords (`byte`, `int`, `void`, `func`, `return`)
//! - Identifiers and decimal integer literals
//! - Operators and punctuation, resolved through the `minic_core::lang` registries
//! - Line (`// …`) and block (`/* … */`) comments, which are skipped
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::cst::Span;
use crate::diagnostics::CompileError;
use minic_core::lang::keywords;
use minic_core::lang::operators::OperatorId;
use minic_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for minic source code.
///
/// Converts source text into a stream of tokens. Errors are collected rather than aborting the scan,
/// so a single pass reports every malformed character.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        let end = self.source.len();
        self.tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            // Comments, or division
            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else {
                    self.add_op(OperatorId::Slash, start);
                }
            }

            // Operators
            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '=' => self.add_op(OperatorId::Eq, start),

            // Punctuation
            ',' => self.add_punct(PunctuationId::Comma, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(
                    CompileError::lex(
                        format!("unexpected character '{}'", c.escape_debug()),
                        Span::new(start, self.current_pos),
                    )
                    .with_hint("minic source is ASCII: identifiers, decimal numbers and `+ - * / % = , ; ( ) { }`"),
                );
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let lexeme = &self.source[start..self.current_pos];
        self.tokens.push(Token::new(kind, lexeme, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::from_operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::from_punctuation(id), start);
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a `/* … */` comment. Block comments do not nest.
    fn skip_block_comment(&mut self, start: usize) {
        while let Some(c) = self.advance() {
            if c == '*' && self.match_char('/') {
                return;
            }
        }
        self.errors.push(
            CompileError::lex(
                "unterminated block comment".to_string(),
                Span::new(start, self.current_pos),
            )
            .with_note("the comment was opened here and runs to the end of input"),
        );
    }

    // ========================================================================
    // Literal and identifier scanning
    // ========================================================================

    fn scan_number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        self.add_token(TokenKind::Number, start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Reserved words come from the registry; everything else is a plain identifier.
        match keywords::from_str(spelling) {
            Some(id) => self.add_token(TokenKind::from_keyword(id), start),
            None => self.add_token(TokenKind::Ident, start),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    let result = Lexer::new(source).tokenize();
    match &result {
        Ok(tokens) => tracing::trace!(tokens = tokens.len(), "lexed"),
        Err(errors) => tracing::debug!(errors = errors.len(), "lexing failed"),
    }
    result
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", k.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for keyword {:?}, got {:?}", k.id, tokens);
            assert_eq!(tokens[0].kind, TokenKind::from_keyword(k.id));
            assert_eq!(tokens[0].kind.keyword(), Some(k.id));
            assert_eq!(tokens[1].kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_fixed_tokens_need_a_fixed_spelling() {
        assert_eq!(Token::fixed(TokenKind::Semicolon).map(|t| t.lexeme), Some(";".to_string()));
        assert_eq!(Token::fixed(TokenKind::Return).map(|t| t.lexeme), Some("return".to_string()));
        assert!(Token::fixed(TokenKind::Number).is_none());
        assert!(Token::fixed(TokenKind::Ident).is_none());
        assert!(Token::fixed(TokenKind::Eof).is_none());
    }

    #[test]
    fn test_operator_registry_parity() {
        use minic_core::lang::operators;

        for o in operators::OPERATORS {
            let tokens = lex(o.spelling).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", o.spelling, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for operator {:?}, got {:?}", o.spelling, tokens);
            assert_eq!(tokens[0].kind.operator(), Some(o.id));
            assert_eq!(tokens[0].lexeme, o.spelling);
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use minic_core::lang::punctuation;

        for p in punctuation::PUNCTUATION {
            let tokens = lex(p.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", p.canonical, errs));
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens[0].kind.punctuation(), Some(p.id));
        }
    }

    #[test]
    fn test_function_header() {
        assert_eq!(
            kinds("func main(int a) int {"),
            vec![
                TokenKind::Func,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Int,
                TokenKind::LBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexemes_and_spans() {
        let tokens = lex("x = 42;").unwrap();
        let described: Vec<(&str, usize, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.as_str(), t.span.start, t.span.end))
            .collect();
        assert_eq!(described, vec![("x", 0, 1), ("=", 2, 3), ("42", 4, 6), (";", 6, 7), ("", 7, 7)]);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("Int RETURN returns"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_number_then_identifier() {
        // No suffixes: `12ab` is a number followed by an identifier.
        let tokens = lex("12ab").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "12");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "ab");
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "int a; // trailing\n/* block\n comment */ byte b;";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Byte,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_slash_is_division_outside_comments() {
        assert_eq!(
            kinds("a / b"),
            vec![TokenKind::Ident, TokenKind::Divide, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let tokens = lex("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].span, Span::new(0, 0));
    }

    #[test]
    fn test_eof_span_is_end_of_input() {
        let tokens = lex("int a;   \n").unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::new(10, 10));
    }

    #[test]
    fn test_unexpected_characters_are_collected() {
        let errors = lex("int a @ b # c;").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Lex));
        assert_eq!(errors[0].message, "unexpected character '@'");
        assert_eq!(errors[0].span, Span::new(6, 7));
        assert_eq!(errors[1].message, "unexpected character '#'");
    }

    #[test]
    fn test_unicode_identifier_rejected() {
        let errors = lex("π = 1;").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unexpected character"));
        assert_eq!(errors[0].span, Span::new(0, 'π'.len_utf8()));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let errors = lex("int a; /* never closed").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unterminated block comment");
        assert_eq!(errors[0].span.start, 7);
        assert!(!errors[0].notes.is_empty());
    }

    proptest::proptest! {
        #[test]
        fn prop_lexemes_are_source_slices(source in "[a-z0-9_ +\\-*/%=,;(){}\n]{0,48}") {
            if let Ok(tokens) = lex(&source) {
                let mut last_end = 0;
                for tok in &tokens[..tokens.len() - 1] {
                    proptest::prop_assert_eq!(&source[tok.span.start..tok.span.end], tok.lexeme.as_str());
                    proptest::prop_assert!(tok.span.start >= last_end);
                    last_end = tok.span.end;
                }
            }
        }
    }
}
