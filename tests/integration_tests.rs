//! Integration tests for the minic frontend

use std::fs;
use std::path::{Path, PathBuf};

use minic::frontend::{CompileError, ErrorKind, SourceParser, lexer, parser};

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "mc").unwrap_or(false))
        .collect();
    paths.sort();
    paths
}

/// Helper to run the full pipeline on a source file
fn parse_file(path: &Path) -> Result<(), Vec<CompileError>> {
    let parsed = SourceParser::new().reader(fs::File::open(path).unwrap()).parse().unwrap();
    match parsed.nodes() {
        Some(_) => Ok(()),
        None => Err(parsed.diagnostics().to_vec()),
    }
}

/// Test that all valid fixtures parse successfully
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty());
    for path in paths {
        let result = parse_file(&path);
        assert!(
            result.is_ok(),
            "Expected {} to parse successfully, got errors: {:?}",
            path.display(),
            result.unwrap_err()
        );
    }
}

/// Test that invalid fixtures produce errors
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty());
    for path in paths {
        let errors = parse_file(&path).expect_err(&format!("Expected {} to fail", path.display()));
        assert!(!errors.is_empty(), "{} failed without diagnostics", path.display());
    }
}

#[test]
fn test_valid_fixture_leaves_match_tokens() {
    for path in fixtures("valid") {
        let source = fs::read_to_string(&path).unwrap();
        let tokens = lexer::lex(&source).unwrap();
        let tree = parser::parse(&tokens).unwrap();
        let leaves: Vec<_> = tree.leaves().cloned().collect();
        assert_eq!(leaves, tokens[..tokens.len() - 1], "{}", path.display());
        assert_eq!(tree.symbol(), "compilation_unit");
    }
}

#[test]
fn test_invalid_fixture_diagnostics() {
    let cases = [
        ("bad_character.mc", ErrorKind::Lex, "unexpected character '$'"),
        ("expression_argument.mc", ErrorKind::Syntax, "unexpected token PLUS '+'"),
        ("missing_semicolon.mc", ErrorKind::UnexpectedEof, "unexpected end of input"),
        ("unclosed_block.mc", ErrorKind::UnexpectedEof, "unexpected end of input"),
    ];
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/invalid");
    for (file, kind, message) in cases {
        let errors = parse_file(&dir.join(file)).unwrap_err();
        assert_eq!(errors.len(), 1, "{file}");
        assert_eq!(errors[0].kind, kind, "{file}");
        assert_eq!(errors[0].message, message, "{file}");
    }
}

#[test]
fn test_diagnostic_points_into_source() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/invalid");
    let source = fs::read_to_string(dir.join("expression_argument.mc")).unwrap();
    let errors = parse_file(&dir.join("expression_argument.mc")).unwrap_err();
    let span = errors[0].span;
    assert_eq!(&source[span.start..span.end], "+");
}

#[test]
fn test_usage_errors_do_not_parse() {
    assert!(SourceParser::new().parse().is_err());
    assert!(SourceParser::new().text("int x;").reader("int y;".as_bytes()).parse().is_err());
}
