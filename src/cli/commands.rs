//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Each printing command has a matching function that builds its output as a `String`, so the
//! behaviour can be tested without capturing stdout.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::frontend::{CompileError, ParsedSource, SessionError, SourceParser, diagnostics, grammar, lexer, parser};

use super::{CliError, CliResult, ExitCode, Options};

/// Maximum source file size (16 MiB)
///
/// Files larger than this are rejected before any reading happens.
pub const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Display name used in diagnostics for `-c` input.
const INLINE_NAME: &str = "<code>";

// ============================================================================
// Source loading
// ============================================================================

/// Check that `file_path` exists and is within `MAX_SOURCE_SIZE`.
fn check_source_size(file_path: &Path) -> CliResult<()> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }
    Ok(())
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error, invalid UTF-8)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(file_path: &Path) -> CliResult<String> {
    check_source_size(file_path)?;
    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Stream a file through [`SourceParser`], which reads it exactly once.
fn parse_source_file(file_path: &Path, options: Options) -> CliResult<ParsedSource> {
    check_source_size(file_path)?;
    let file = File::open(file_path)
        .map_err(|e| CliError::failure(format!("Cannot open file '{}': {}", file_path.display(), e)))?;

    parse_bounded(file, &file_path.display().to_string(), MAX_SOURCE_SIZE, options)
}

/// Parse at most `limit` bytes from `reader`.
///
/// The file may grow between the metadata check and the read, so the read itself is capped and
/// anything past `limit` is rejected rather than parsed.
fn parse_bounded(reader: impl Read, name: &str, limit: u64, options: Options) -> CliResult<ParsedSource> {
    let parsed = SourceParser::new()
        .reader(reader.take(limit.saturating_add(1)))
        .debug(options.debug)
        .parse()
        .map_err(|e| session_error(name, e))?;

    if parsed.source().len() as u64 > limit {
        return Err(CliError::failure(format!(
            "Source file '{name}' is too large (max {limit} bytes)"
        )));
    }
    Ok(parsed)
}

fn session_error(name: &str, error: SessionError) -> CliError {
    match error {
        SessionError::Io(e) => CliError::failure(format!("Error reading file '{name}': {e}")),
        SessionError::Usage(e) => CliError::failure(format!("Error: {e}")),
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Render diagnostics either as plain text or as miette reports.
pub fn render_diagnostics(name: &str, source: &str, errors: &[CompileError], options: Options) -> String {
    let mut msg = String::new();
    for err in errors {
        if options.plain {
            msg.push_str(&diagnostics::format_error(name, source, err));
        } else {
            msg.push_str(&format!("{:?}\n", diagnostics::report(name, source, err.clone())));
        }
    }
    msg.trim_end().to_string()
}

fn failure_from(name: &str, parsed: &ParsedSource, options: Options) -> CliError {
    CliError::failure(render_diagnostics(name, parsed.source(), parsed.diagnostics(), options))
}

// ============================================================================
// Commands
// ============================================================================

/// Build the token listing of a file: one `TAG 'lexeme' @start..end` line per token.
pub fn token_listing(file_path: &Path, options: Options) -> CliResult<String> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let tokens = lexer::lex(&source)
        .map_err(|errs| CliError::failure(render_diagnostics(&name, &source, &errs, options)))?;

    let mut out = String::new();
    for tok in &tokens {
        out.push_str(&format!("{} '{}' @{}..{}\n", tok.kind.tag(), tok.lexeme, tok.span.start, tok.span.end));
    }
    Ok(out)
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path, options: Options) -> CliResult<ExitCode> {
    print!("{}", token_listing(file_path, options)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and return the rendered syntax tree.
pub fn render_file(file_path: &Path, options: Options) -> CliResult<String> {
    let parsed = parse_source_file(file_path, options)?;
    match parsed.nodes() {
        Some(tree) => Ok(tree.to_string()),
        None => Err(failure_from(&file_path.display().to_string(), &parsed, options)),
    }
}

/// Parse inline code and return the rendered syntax tree.
pub fn render_code(code: &str, options: Options) -> CliResult<String> {
    if code.is_empty() {
        return Err(CliError::failure("Error: -c/--code requires source code string"));
    }
    let parsed = SourceParser::new()
        .text(code)
        .debug(options.debug)
        .parse()
        .map_err(|e| session_error(INLINE_NAME, e))?;
    match parsed.nodes() {
        Some(tree) => Ok(tree.to_string()),
        None => Err(failure_from(INLINE_NAME, &parsed, options)),
    }
}

/// Parse and display the syntax tree of a file.
pub fn parse_file(file_path: &Path, options: Options) -> CliResult<ExitCode> {
    print!("{}", render_file(file_path, options)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the syntax tree of inline code.
pub fn parse_code(code: &str, options: Options) -> CliResult<ExitCode> {
    print!("{}", render_code(code, options)?);
    Ok(ExitCode::SUCCESS)
}

/// Parse a file, printing nothing unless it fails.
pub fn check_file(file_path: &Path, options: Options) -> CliResult<ExitCode> {
    let parsed = parse_source_file(file_path, options)?;
    if parsed.is_ok() {
        tracing::debug!(file = %file_path.display(), "check passed");
        Ok(ExitCode::SUCCESS)
    } else {
        Err(failure_from(&file_path.display().to_string(), &parsed, options))
    }
}

/// Build the grammar listing: BNF followed by a statistics line.
pub fn grammar_listing() -> String {
    let stats = parser::table_stats();
    format!(
        "{}\n# {} productions, {} states, {} shift/reduce resolved by precedence, {} shift/reduce resolved by shifting, {} reduce/reduce\n",
        grammar::to_bnf(),
        grammar::PRODUCTIONS.len(),
        stats.states,
        stats.resolved_by_precedence,
        stats.shift_reduce,
        stats.reduce_reduce
    )
}

/// Print the grammar and parse-table statistics.
pub fn print_grammar() -> CliResult<ExitCode> {
    print!("{}", grammar_listing());
    Ok(ExitCode::SUCCESS)
}
