//! CLI module for minic
//!
//! This module provides the command-line interface for the front-end.
//!
//! ## Commands
//!
//! - `parse <file>` / `parse -c <code>` - Parse and print the concrete syntax tree
//! - `lex <file>` - Print the token stream
//! - `check <file>` - Parse silently, report diagnostics only
//! - `grammar` - Print the production table and parse-table statistics
//!
//! A bare `minic <file>` behaves like `minic parse <file>`.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::version::MINIC_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Syntax front-end for the minic language
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version = MINIC_VERSION)]
#[command(about = "Parse minic source into a concrete syntax tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to parse (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Trace lexing and every parser shift/reduce (raises the default log filter to `trace`)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print diagnostics as plain text instead of rich reports
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file or inline code and print the syntax tree
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE", conflicts_with = "code", required_unless_present = "code")]
        file: Option<PathBuf>,
        /// Parse inline source code
        #[arg(short = 'c', long = "code", value_name = "CODE")]
        code: Option<String>,
    },

    /// Print the token stream of a file
    Lex {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a file and report diagnostics only
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the grammar in BNF along with parse-table statistics
    Grammar,
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub debug: bool,
    pub plain: bool,
}

impl From<&Cli> for Options {
    fn from(cli: &Cli) -> Self {
        Self {
            debug: cli.debug,
            plain: cli.plain,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run(cli: Cli) {
    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = Options::from(&cli);

    match cli.command {
        Some(Command::Parse { file, code }) => match (file, code) {
            (_, Some(code)) => commands::parse_code(&code, options),
            (Some(file), None) => commands::parse_file(&file, options),
            (None, None) => Err(CliError::failure("Error: parse requires a file path or -c \"code\"")),
        },
        Some(Command::Lex { file }) => commands::lex_file(&file, options),
        Some(Command::Check { file }) => commands::check_file(&file, options),
        Some(Command::Grammar) => commands::print_grammar(),
        None => {
            // Default: parse the file if provided
            if let Some(file) = cli.file {
                commands::parse_file(&file, options)
            } else {
                Err(CliError::failure(
                    "Error: no input given (try `minic <FILE>` or `minic --help`)",
                ))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
