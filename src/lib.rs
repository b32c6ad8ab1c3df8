//! Lossless dotenv lexer, parser, document model, and formatter.
//!
//! `.env` text parses into an [`EnvDoc`]: an ordered sequence of
//! variables, comments, and blank lines that serializes back to
//! equivalent text, so documents can be edited in place without losing
//! their structure.
//!
//! # Quick start
//!
//! ## Parse, edit, serialize
//!
//! ```
//! use envfile_rs::parse_str;
//!
//! let mut doc = parse_str("# service\nHOST=localhost\nPORT=8080\n").unwrap();
//! assert_eq!(doc.get("PORT"), Some("8080"));
//! doc.set("PORT", "9090");
//! assert_eq!(doc.to_string(), "# service\nHOST=localhost\nPORT=9090\n");
//! ```
//!
//! ## Merge override chains
//!
//! ```no_run
//! use envfile_rs::parse_files;
//!
//! // `.env.local?` is optional and silently skipped when missing.
//! let doc = parse_files([".env", ".env.local?"]).unwrap();
//! println!("{}", doc.to_string());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod doc;
pub mod formatter;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod token;

use std::path::PathBuf;

pub use doc::{Element, EnvDoc};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, tokenize};
#[cfg(feature = "tokio")]
pub use loader::{parse_file_async, parse_files_async, parse_reader_async};
pub use loader::{parse_file, parse_files, parse_reader, parse_readers};
pub use parser::build;
pub use token::{Quote, Span, Token, TokenKind};

/// Unified error type covering lexing and file access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A required file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tokenize and build a dotenv document in one step.
pub fn parse_str(input: &str) -> Result<EnvDoc, Error> {
    let tokens = tokenize(input)?;
    Ok(build(&tokens))
}
