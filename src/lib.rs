//! # Introduction
//!
//! `paso` is the front end of an interpreter for PASO, a small scripting
//! language with Spanish keywords and Python-style significant indentation.
//! It scans source text into tokens, makes block structure explicit with
//! synthetic INDENT/DEDENT markers, and parses the token stream into an AST
//! that a later evaluation stage can consume.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens (+ LexErrors) → Parser → Program (or SyntaxError)
//! ```
//!
//! 1. [`parser::lexer`]: never aborts. Lexical problems are collected as
//!    [`LexError`]s and the token stream always ends with one EOF token.
//! 2. [`parser::parse`]: recursive descent over the tokens; the first grammar
//!    violation aborts with a [`SyntaxError`].
//! 3. [`parser::ast`]: the [`Program`] tree handed to downstream stages.
//! 4. [`ui`]: ratatui-based token/AST explorer used by the `paso` binary;
//!    not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let (tokens, lex_errors) = paso::scan("a = 3\n");
//! assert!(lex_errors.is_empty());
//! let program = paso::parse(tokens).expect("valid program");
//! assert_eq!(program.statements.len(), 1);
//! ```

pub mod parser;
pub mod ui;

pub use parser::ast::Program;
pub use parser::lexer::{scan, LexError, ScanOptions, Scanner, Token, TokenKind};
pub use parser::parse::{parse, Parser, SyntaxError};
