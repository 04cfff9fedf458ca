//! PASO source code front end
//!
//! This module transforms PASO source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens with INDENT/DEDENT markers)
//! - [`parse`]: Parsing (tokens → AST), split over `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! PASO is a small scripting language with Spanish keywords and
//! indentation-delimited blocks:
//!
//! ```text
//! entero a = 3          ~ declaración
//! si (a == 3 Y a != 2)
//!     muestra ("Hola")
//! si no
//!     a = a + 1
//! haz
//!     a = a - 1
//! mientras (a > 0)
//! ```
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod expressions;
mod statements;
