//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (`si`, `mientras`, `haz`, ...) and blocks
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! Every grammar rule is written in terms of [`Parser::consume`], a peek at the
//! current token, and recursive calls. There is no backtracking.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use log::debug;

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => single.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(|k| k.to_string()).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("Expected {}, found {}", describe_expected(.expected), .found)]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: Token,
    },

    #[error("Invalid {kind} '{lexeme}'")]
    InvalidLiteral { kind: TokenKind, lexeme: String },

    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at line {}, column {}: {}", .location.line, .location.column, .kind)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: SourceLocation,
}

impl SyntaxError {
    /// Token kinds the grammar would have accepted at the failure point
    pub fn expected(&self) -> &[TokenKind] {
        match &self.kind {
            SyntaxErrorKind::UnexpectedToken { expected, .. } => expected,
            SyntaxErrorKind::InvalidLiteral { .. } | SyntaxErrorKind::NestingTooDeep { .. } => {
                &[]
            }
        }
    }

    /// The offending token, when the failure was a token mismatch
    pub fn found(&self) -> Option<&Token> {
        match &self.kind {
            SyntaxErrorKind::UnexpectedToken { found, .. } => Some(found),
            SyntaxErrorKind::InvalidLiteral { .. } | SyntaxErrorKind::NestingTooDeep { .. } => {
                None
            }
        }
    }
}

/// Maximum combined nesting of blocks, parenthesized groups and unary
/// operators. Deeper input is rejected before it can exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse a scanned token sequence into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for PASO
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over a scanner's output.
    ///
    /// Comment tokens are discarded here. A sequence that does not end in
    /// EOF gets one appended.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();

        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (top-level statements)
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut program = Program::new();

        self.skip_newlines();
        while !self.is_at_end() {
            let stmt = self.parse_statement()?;
            program.statements.push(stmt);
            self.skip_newlines();
        }

        debug!(
            "parsed program with {} top-level statement(s)",
            program.statements.len()
        );
        Ok(program)
    }

    // ===== Helper methods =====

    /// Run `rule` one nesting level deeper, failing once the limit is passed
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                location: self.current_location(),
            });
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Assert the current token's kind, advance past it and return it.
    pub(crate) fn consume(&mut self, expected: TokenKind) -> Result<Token, SyntaxError> {
        if self.check(expected) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_expected(&[expected]))
        }
    }

    /// Build the error for an unexpected current token
    pub(crate) fn error_expected(&self, expected: &[TokenKind]) -> SyntaxError {
        SyntaxError {
            kind: SyntaxErrorKind::UnexpectedToken {
                expected: expected.to_vec(),
                found: self.peek().clone(),
            },
            location: self.current_location(),
        }
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::scan;
    use test_log::test;

    fn parse_source(source: &str) -> Result<Program, SyntaxError> {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);
        parse(tokens)
    }

    #[test]
    fn test_parse_simple_assignment() {
        let program = parse_source("a = 3").unwrap();

        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::Assignment { name, expr, .. } => {
                assert_eq!(name, "a");
                assert!(matches!(
                    expr,
                    Expr::Literal {
                        value: Literal::Integer(3),
                        ..
                    }
                ));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("\n\n~ solo comentarios\n").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_comments_are_discarded() {
        let program = parse_source("a = 3 ~primer comentario\nb = 4 ~otro\n").unwrap();
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "a", SourceLocation::new(1, 1)),
            Token::new(TokenKind::Assign, "=", SourceLocation::new(1, 3)),
            Token::new(TokenKind::Integer, "1", SourceLocation::new(1, 5)),
        ];
        let program = parse(tokens).unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_consume_mismatch_reports_expected_kind() {
        let err = parse_source("a 3").unwrap_err();

        assert_eq!(err.expected(), &[TokenKind::Assign]);
        assert_eq!(err.found().map(|t| t.kind), Some(TokenKind::Integer));
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_error_display() {
        let err = parse_source("a 3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 3: Expected '=', found integer literal 3"
        );
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let source = format!("x = {}", "(".repeat(10_000));
        let err = parse_source(&source).unwrap_err();

        assert_eq!(
            err.kind,
            SyntaxErrorKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );
        assert_eq!(err.location.line, 1);
        assert!(err.expected().is_empty());
        assert!(err.found().is_none());
    }

    #[test]
    fn test_deep_unary_chain_is_rejected() {
        let source = format!("x = {}1", "-".repeat(10_000));
        let err = parse_source(&source).unwrap_err();
        assert!(matches!(err.kind, SyntaxErrorKind::NestingTooDeep { .. }));
    }

    #[test]
    fn test_deep_blocks_are_rejected() {
        let mut source = String::new();
        for level in 0..1_000 {
            source.push_str(&" ".repeat(level));
            source.push_str("mientras (a)\n");
        }
        source.push_str(&" ".repeat(1_000));
        source.push_str("a = 1\n");

        let err = parse_source(&source).unwrap_err();
        assert!(matches!(err.kind, SyntaxErrorKind::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = MAX_NESTING_DEPTH / 2;
        let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
        let program = parse_source(&source).unwrap();
        assert_eq!(program.statements.len(), 1);

        // The counter unwinds, so siblings do not accumulate depth
        let wide = vec![format!("{}1{}", "(".repeat(depth), ")".repeat(depth)); 4].join(" + ");
        assert!(parse_source(&format!("x = {}", wide)).is_ok());
    }

    #[test]
    fn test_nesting_error_display() {
        let err = parse_source(&format!("x = {}", "(".repeat(500))).unwrap_err();
        assert!(err.to_string().ends_with("Nesting deeper than 128 levels"));
    }

    #[test]
    fn test_describe_expected_lists_alternatives() {
        assert_eq!(
            describe_expected(&[TokenKind::Newline, TokenKind::Dedent, TokenKind::Eof]),
            "newline, DEDENT or end of file"
        );
    }
}
