//! Expression parsing implementation
//!
//! This module handles parsing of PASO expressions using precedence climbing
//! for binary operators and recursive descent for unary and primary forms.
//!
//! # Precedence
//!
//! From lowest to highest, all binary levels left-associative:
//!
//! | Level          | Operators           |
//! |----------------|---------------------|
//! | logical or     | `O`                 |
//! | logical and    | `Y`                 |
//! | equality       | `==` `!=`           |
//! | relational     | `>` `<` `>=` `<=`   |
//! | additive       | `+` `-`             |
//! | multiplicative | `*` `/`             |
//! | unary          | `-` (prefix)        |
//!
//! Primaries are literals (`entero`/`decimal` numbers, strings, `verdadero`,
//! `falso`, `nulo`), variable references, and parenthesized expressions.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError, SyntaxErrorKind};

/// Token kinds that can begin an expression, used in error reports
const EXPRESSION_START: &[TokenKind] = &[
    TokenKind::Integer,
    TokenKind::Decimal,
    TokenKind::Text,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::Identifier,
    TokenKind::LParen,
    TokenKind::Minus,
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(Self::parse_logical_or)
    }

    /// Build a left-associative binary node from an already-parsed left side
    fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    /// Parse logical OR (O)
    fn parse_logical_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(TokenKind::Or) {
            let loc = self.previous_location();
            let right = self.parse_logical_and()?;
            left = Self::binary(BinOp::Or, left, right, loc);
        }

        Ok(left)
    }

    /// Parse logical AND (Y)
    fn parse_logical_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_equality()?;

        while self.match_token(TokenKind::And) {
            let loc = self.previous_location();
            let right = self.parse_equality()?;
            left = Self::binary(BinOp::And, left, right, loc);
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let loc = self.advance().location;
            let right = self.parse_relational()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse relational (> < >= <=)
    fn parse_relational(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Greater => BinOp::Gt,
                TokenKind::Less => BinOp::Lt,
                TokenKind::GreaterEq => BinOp::Ge,
                TokenKind::LessEq => BinOp::Le,
                _ => break,
            };
            let loc = self.advance().location;
            let right = self.parse_additive()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let loc = self.advance().location;
            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            let loc = self.advance().location;
            let right = self.parse_unary()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse unary minus (right-recursive, so `--x` nests)
    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.match_token(TokenKind::Minus) {
            let location = self.previous_location();
            let operand = Box::new(self.nested(Self::parse_unary)?);
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand,
                location,
            });
        }

        self.parse_primary()
    }

    /// Parse primary expression: literal, variable, or `( expr )`
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.peek().clone();
        let location = token.location;

        let value = match token.kind {
            TokenKind::Integer => {
                let n = token.lexeme.parse::<i64>().map_err(|_| SyntaxError {
                    kind: SyntaxErrorKind::InvalidLiteral {
                        kind: token.kind,
                        lexeme: token.lexeme.clone(),
                    },
                    location,
                })?;
                Literal::Integer(n)
            }
            TokenKind::Decimal => {
                let d = token.lexeme.parse::<f64>().map_err(|_| SyntaxError {
                    kind: SyntaxErrorKind::InvalidLiteral {
                        kind: token.kind,
                        lexeme: token.lexeme.clone(),
                    },
                    location,
                })?;
                Literal::Decimal(d)
            }
            TokenKind::Text => Literal::Text(token.lexeme),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr::Variable {
                    name: token.lexeme,
                    location,
                });
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RParen)?;
                return Ok(expr);
            }
            _ => return Err(self.error_expected(EXPRESSION_START)),
        };

        self.advance();
        Ok(Expr::Literal { value, location })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::{scan, TokenKind};
    use crate::parser::parse::{parse, SyntaxErrorKind};
    use test_log::test;

    /// Parse `x = <expr>` and render the right-hand side
    fn rendered(expr_source: &str) -> String {
        let (tokens, errors) = scan(&format!("x = {}", expr_source));
        assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);
        let program = parse(tokens).unwrap();
        match &program.statements[0] {
            Stmt::Assignment { expr, .. } => expr_to_string(expr),
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        assert_eq!(rendered("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(rendered("(1 + 2) * 3"), "((1 + 2) * 3)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(rendered("10 - 4 - 3"), "((10 - 4) - 3)");
        assert_eq!(rendered("8 / 2 / 2"), "((8 / 2) / 2)");
        assert_eq!(rendered("a O b O c"), "((a O b) O c)");
    }

    #[test]
    fn test_full_precedence_ladder() {
        assert_eq!(
            rendered("a O b Y c == d < e + f * -g"),
            "(a O (b Y (c == (d < (e + (f * (-g)))))))"
        );
    }

    #[test]
    fn test_relational_and_equality_levels() {
        assert_eq!(rendered("a >= 1 != b <= 2"), "((a >= 1) != (b <= 2))");
    }

    #[test]
    fn test_unary_minus_nests() {
        assert_eq!(rendered("--a"), "(-(-a))");
        assert_eq!(rendered("-2 * 3"), "((-2) * 3)");
    }

    #[test]
    fn test_literal_kinds() {
        assert_eq!(rendered("3.5"), "3.5");
        assert_eq!(rendered("\"hola\""), "\"hola\"");
        assert_eq!(rendered("verdadero Y falso"), "(verdadero Y falso)");
        assert_eq!(rendered("nulo"), "nulo");
    }

    #[test]
    fn test_binary_location_is_operator() {
        let (tokens, _) = scan("x = a + b");
        let program = parse(tokens).unwrap();
        let Stmt::Assignment { expr, .. } = &program.statements[0] else {
            panic!("Expected assignment");
        };
        assert_eq!(expr.location(), SourceLocation::new(1, 7));
    }

    #[test]
    fn test_missing_operand() {
        let (tokens, _) = scan("x = 1 +");
        let err = parse(tokens).unwrap_err();

        assert_eq!(err.found().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(err.expected().contains(&TokenKind::Identifier));
        assert!(err.expected().contains(&TokenKind::LParen));
    }

    #[test]
    fn test_unclosed_group() {
        let (tokens, _) = scan("x = (1 + 2");
        let err = parse(tokens).unwrap_err();
        assert_eq!(err.expected(), &[TokenKind::RParen]);
    }

    #[test]
    fn test_integer_overflow_is_invalid_literal() {
        let (tokens, _) = scan("x = 99999999999999999999");
        let err = parse(tokens).unwrap_err();
        assert!(matches!(
            err.kind,
            SyntaxErrorKind::InvalidLiteral {
                kind: TokenKind::Integer,
                ..
            }
        ));
        assert!(err.expected().is_empty());
    }
}
