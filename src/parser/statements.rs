//! Statement parsing implementation
//!
//! This module handles parsing of all PASO statement types:
//!
//! - Variable declarations: `entero x = 42`
//! - Assignments: `x = x + 1`
//! - Output: `muestra (x)`
//! - Control flow: `si`, `mientras`, `haz ... mientras`
//!
//! # Grammar
//!
//! ```text
//! statement  ::= if_stmt | while_stmt | do_while | print | assignment | var_decl
//! if_stmt    ::= 'si' '(' expr ')' block [ ('si no' | 'de lo contrario') block ]
//! while_stmt ::= 'mientras' '(' expr ')' block
//! do_while   ::= 'haz' block 'mientras' '(' expr ')' end
//! print      ::= 'muestra' expr end
//! assignment ::= IDENT '=' expr end
//! var_decl   ::= type IDENT [ '=' expr ] end
//! block      ::= NEWLINE+ INDENT statement+ DEDENT
//! end        ::= NEWLINE | (before DEDENT or EOF)
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};
use log::trace;

/// Token kinds that can begin a statement, used in error reports
const STATEMENT_START: &[TokenKind] = &[
    TokenKind::If,
    TokenKind::While,
    TokenKind::Do,
    TokenKind::Print,
    TokenKind::Identifier,
    TokenKind::IntType,
    TokenKind::DecimalType,
    TokenKind::TextType,
    TokenKind::BoolType,
];

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        trace!(
            "parsing statement at {} starting with {}",
            self.current_location(),
            self.peek()
        );

        match self.peek_kind() {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::Identifier => self.parse_assignment(),
            kind if kind.is_type_keyword() => self.parse_variable_declaration(),
            _ => Err(self.error_expected(STATEMENT_START)),
        }
    }

    /// Parse an indented block: the line break, INDENT, one or more
    /// statements, and the closing DEDENT
    pub(crate) fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        self.consume(TokenKind::Newline)?;
        self.skip_newlines();
        self.consume(TokenKind::Indent)?;

        self.nested(Self::parse_block_body)
    }

    /// Statements of a block after its INDENT, through the closing DEDENT
    fn parse_block_body(&mut self) -> Result<Block, SyntaxError> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::Dedent) || self.is_at_end() {
                break;
            }
            statements.push(self.parse_statement()?);
        }

        if statements.is_empty() {
            return Err(self.error_expected(STATEMENT_START));
        }

        self.consume(TokenKind::Dedent)?;
        Ok(statements)
    }

    /// Finish a simple statement: a newline is consumed, while DEDENT and
    /// EOF are left for the enclosing rule.
    fn expect_statement_end(&mut self) -> Result<(), SyntaxError> {
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            _ => Err(self.error_expected(&[
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ])),
        }
    }

    /// Parse `( expr )`
    fn parse_parenthesized_condition(&mut self) -> Result<Expr, SyntaxError> {
        self.consume(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;
        Ok(condition)
    }

    /// Parse if statement with an optional `si no` / `de lo contrario` block
    fn parse_if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.consume(TokenKind::If)?.location;
        let condition = self.parse_parenthesized_condition()?;
        let then_block = self.parse_block()?;

        let else_block = if self.match_token(TokenKind::Else)
            || self.match_token(TokenKind::Otherwise)
        {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.consume(TokenKind::While)?.location;
        let condition = self.parse_parenthesized_condition()?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse do-while statement; the trailing condition closes it
    fn parse_do_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.consume(TokenKind::Do)?.location;
        let body = self.parse_block()?;

        self.consume(TokenKind::While)?;
        let condition = self.parse_parenthesized_condition()?;
        self.expect_statement_end()?;

        Ok(Stmt::DoWhile {
            body,
            condition,
            location,
        })
    }

    /// Parse print statement. `muestra ( expr )` is the usual spelling; the
    /// parentheses are an ordinary grouped expression.
    fn parse_print_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.consume(TokenKind::Print)?.location;
        let expr = self.parse_expression()?;
        self.expect_statement_end()?;

        Ok(Stmt::Print { expr, location })
    }

    /// Parse assignment: name = expr
    fn parse_assignment(&mut self) -> Result<Stmt, SyntaxError> {
        let name_token = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::Assign)?;
        let expr = self.parse_expression()?;
        self.expect_statement_end()?;

        Ok(Stmt::Assignment {
            name: name_token.lexeme,
            expr,
            location: name_token.location,
        })
    }

    /// Parse variable declaration: type name [= expr]
    fn parse_variable_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        let var_type = match self.peek_kind() {
            TokenKind::IntType => VarType::Integer,
            TokenKind::DecimalType => VarType::Decimal,
            TokenKind::TextType => VarType::Text,
            TokenKind::BoolType => VarType::Boolean,
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::IntType,
                    TokenKind::DecimalType,
                    TokenKind::TextType,
                    TokenKind::BoolType,
                ]))
            }
        };
        self.advance();

        let name = self.consume(TokenKind::Identifier)?.lexeme;

        let init = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_statement_end()?;

        Ok(Stmt::VarDeclaration {
            var_type,
            name,
            init,
            location,
        })
    }
}
