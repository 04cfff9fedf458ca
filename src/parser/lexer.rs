//! Lexer (scanner) for PASO source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! PASO blocks are delimited by indentation, so the scanner measures the
//! leading whitespace of every line and emits synthetic [`TokenKind::Indent`] /
//! [`TokenKind::Dedent`] markers in place of braces.
//!
//! Lexical problems never stop the scan. They are collected as [`LexError`]s
//! next to the token stream, and the stream always ends with exactly one
//! [`TokenKind::Eof`].
//!
//! # Indentation policy
//!
//! - A space counts 1 towards the line width, a tab counts
//!   [`ScanOptions::tab_width`].
//! - Blank and comment-only lines are ignored for indentation purposes.
//! - End of input is measured as a line of width 0, closing every open block.
//! - A dedent to a width that no enclosing block uses is reported as
//!   [`LexErrorKind::InconsistentDedent`]; the popped levels still emit DEDENTs.

use super::ast::SourceLocation;
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::fmt;

/// All token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Identifier,
    Integer,
    Decimal,
    Text,
    True,  // verdadero
    False, // falso
    Null,  // nulo

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Comparison
    Greater,   // >
    Less,      // <
    GreaterEq, // >=
    LessEq,    // <=
    EqEq,      // ==
    NotEq,     // !=

    // Logical
    And, // Y
    Or,  // O

    // Punctuation
    Comma,  // ,
    Dot,    // .
    LParen, // (
    RParen, // )
    Assign, // =

    Comment, // ~ ...

    // Keywords
    If,        // si
    Else,      // si no
    Otherwise, // de lo contrario
    Do,        // haz
    While,     // mientras
    For,       // durante
    Print,     // muestra
    Return,    // devuelve

    // Type keywords
    IntType,     // entero
    DecimalType, // decimal
    TextType,    // texto
    BoolType,    // booleano

    // Block structure
    Indent,
    Dedent,
    Newline,

    Eof,
}

impl TokenKind {
    /// Whether this kind introduces a variable declaration
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::IntType | TokenKind::DecimalType | TokenKind::TextType | TokenKind::BoolType
        )
    }

    /// Whether this kind comes from the keyword table
    pub fn is_keyword(self) -> bool {
        self.is_type_keyword()
            || matches!(
                self,
                TokenKind::And
                    | TokenKind::Or
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
                    | TokenKind::If
                    | TokenKind::Else
                    | TokenKind::Otherwise
                    | TokenKind::Do
                    | TokenKind::While
                    | TokenKind::For
                    | TokenKind::Print
                    | TokenKind::Return
            )
    }

    /// Whether this kind is a synthetic block-structure marker
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::Indent | TokenKind::Dedent | TokenKind::Newline | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Decimal => "decimal literal",
            TokenKind::Text => "string literal",
            TokenKind::True => "'verdadero'",
            TokenKind::False => "'falso'",
            TokenKind::Null => "'nulo'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Greater => "'>'",
            TokenKind::Less => "'<'",
            TokenKind::GreaterEq => "'>='",
            TokenKind::LessEq => "'<='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::And => "'Y'",
            TokenKind::Or => "'O'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Assign => "'='",
            TokenKind::Comment => "comment",
            TokenKind::If => "'si'",
            TokenKind::Else => "'si no'",
            TokenKind::Otherwise => "'de lo contrario'",
            TokenKind::Do => "'haz'",
            TokenKind::While => "'mientras'",
            TokenKind::For => "'durante'",
            TokenKind::Print => "'muestra'",
            TokenKind::Return => "'devuelve'",
            TokenKind::IntType => "'entero'",
            TokenKind::DecimalType => "'decimal'",
            TokenKind::TextType => "'texto'",
            TokenKind::BoolType => "'booleano'",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// A single token: its kind, the source text backing it, and where it starts.
///
/// String tokens carry the text between the quotes and comment tokens the text
/// after `~`. INDENT, DEDENT and EOF carry an empty lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Integer => write!(f, "integer literal {}", self.lexeme),
            TokenKind::Decimal => write!(f, "decimal literal {}", self.lexeme),
            TokenKind::Text => write!(f, "string literal \"{}\"", self.lexeme),
            TokenKind::Comment => write!(f, "comment '{}'", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Invalid character: '{0}'")]
    InvalidCharacter(char),

    #[error("Malformed negation: '!' must be followed by '='")]
    MalformedNegation,

    #[error("Inconsistent dedent: no enclosing block is indented to width {width}")]
    InconsistentDedent { width: usize },

    #[error("Unterminated block: input ends inside {open} indented block(s)")]
    UnterminatedBlock { open: usize },
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Lexer error at line {}, column {}: {}", .location.line, .location.column, .kind)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

/// Scanner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Indentation width contributed by one tab character
    pub tab_width: usize,
    /// Emit [`TokenKind::Comment`] tokens; when false comments are dropped
    pub emit_comments: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            tab_width: 8,
            emit_comments: true,
        }
    }
}

/// Open indentation levels of a single scan.
///
/// `levels` is strictly increasing; `current` is the width of the last
/// measured line, which differs from the top of `levels` only after an
/// inconsistent dedent.
#[derive(Debug, Default)]
struct IndentTracker {
    levels: Vec<usize>,
    current: usize,
}

fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    let mut table = FxHashMap::default();
    table.insert("Y", TokenKind::And);
    table.insert("O", TokenKind::Or);
    table.insert("verdadero", TokenKind::True);
    table.insert("falso", TokenKind::False);
    table.insert("nulo", TokenKind::Null);
    table.insert("si", TokenKind::If);
    table.insert("si no", TokenKind::Else);
    table.insert("de lo contrario", TokenKind::Otherwise);
    table.insert("haz", TokenKind::Do);
    table.insert("mientras", TokenKind::While);
    table.insert("durante", TokenKind::For);
    table.insert("muestra", TokenKind::Print);
    table.insert("devuelve", TokenKind::Return);
    table.insert("entero", TokenKind::IntType);
    table.insert("decimal", TokenKind::DecimalType);
    table.insert("texto", TokenKind::TextType);
    table.insert("booleano", TokenKind::BoolType);
    table
}

/// Words that may continue a keyword across spaces on the same line
fn multi_word_tail(first: &str) -> Option<&'static [&'static str]> {
    match first {
        "si" => Some(&["no"]),
        "de" => Some(&["lo", "contrario"]),
        _ => None,
    }
}

/// Scan `source` with the default options.
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Scanner::new(source).tokenize()
}

/// Lexer for PASO source code
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    options: ScanOptions,
    keywords: FxHashMap<&'static str, TokenKind>,
    errors: Vec<LexError>,
}

impl Scanner {
    /// Create a new scanner for the given source string.
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ScanOptions::default())
    }

    pub fn with_options(input: &str, options: ScanOptions) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            options,
            keywords: keyword_table(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// Always returns a token sequence terminated by a single EOF token,
    /// together with every diagnostic recorded along the way.
    pub fn tokenize(&mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut indents = IndentTracker::default();

        // The first line is measured like any line following a newline
        self.handle_indentation(&mut indents, &mut tokens);

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                let loc = self.current_location();
                self.advance();
                tokens.push(Token::new(TokenKind::Newline, "\n", loc));
                self.handle_indentation(&mut indents, &mut tokens);
            } else if ch.is_whitespace() {
                self.advance();
            } else if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        let eof_loc = self.current_location();
        if !indents.levels.is_empty() {
            self.report(
                LexErrorKind::UnterminatedBlock {
                    open: indents.levels.len(),
                },
                eof_loc,
            );
            for _ in indents.levels.drain(..) {
                tokens.push(Token::new(TokenKind::Dedent, "", eof_loc));
            }
        }
        tokens.push(Token::new(TokenKind::Eof, "", eof_loc));

        debug!(
            "scanned {} tokens with {} lexical error(s)",
            tokens.len(),
            self.errors.len()
        );
        (tokens, std::mem::take(&mut self.errors))
    }

    /// Measure the indentation of the line starting at the cursor and emit
    /// the INDENT/DEDENT tokens it implies.
    fn handle_indentation(&mut self, indents: &mut IndentTracker, tokens: &mut Vec<Token>) {
        let mut width = 0;
        while let Some(ch) = self.peek() {
            match ch {
                ' ' => width += 1,
                '\t' => width += self.options.tab_width,
                _ => break,
            }
            self.advance();
        }

        match self.peek() {
            // Blank or comment-only line: layout carries no structure
            Some('\n') => return,
            Some('\r') if self.peek_ahead(1) == Some('\n') => return,
            Some('~') if self.input[self.position..].contains(&'\n') => return,
            // A trailing comment line or the end of input closes every block
            Some('~') | None => width = 0,
            Some(_) => {}
        }

        let loc = self.current_location();
        if width > indents.current {
            trace!("INDENT to width {} at {}", width, loc);
            indents.levels.push(width);
            indents.current = width;
            tokens.push(Token::new(TokenKind::Indent, "", loc));
        } else if width < indents.current {
            while let Some(&top) = indents.levels.last() {
                if top <= width {
                    break;
                }
                indents.levels.pop();
                trace!("DEDENT from width {} at {}", top, loc);
                tokens.push(Token::new(TokenKind::Dedent, "", loc));
            }

            let enclosing = indents.levels.last().copied().unwrap_or(0);
            if enclosing != width {
                self.report(LexErrorKind::InconsistentDedent { width }, loc);
            }
            indents.current = width;
        }
    }

    /// Get next token, or `None` when the character was rejected or the
    /// token is suppressed by the options.
    fn next_token(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let start = self.position;
        let ch = self.advance()?;

        let kind = match ch {
            // String literals
            '"' => return Some(self.string_literal(loc)),

            // Line comments
            '~' => return self.comment(loc),

            // Numeric literals
            '0'..='9' => return Some(self.number_literal(start, loc)),

            // Identifiers and keywords
            c if c.is_alphabetic() => return Some(self.identifier_or_keyword(start, loc)),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::NotEq
                } else {
                    self.report(LexErrorKind::MalformedNegation, loc);
                    return None;
                }
            }

            other => {
                self.report(LexErrorKind::InvalidCharacter(other), loc);
                return None;
            }
        };

        Some(self.make_token(kind, start, loc))
    }

    /// Parse string literal (no escape sequences)
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Token::new(TokenKind::Text, string, loc);
            }
            string.push(ch);
        }

        self.report(LexErrorKind::UnterminatedString, loc);
        Token::new(TokenKind::Text, string, loc)
    }

    /// Parse line comment (~ ...), leaving the newline in place
    fn comment(&mut self, loc: SourceLocation) -> Option<Token> {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        if self.options.emit_comments {
            Some(Token::new(TokenKind::Comment, text, loc))
        } else {
            None
        }
    }

    /// Parse numeric literal: digits, optionally `.` and more digits
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Token {
        self.skip_digits();

        let is_decimal = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());
        if is_decimal {
            self.advance(); // consume '.'
            self.skip_digits();
            self.make_token(TokenKind::Decimal, start, loc)
        } else {
            self.make_token(TokenKind::Integer, start, loc)
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Parse identifier or keyword, merging `si no` and `de lo contrario`
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric()) {
            self.advance();
        }

        let word: String = self.input[start..self.position].iter().collect();

        if let Some(tail) = multi_word_tail(&word) {
            if let Some(end) = self.match_words_ahead(tail) {
                while self.position < end {
                    self.advance();
                }
                let canonical = std::iter::once(word.as_str())
                    .chain(tail.iter().copied())
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some(&kind) = self.keywords.get(canonical.as_str()) {
                    return self.make_token(kind, start, loc);
                }
            }
        }

        let kind = self
            .keywords
            .get(word.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        Token::new(kind, word, loc)
    }

    /// Check, without consuming, whether the cursor is followed on the same
    /// line by each of `words` as whole words separated by spaces or tabs.
    /// Returns the input position just past the last word.
    fn match_words_ahead(&self, words: &[&str]) -> Option<usize> {
        let mut pos = self.position;

        for word in words {
            let gap_start = pos;
            while matches!(self.input.get(pos), Some(' ') | Some('\t')) {
                pos += 1;
            }
            if pos == gap_start {
                return None;
            }

            for expected in word.chars() {
                if self.input.get(pos) != Some(&expected) {
                    return None;
                }
                pos += 1;
            }

            if self.input.get(pos).is_some_and(|c| c.is_alphanumeric()) {
                return None;
            }
        }

        Some(pos)
    }

    fn make_token(&self, kind: TokenKind, start: usize, loc: SourceLocation) -> Token {
        let lexeme: String = self.input[start..self.position].iter().collect();
        Token::new(kind, lexeme, loc)
    }

    fn report(&mut self, kind: LexErrorKind, location: SourceLocation) {
        trace!("lexical error at {}: {}", location, kind);
        self.errors.push(LexError { kind, location });
    }

    /// Consume the next character if it is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
