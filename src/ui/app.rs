//! Main TUI application state and logic

use crate::parser::ast::{ast_outline, Program};
use crate::parser::lexer::{LexError, Token};
use crate::parser::parse::SyntaxError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> diagnostics -> tokens -> ast)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Diagnostics => FocusedPane::Source,
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Ast => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being explored
    pub source_code: String,

    /// Scanner output
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,

    /// Parser output: exactly one of these is set
    pub program: Option<Program>,
    pub syntax_error: Option<SyntaxError>,

    /// Outline of `program`, computed once
    pub ast_lines: Vec<String>,

    /// Lines holding a lexical or syntax error
    pub error_lines: FxHashSet<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tokens` of the selected token
    pub selected_token: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub token_scroll: usize,
    pub ast_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Target visual row for the current line (None = not initialized yet)
    pub target_line_row: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app from the source text and the front end's results
    pub fn new(
        source_code: String,
        tokens: Vec<Token>,
        lex_errors: Vec<LexError>,
        parse_result: Result<Program, SyntaxError>,
    ) -> Self {
        let (program, syntax_error) = match parse_result {
            Ok(program) => (Some(program), None),
            Err(err) => (None, Some(err)),
        };

        let ast_lines = program.as_ref().map(ast_outline).unwrap_or_default();

        let mut error_lines: FxHashSet<usize> =
            lex_errors.iter().map(|e| e.location.line).collect();
        if let Some(err) = &syntax_error {
            error_lines.insert(err.location.line);
        }

        let status_message = match (&syntax_error, lex_errors.len()) {
            (None, 0) => "Parsed successfully".to_string(),
            (None, n) => format!("Parsed with {} lexical error(s)", n),
            (Some(_), n) => format!("Syntax error ({} lexical error(s))", n),
        };

        App {
            source_code,
            tokens,
            lex_errors,
            program,
            syntax_error,
            ast_lines,
            error_lines,
            focused_pane: FocusedPane::Tokens,
            selected_token: 0,
            source_scroll: 0,
            token_scroll: 0,
            ast_scroll: 0,
            diagnostics_scroll: 0,
            target_line_row: None, // Will be set to center on first render
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Line of the selected token, which the source pane follows
    pub fn current_line(&self) -> usize {
        self.tokens
            .get(self.selected_token)
            .map(|t| t.location.line)
            .unwrap_or(1)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tokens (top) | AST (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let current_line = self.current_line();

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            current_line,
            &self.error_lines,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            &mut self.target_line_row,
        );

        super::panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.lex_errors,
            self.syntax_error.as_ref(),
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            right_rows[1],
            &self.ast_lines,
            self.syntax_error.as_ref(),
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.selected_token,
            self.tokens.len(),
            self.lex_errors.len() + usize::from(self.syntax_error.is_some()),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.target_line_row {
                        self.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => self.select_token(self.selected_token.saturating_sub(1)),
                FocusedPane::Ast => self.ast_scroll = self.ast_scroll.saturating_sub(1),
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1)
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.target_line_row {
                        self.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => self.select_token(self.selected_token.saturating_add(1)),
                FocusedPane::Ast => self.ast_scroll = self.ast_scroll.saturating_add(1),
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1)
                }
            },
            KeyCode::Home => self.select_token(0),
            KeyCode::End => self.select_token(self.tokens.len().saturating_sub(1)),
            KeyCode::Char('e') => self.jump_to_error(),
            _ => {}
        }
    }

    /// Select a token, clamped to the stream
    fn select_token(&mut self, index: usize) {
        let last = self.tokens.len().saturating_sub(1);
        self.selected_token = index.min(last);
        if let Some(token) = self.tokens.get(self.selected_token) {
            self.status_message = format!("{} at {}", token, token.location);
        }
    }

    /// Select the first token at or after the first reported error
    fn jump_to_error(&mut self) {
        let first_error = self
            .syntax_error
            .iter()
            .map(|e| e.location)
            .chain(self.lex_errors.iter().map(|e| e.location))
            .min_by_key(|loc| (loc.line, loc.column));

        match first_error {
            Some(loc) => {
                let index = self
                    .tokens
                    .iter()
                    .position(|t| (t.location.line, t.location.column) >= (loc.line, loc.column))
                    .unwrap_or(self.tokens.len().saturating_sub(1));
                self.select_token(index);
                self.focused_pane = FocusedPane::Tokens;
            }
            None => {
                self.status_message = "No errors".to_string();
            }
        }
    }
}
