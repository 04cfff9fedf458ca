//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the PASO program
//! with basic syntax highlighting and exploration indicators.
//!
//! # Features
//!
//! - Syntax highlighting for PASO keywords, types, strings, numbers, and comments
//! - Current line highlighting (the line of the selected token)
//! - Error line highlighting for lexical and syntax errors
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles per line, so a broken line still renders.

use super::{border_style, clamp_scroll};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Simple syntax highlighting for one line of PASO code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to end of line
        if c == '~' {
            flush_word(&mut current_word, &mut spans);
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        // Strings (no escapes)
        if c == '"' {
            flush_word(&mut current_word, &mut spans);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += 1;
            }
            if end < chars.len() {
                end += 1;
            }
            let text: String = chars[i..end].iter().collect();
            spans.push(Span::styled(text, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && !(c == '.' && is_number(&current_word)) {
            flush_word(&mut current_word, &mut spans);

            let style = match c {
                '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                '+' | '-' | '*' | '/' | '=' | '!' | '<' | '>' | ',' | '.' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
                _ => Style::default(),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut current_word, &mut spans);
    Line::from(spans)
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn flush_word(word: &mut String, spans: &mut Vec<Span<'_>>) {
    if !word.is_empty() {
        let style = get_keyword_style(word);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_keyword_style(word: &str) -> Style {
    match word {
        "entero" | "decimal" | "texto" | "booleano" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "si" | "no" | "de" | "lo" | "contrario" | "haz" | "mientras" | "durante" | "muestra"
        | "devuelve" | "Y" | "O" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        "verdadero" | "falso" | "nulo" => Style::default().fg(DEFAULT_THEME.number), // Constants
        w if is_number(w) => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg), // Variables/Identifiers
    }
}

/// Render the source code pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    error_lines: &FxHashSet<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
    target_line_row: &mut Option<usize>,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the current line at a fixed visual row, centered initially
    let target_row = target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    *target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1;
        *scroll_offset = target_line_idx.saturating_sub(target_row);
        clamp_scroll(scroll_offset, total_lines, visible_height);
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;
            let is_error = error_lines.contains(&line_num);
            let line_num_str = format!("{:4} ", line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line);

            if is_error && is_current {
                // White text on red for visibility
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
            } else if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
