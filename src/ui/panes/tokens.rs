//! Token stream pane rendering
//!
//! One row per token: its position, its kind, and its lexeme. Keywords,
//! literals, and the INDENT/DEDENT/NEWLINE markers get their own colours so
//! the block structure the scanner inferred stands out.

use super::{border_style, clamp_scroll};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Short, fixed-width tag for a token kind
fn kind_tag(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Identifier => "IDENT",
        TokenKind::Integer => "INT",
        TokenKind::Decimal => "DEC",
        TokenKind::Text => "STR",
        TokenKind::Comment => "COMMENT",
        TokenKind::Indent => "INDENT",
        TokenKind::Dedent => "DEDENT",
        TokenKind::Newline => "NEWLINE",
        TokenKind::Eof => "EOF",
        k if k.is_keyword() => "KEYWORD",
        _ => "SYMBOL",
    }
}

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        k if k.is_structural() => Style::default()
            .fg(DEFAULT_THEME.structural)
            .add_modifier(Modifier::BOLD),
        k if k.is_type_keyword() => Style::default().fg(DEFAULT_THEME.type_name),
        k if k.is_keyword() => Style::default().fg(DEFAULT_THEME.keyword),
        TokenKind::Integer | TokenKind::Decimal => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Text => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Comment => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Text shown after the kind tag
fn lexeme_text(token: &Token) -> String {
    match token.kind {
        TokenKind::Text => format!("\"{}\"", token.lexeme),
        TokenKind::Comment => format!("~{}", token.lexeme),
        TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof => {
            String::new()
        }
        _ => token.lexeme.clone(),
    }
}

/// Scroll just enough to keep `selected` on screen
fn follow_selection(scroll_offset: &mut usize, selected: usize, visible_height: usize) {
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
}

/// Render the token stream pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    follow_selection(scroll_offset, selected, visible_height);
    clamp_scroll(scroll_offset, tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let position = format!("{:>4}:{:<3} ", token.location.line, token.location.column);
            let mut line = Line::from(vec![
                Span::styled(position, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:<8} ", kind_tag(token.kind)), kind_style(token.kind)),
                Span::styled(lexeme_text(token), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            if idx == selected {
                let highlight = Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
                for span in &mut line.spans {
                    span.style = span.style.patch(highlight);
                }
            }

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
