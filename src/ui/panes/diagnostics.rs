//! Diagnostics pane rendering

use super::{border_style, clamp_scroll};
use crate::parser::lexer::LexError;
use crate::parser::parse::SyntaxError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// All diagnostics in report order: lexical errors first, then the syntax error
fn diagnostic_lines(lex_errors: &[LexError], syntax_error: Option<&SyntaxError>) -> Vec<String> {
    lex_errors
        .iter()
        .map(|e| e.to_string())
        .chain(syntax_error.map(|e| e.to_string()))
        .collect()
}

/// Render the diagnostics pane
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    lex_errors: &[LexError],
    syntax_error: Option<&SyntaxError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let lines = diagnostic_lines(lex_errors, syntax_error);

    let block = Block::default()
        .title(format!(" Diagnostics ({}) ", lines.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no errors)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.error)))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::scan;
    use crate::parser::parse::parse;

    #[test]
    fn test_diagnostics_order() {
        let (tokens, lex_errors) = scan("a = 1 @\nsi (a");
        let syntax_error = parse(tokens).err();

        let lines = diagnostic_lines(&lex_errors, syntax_error.as_ref());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Lexer error at line 1"));
        assert!(lines[1].starts_with("Parse error at line 2"));
    }

    #[test]
    fn test_no_diagnostics() {
        assert!(diagnostic_lines(&[], None).is_empty());
    }
}
