//! AST outline pane rendering

use super::{border_style, clamp_scroll};
use crate::parser::parse::SyntaxError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Colour an outline row: the node label stands out from its details
fn outline_line(row: &str) -> Line<'_> {
    let indent_len = row.len() - row.trim_start().len();
    let (indent, rest) = row.split_at(indent_len);

    let (label, detail) = match rest.find(' ') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    let label_style = match label {
        "then" | "else" | "body" => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    };

    Line::from(vec![
        Span::raw(indent),
        Span::styled(label, label_style),
        Span::styled(detail, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the AST pane, or the syntax error when parsing failed
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    syntax_error: Option<&SyntaxError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" AST ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if let Some(err) = syntax_error {
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                "(no tree: parsing failed)",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
            Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, outline.len(), visible_height);

    let items: Vec<ListItem> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| ListItem::new(outline_line(row)))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_line_splits_label() {
        let line = outline_line("    Assignment a = 3 @1");
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["    ", "Assignment", " a = 3 @1"]);
    }

    #[test]
    fn test_outline_line_block_labels_are_dimmed() {
        let line = outline_line("  then");
        assert_eq!(line.spans[1].style.fg, Some(DEFAULT_THEME.comment));
    }
}
