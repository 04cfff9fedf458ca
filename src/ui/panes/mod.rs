//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the explorer,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and current line indicator
//! - [`tokens`]: The scanner's token stream, with structural markers highlighted
//! - [`ast`]: Indented outline of the parsed program
//! - [`diagnostics`]: Lexical and syntax errors
//! - [`status`]: Status bar with keybindings and error count
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*_pane()` function that takes
//! the frame, its area, the data to show, focus state, and a scroll offset
//! it clamps in place.

pub mod ast;
pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;

// Re-export render functions for convenience
pub use ast::render_ast_pane;
pub use diagnostics::render_diagnostics_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp a scroll offset so the last page stays full
pub(crate) fn clamp_scroll(scroll_offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }
}
