//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, token selection
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   tokens, AST, diagnostics, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from the source text
//! and the scan/parse results, then call [`App::run`] to start the event loop.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
