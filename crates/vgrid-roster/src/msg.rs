//! Application messages.

use vgrid_core::event::{Event, KeyCode, KeyEventKind};

use crate::config;

/// Messages that update the roster model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Msg {
    /// Quit the application.
    Quit,
    /// Clear all selections.
    Reset,
    /// Scroll by a signed pixel delta.
    ScrollByPx(f64),
    /// Jump to the top.
    ScrollToStart,
    /// Jump to the bottom.
    ScrollToEnd,
    /// Terminal focus was lost.
    FocusLost,
    /// Nothing to do.
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        let row = f64::from(config::ROW_HEIGHT);
        let page = f64::from(config::VISIBLE_ROWS * config::ROW_HEIGHT);

        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('q') | KeyCode::Escape => Msg::Quit,
                KeyCode::Char('c') if key.ctrl() => Msg::Quit,
                KeyCode::Char('r') => Msg::Reset,
                KeyCode::Up => Msg::ScrollByPx(-row),
                KeyCode::Down => Msg::ScrollByPx(row),
                KeyCode::PageUp => Msg::ScrollByPx(-page),
                KeyCode::PageDown => Msg::ScrollByPx(page),
                KeyCode::Home => Msg::ScrollToStart,
                KeyCode::End => Msg::ScrollToEnd,
                _ => Msg::Noop,
            },
            Event::Focus(false) => Msg::FocusLost,
            _ => Msg::Noop,
        }
    }
}
