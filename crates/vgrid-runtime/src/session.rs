#![forbid(unsafe_code)]

//! Terminal session lifecycle.
//!
//! Entering a session puts the terminal into raw mode and optionally the
//! alternate screen with mouse capture; everything is restored on drop,
//! including on unwind, so a panicking app leaves the terminal usable.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute, queue};

use vgrid_core::event::Event;

/// What the session enables on the terminal.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Switch to the alternate screen.
    pub alt_screen: bool,
    /// Capture mouse events.
    pub mouse: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: true,
        }
    }
}

/// An active terminal session. Restores the terminal on drop.
#[derive(Debug)]
pub struct TerminalSession {
    out: io::Stdout,
    options: SessionOptions,
}

impl TerminalSession {
    /// Enter a session: raw mode, then the configured screen/mouse modes.
    pub fn enter(options: SessionOptions) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if options.alt_screen {
            queue!(out, EnterAlternateScreen)?;
        }
        if options.mouse {
            queue!(out, EnableMouseCapture)?;
        }
        queue!(out, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;
        out.flush()?;
        Ok(Self { out, options })
    }

    /// Current terminal size in (columns, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Check for a pending input event.
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next input event, converted to the canonical form.
    ///
    /// Returns `None` for backend events with no canonical equivalent.
    pub fn read(&mut self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(crossterm::event::read()?))
    }

    /// The session's output stream.
    pub fn writer(&mut self) -> &mut io::Stdout {
        &mut self.out
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.options.mouse {
            let _ = execute!(self.out, DisableMouseCapture);
        }
        if self.options.alt_screen {
            let _ = execute!(self.out, LeaveAlternateScreen);
        }
        let _ = execute!(self.out, cursor::Show);
        let _ = disable_raw_mode();
    }
}
