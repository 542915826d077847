#![forbid(unsafe_code)]

//! Frame presentation.
//!
//! Writes a rendered buffer to the terminal as a diff against the
//! previously presented buffer: only changed cells are emitted, with
//! cursor moves and SGR changes batched across runs. The diff is purely a
//! terminal-I/O reduction; callers rebuild their content every pass.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use vgrid_render::{Buffer, Cell};
use vgrid_style::{Color, StyleFlags};

/// Presents buffers, diffing against the last presented frame.
#[derive(Debug, Default)]
pub struct Presenter {
    prev: Option<Buffer>,
}

impl Presenter {
    /// Create a presenter with no previous frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, forcing the next present to redraw fully.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Write `buffer` to `out`, emitting only cells that changed since the
    /// last presented buffer of the same dimensions.
    pub fn present(&mut self, out: &mut impl Write, buffer: &Buffer) -> io::Result<()> {
        let full = match &self.prev {
            Some(prev) => prev.width() != buffer.width() || prev.height() != buffer.height(),
            None => true,
        };

        let mut sgr = SgrState::default();
        let mut cursor: Option<(u16, u16)> = None;

        for (y, row) in buffer.rows().enumerate() {
            let y = y as u16;
            for (x, cell) in row.iter().enumerate() {
                let x = x as u16;
                if !full
                    && let Some(prev) = &self.prev
                    && prev.get(x, y) == Some(cell)
                {
                    continue;
                }

                if cursor != Some((x, y)) {
                    queue!(out, MoveTo(x, y))?;
                }
                sgr.apply(out, cell)?;
                queue!(out, Print(cell.ch))?;
                cursor = Some((x.saturating_add(1), y));
            }
        }

        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;
        self.prev = Some(buffer.clone());
        Ok(())
    }
}

/// The SGR state currently active on the output stream.
#[derive(Debug, Default)]
struct SgrState {
    current: Option<(Color, Color, StyleFlags)>,
}

impl SgrState {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        let wanted = (cell.fg, cell.bg, cell.attrs);
        if self.current == Some(wanted) {
            return Ok(());
        }

        queue!(
            out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(convert_color(cell.fg)),
            SetBackgroundColor(convert_color(cell.bg)),
        )?;
        if cell.attrs.contains(StyleFlags::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if cell.attrs.contains(StyleFlags::DIM) {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        if cell.attrs.contains(StyleFlags::UNDERLINE) {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        if cell.attrs.contains(StyleFlags::REVERSE) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        self.current = Some(wanted);
        Ok(())
    }
}

fn convert_color(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Ansi(c) => CtColor::AnsiValue(c.index()),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}
