#![forbid(unsafe_code)]

//! A single terminal cell.

use vgrid_style::{Color, Style, StyleFlags};

/// One character cell with resolved colors and attributes.
///
/// Cells hold resolved values, not cascading options; applying a [`Style`]
/// resolves its set properties onto the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character displayed in this cell.
    pub ch: char,
    /// Resolved foreground color.
    pub fg: Color,
    /// Resolved background color.
    pub bg: Color,
    /// Resolved attribute flags.
    pub attrs: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell with default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: Color::Reset,
        bg: Color::Reset,
        attrs: StyleFlags::NONE,
    };

    /// Create a cell from a character with default colors.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: StyleFlags::NONE,
        }
    }

    /// Apply a style, resolving its set properties onto this cell.
    #[must_use]
    pub fn styled(mut self, style: Style) -> Self {
        self.apply(style);
        self
    }

    /// Apply a style in place.
    pub fn apply(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        if let Some(attrs) = style.attrs {
            self.attrs = self.attrs.union(attrs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgrid_style::Ansi16;

    #[test]
    fn default_cell_is_blank() {
        let c = Cell::default();
        assert_eq!(c.ch, ' ');
        assert_eq!(c.fg, Color::Reset);
    }

    #[test]
    fn styled_resolves_set_properties() {
        let style = Style::new().fg(Color::Ansi(Ansi16::Red)).bold();
        let c = Cell::from_char('x').styled(style);
        assert_eq!(c.fg, Color::Ansi(Ansi16::Red));
        assert_eq!(c.bg, Color::Reset);
        assert!(c.attrs.contains(StyleFlags::BOLD));
    }
}
