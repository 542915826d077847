#![forbid(unsafe_code)]

//! Color types.

/// ANSI 16-color indices (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl Ansi16 {
    /// Raw ANSI index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A terminal color.
///
/// `Default` means "the terminal's default color" (no SGR color set),
/// which lets styles inherit the surrounding cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's configured default.
    #[default]
    Reset,
    /// One of the 16 base ANSI colors.
    Ansi(Ansi16),
    /// 24-bit RGB color.
    Rgb(u8, u8, u8),
}

impl From<Ansi16> for Color {
    fn from(c: Ansi16) -> Self {
        Self::Ansi(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reset() {
        assert_eq!(Color::default(), Color::Reset);
    }

    #[test]
    fn ansi_index_roundtrip() {
        assert_eq!(Ansi16::Black.index(), 0);
        assert_eq!(Ansi16::BrightWhite.index(), 15);
    }
}
