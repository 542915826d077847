#![forbid(unsafe_code)]

//! Cell styling with cascade semantics.

use crate::color::Color;

/// Text attribute flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StyleFlags(pub u8);

impl StyleFlags {
    /// No attributes set.
    pub const NONE: Self = Self(0);
    /// Bold / increased intensity.
    pub const BOLD: Self = Self(1 << 0);
    /// Dim / decreased intensity.
    pub const DIM: Self = Self(1 << 1);
    /// Single underline.
    pub const UNDERLINE: Self = Self(1 << 2);
    /// Reverse video (swap fg/bg).
    pub const REVERSE: Self = Self(1 << 3);

    /// Check if this flags set contains another flags set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if the flags set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two flag sets (OR operation).
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for StyleFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Unified styling type.
///
/// # Design Rationale
/// - Option fields allow inheritance (None = keep the cell's current value)
/// - Copy + small size for cheap passing
/// - Builder pattern for ergonomic construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color (text color).
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Text attributes (bold, underline, etc.).
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// Create an empty style (all properties inherit).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attr(StyleFlags::BOLD)
    }

    /// Add the dim attribute.
    #[must_use]
    pub fn dim(self) -> Self {
        self.attr(StyleFlags::DIM)
    }

    /// Add the underline attribute.
    #[must_use]
    pub fn underline(self) -> Self {
        self.attr(StyleFlags::UNDERLINE)
    }

    /// Add the reverse-video attribute.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.attr(StyleFlags::REVERSE)
    }

    /// Add an attribute flag.
    #[must_use]
    pub fn attr(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or(StyleFlags::NONE).union(flags));
        self
    }

    /// Overlay `other` on top of this style; set properties of `other` win.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: match (self.attrs, other.attrs) {
                (Some(a), Some(b)) => Some(a.union(b)),
                (a, b) => b.or(a),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Ansi16;

    #[test]
    fn builder_accumulates_attrs() {
        let s = Style::new().bold().underline();
        let attrs = s.attrs.unwrap();
        assert!(attrs.contains(StyleFlags::BOLD));
        assert!(attrs.contains(StyleFlags::UNDERLINE));
    }

    #[test]
    fn patch_prefers_overlay() {
        let base = Style::new().fg(Color::Ansi(Ansi16::Red)).bold();
        let over = Style::new().fg(Color::Ansi(Ansi16::Green));
        let merged = base.patch(over);
        assert_eq!(merged.fg, Some(Color::Ansi(Ansi16::Green)));
        assert!(merged.attrs.unwrap().contains(StyleFlags::BOLD));
    }

    #[test]
    fn patch_inherits_unset() {
        let base = Style::new().bg(Color::Ansi(Ansi16::Blue));
        let merged = base.patch(Style::new());
        assert_eq!(merged.bg, Some(Color::Ansi(Ansi16::Blue)));
    }
}
