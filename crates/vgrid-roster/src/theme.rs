//! Roster color scheme.

use vgrid_style::{Ansi16, Color, Style};

pub fn title() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightWhite)).bold()
}

pub fn label() -> Style {
    Style::new()
}

pub fn choice() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightBlack))
}

pub fn active_choice() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightGreen)).bold()
}

pub fn scrollbar_track() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightBlack))
}

pub fn scrollbar_thumb() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::White))
}

pub fn scrollbar_arrow() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightCyan))
}

pub fn status() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightBlack))
}

pub fn reset_button() -> Style {
    Style::new().fg(Color::Ansi(Ansi16::BrightRed)).reverse()
}
