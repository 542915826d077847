#![forbid(unsafe_code)]

//! Widgets for vgrid: virtual row windowing, the selectable row table,
//! the scrollbar, and the continuous-scroll session.

pub mod mouse;
pub mod scroll;
pub mod scrollbar;
pub mod store;
pub mod table;
pub mod window;

use vgrid_core::geometry::Rect;
use vgrid_render::{Cell, Frame};
use vgrid_style::Style;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;
    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Draw a text span at (x, y), clipping at `max_x`.
///
/// Wide characters occupy their full display width; the continuation
/// columns are styled blanks so the span never splits a glyph at the clip
/// edge.
pub fn draw_text_span(frame: &mut Frame, x: u16, y: u16, text: &str, style: Style, max_x: u16) {
    use unicode_width::UnicodeWidthChar;

    let mut cx = x;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if cx >= max_x || cx.saturating_add(w) > max_x {
            break;
        }
        frame.buffer.set(cx, y, Cell::from_char(ch).styled(style));
        for k in 1..w {
            frame.buffer.set(cx + k, y, Cell::from_char(' ').styled(style));
        }
        cx += w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_text_span_clips_at_max_x() {
        let mut frame = Frame::new(10, 1);
        draw_text_span(&mut frame, 0, 0, "abcdefghij", Style::new(), 3);
        assert_eq!(frame.buffer.get(2, 0).unwrap().ch, 'c');
        assert_eq!(frame.buffer.get(3, 0).unwrap().ch, ' ');
    }

    #[test]
    fn draw_text_span_offsets() {
        let mut frame = Frame::new(10, 1);
        draw_text_span(&mut frame, 4, 0, "hi", Style::new(), 10);
        assert_eq!(frame.buffer.get(4, 0).unwrap().ch, 'h');
        assert_eq!(frame.buffer.get(5, 0).unwrap().ch, 'i');
    }
}
