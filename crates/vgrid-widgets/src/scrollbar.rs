#![forbid(unsafe_code)]

//! Scrollbar widget.
//!
//! A vertical scrollbar with press-and-hold arrow zones at both ends and a
//! proportional track between them. Every cell registers a hit region so
//! mouse routing can tell arrows, track, and thumb apart.

use crate::StatefulWidget;
use crate::window::Viewport;
use vgrid_core::geometry::Rect;
use vgrid_render::{Frame, HitData, HitId, HitRegion};
use vgrid_style::Style;

/// Hit data part for track (background).
pub const SCROLLBAR_PART_TRACK: u64 = 0;
/// Hit data part for thumb (proportional indicator).
pub const SCROLLBAR_PART_THUMB: u64 = 1;
/// Hit data part for the up arrow.
pub const SCROLLBAR_PART_BEGIN: u64 = 2;
/// Hit data part for the down arrow.
pub const SCROLLBAR_PART_END: u64 = 3;

/// A vertical scrollbar with arrow endpoints.
///
/// Hit data is encoded as `(part << 56) | track_position` where `part` is
/// one of `SCROLLBAR_PART_*` and `track_position` is the cell index within
/// the track (zero for the arrows).
#[derive(Debug, Clone)]
pub struct Scrollbar {
    track_style: Style,
    thumb_style: Style,
    arrow_style: Style,
    begin_symbol: char,
    end_symbol: char,
    track_symbol: char,
    thumb_symbol: char,
    hit_id: Option<HitId>,
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollbar {
    /// Create a scrollbar with default symbols.
    #[must_use]
    pub fn new() -> Self {
        Self {
            track_style: Style::default(),
            thumb_style: Style::default(),
            arrow_style: Style::default(),
            begin_symbol: '▲',
            end_symbol: '▼',
            track_symbol: '│',
            thumb_symbol: '█',
            hit_id: None,
        }
    }

    /// Set the style for the track background.
    #[must_use]
    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    /// Set the style for the thumb.
    #[must_use]
    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }

    /// Set the style for the arrow zones.
    #[must_use]
    pub fn arrow_style(mut self, style: Style) -> Self {
        self.arrow_style = style;
        self
    }

    /// Set a hit ID for mouse interaction.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }
}

impl StatefulWidget for Scrollbar {
    type State = Viewport;

    fn render(&self, area: Rect, frame: &mut Frame, viewport: &mut Self::State) {
        // Needs both arrows plus at least one track cell.
        if area.is_empty() || area.height < 3 {
            return;
        }

        let x = area.right().saturating_sub(1);
        let track_len = area.height - 2;

        let spec = viewport.spec();
        let extent = f64::from(spec.extent_px().max(1));
        let viewport_ratio = (f64::from(spec.viewport_px()) / extent).min(1.0);
        let thumb_size = ((f64::from(track_len) * viewport_ratio).round() as u16)
            .clamp(1, track_len);

        let max_offset = viewport.max_offset_px();
        let pos_ratio = if max_offset <= 0.0 {
            0.0
        } else {
            (viewport.offset_px() / max_offset).clamp(0.0, 1.0)
        };
        let available = track_len - thumb_size;
        let thumb_offset = (f64::from(available) * pos_ratio).round() as u16;

        let mut put = |y: u16, symbol: char, style: Style, part: u64, pos: u16| {
            crate::draw_text_span(
                frame,
                x,
                y,
                symbol.encode_utf8(&mut [0; 4]),
                style,
                x.saturating_add(1),
            );
            if let Some(id) = self.hit_id {
                let data = (part << 56) | u64::from(pos);
                frame.register_hit(Rect::new(x, y, 1, 1), id, HitRegion::Scrollbar, data);
            }
        };

        put(
            area.top(),
            self.begin_symbol,
            self.arrow_style,
            SCROLLBAR_PART_BEGIN,
            0,
        );
        put(
            area.bottom() - 1,
            self.end_symbol,
            self.arrow_style,
            SCROLLBAR_PART_END,
            0,
        );

        for i in 0..track_len {
            let is_thumb = i >= thumb_offset && i < thumb_offset + thumb_size;
            let (symbol, style, part) = if is_thumb {
                (self.thumb_symbol, self.thumb_style, SCROLLBAR_PART_THUMB)
            } else {
                (self.track_symbol, self.track_style, SCROLLBAR_PART_TRACK)
            };
            put(area.top() + 1 + i, symbol, style, part, i);
        }
    }
}

/// A decoded scrollbar hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarHit {
    /// The up arrow zone.
    Begin,
    /// The down arrow zone.
    End,
    /// The track (or thumb) at the given cell index within the track.
    Track {
        /// 0-based cell index from the track top.
        pos: u16,
    },
}

/// Decode a frame hit-test result for a scrollbar rendered with `expected_id`.
#[must_use]
pub fn decode_hit(
    hit: Option<(HitId, HitRegion, HitData)>,
    expected_id: HitId,
) -> Option<ScrollbarHit> {
    let (id, region, data) = hit?;
    if id != expected_id || region != HitRegion::Scrollbar {
        return None;
    }
    let pos = (data & 0x00FF_FFFF_FFFF_FFFF) as u16;
    match data >> 56 {
        SCROLLBAR_PART_BEGIN => Some(ScrollbarHit::Begin),
        SCROLLBAR_PART_END => Some(ScrollbarHit::End),
        SCROLLBAR_PART_TRACK | SCROLLBAR_PART_THUMB => Some(ScrollbarHit::Track { pos }),
        _ => None,
    }
}

/// Proportional position of a track cell: 0.0 at the track top, 1.0 at the
/// bottom cell.
#[must_use]
pub fn track_ratio(pos: u16, track_len: u16) -> f64 {
    let denom = track_len.saturating_sub(1).max(1);
    f64::from(pos.min(denom)) / f64::from(denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;

    const SPEC: WindowSpec = WindowSpec {
        total_rows: 10_001,
        row_height: 40,
        visible_rows: 20,
        buffer: 5,
    };

    fn render(viewport: &mut Viewport, height: u16) -> Frame {
        let mut frame = Frame::new(1, height);
        let sb = Scrollbar::new().hit_id(HitId::new(2));
        StatefulWidget::render(&sb, Rect::new(0, 0, 1, height), &mut frame, viewport);
        frame
    }

    #[test]
    fn arrows_at_both_ends() {
        let mut vp = Viewport::new(SPEC);
        let frame = render(&mut vp, 20);
        assert_eq!(frame.buffer.get(0, 0).unwrap().ch, '▲');
        assert_eq!(frame.buffer.get(0, 19).unwrap().ch, '▼');
    }

    #[test]
    fn arrow_hits_decode() {
        let mut vp = Viewport::new(SPEC);
        let frame = render(&mut vp, 20);
        let id = HitId::new(2);
        assert_eq!(
            decode_hit(frame.hit_test(0, 0), id),
            Some(ScrollbarHit::Begin)
        );
        assert_eq!(
            decode_hit(frame.hit_test(0, 19), id),
            Some(ScrollbarHit::End)
        );
        assert_eq!(
            decode_hit(frame.hit_test(0, 1), id),
            Some(ScrollbarHit::Track { pos: 0 })
        );
        assert_eq!(decode_hit(frame.hit_test(0, 1), HitId::new(9)), None);
    }

    #[test]
    fn thumb_tracks_offset() {
        let mut vp = Viewport::new(SPEC);
        let top = render(&mut vp, 20);
        assert_eq!(top.buffer.get(0, 1).unwrap().ch, '█');

        vp.jump_to_ratio(1.0);
        let bottom = render(&mut vp, 20);
        assert_eq!(bottom.buffer.get(0, 18).unwrap().ch, '█');
        assert_eq!(bottom.buffer.get(0, 1).unwrap().ch, '│');
    }

    #[test]
    fn too_short_area_is_inert() {
        let mut vp = Viewport::new(SPEC);
        let frame = render(&mut vp, 2);
        assert_eq!(frame.buffer.get(0, 0).unwrap().ch, ' ');
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn track_ratio_endpoints_and_midpoint() {
        assert_eq!(track_ratio(0, 19), 0.0);
        assert_eq!(track_ratio(18, 19), 1.0);
        assert_eq!(track_ratio(9, 19), 0.5);
        // Degenerate track still yields a valid ratio
        assert_eq!(track_ratio(0, 1), 0.0);
    }
}
