#![forbid(unsafe_code)]

//! Virtual row windowing.
//!
//! Maps a pixel scroll offset to the 1-based, end-exclusive range of row
//! indices that should exist in the rendered view: the visible rows plus an
//! overscan buffer, clamped to the table bounds. The calculation is pure
//! and total; every input produces a valid window.

/// Fixed metrics of a virtually scrolled table.
///
/// Heights are in virtual pixels; the presentation layer decides how a
/// pixel band maps onto terminal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    /// Total number of rows; valid indices are `1..=total_rows`.
    pub total_rows: u32,
    /// Height of one row in virtual pixels.
    pub row_height: u32,
    /// Number of rows the viewport shows at once.
    pub visible_rows: u32,
    /// Overscan rows rendered beyond the visible range.
    pub buffer: u32,
}

impl WindowSpec {
    /// Viewport height in virtual pixels.
    #[must_use]
    pub const fn viewport_px(&self) -> u32 {
        self.visible_rows * self.row_height
    }

    /// Total scrollable extent in virtual pixels.
    #[must_use]
    pub const fn extent_px(&self) -> u32 {
        self.total_rows * self.row_height
    }

    /// Maximum scroll offset (extent minus viewport height).
    #[must_use]
    pub const fn max_offset_px(&self) -> u32 {
        self.extent_px().saturating_sub(self.viewport_px())
    }

    /// Compute the row window for a scroll offset.
    ///
    /// `start = max(1, floor(offset / row_height) − buffer)`,
    /// `end = min(total_rows, start + visible_rows + buffer)`, end exclusive.
    /// Negative or non-finite offsets are treated as 0.
    #[must_use]
    pub fn window(&self, offset_px: f64) -> RowWindow {
        let row_height = f64::from(self.row_height.max(1));
        let offset = if offset_px.is_finite() {
            offset_px.max(0.0)
        } else {
            0.0
        };

        let first = (offset / row_height).floor() as i64;
        let start = (first - i64::from(self.buffer))
            .max(1)
            .min(i64::from(self.total_rows)) as u32;
        let end = start
            .saturating_add(self.visible_rows)
            .saturating_add(self.buffer)
            .min(self.total_rows);

        RowWindow {
            start,
            end: end.max(start),
        }
    }
}

/// A 1-based, end-exclusive range of row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    /// First row index in the window.
    pub start: u32,
    /// One past the last row index in the window.
    pub end: u32,
}

impl RowWindow {
    /// Number of rows in the window.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if the window contains no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if a row index falls inside the window.
    #[must_use]
    pub const fn contains(&self, index: u32) -> bool {
        index >= self.start && index < self.end
    }

    /// Iterate the row indices in the window.
    #[must_use]
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

/// Scroll position over a [`WindowSpec`].
///
/// Owns the current pixel offset and keeps it clamped to
/// `[0, max_offset_px]`; every mutation goes through the clamp so the
/// window calculation never sees an out-of-range offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    spec: WindowSpec,
    offset_px: f64,
}

impl Viewport {
    /// Create a viewport at offset 0.
    #[must_use]
    pub const fn new(spec: WindowSpec) -> Self {
        Self {
            spec,
            offset_px: 0.0,
        }
    }

    /// The window metrics this viewport scrolls over.
    #[must_use]
    pub const fn spec(&self) -> WindowSpec {
        self.spec
    }

    /// Current scroll offset in virtual pixels.
    #[must_use]
    pub const fn offset_px(&self) -> f64 {
        self.offset_px
    }

    /// Maximum scroll offset in virtual pixels.
    #[must_use]
    pub fn max_offset_px(&self) -> f64 {
        f64::from(self.spec.max_offset_px())
    }

    /// Set the scroll offset, clamping to `[0, max_offset_px]`.
    pub fn set_offset_px(&mut self, offset_px: f64) {
        if offset_px.is_finite() {
            self.offset_px = offset_px.clamp(0.0, self.max_offset_px());
        }
    }

    /// Scroll by a signed pixel delta.
    pub fn scroll_by_px(&mut self, delta_px: f64) {
        self.set_offset_px(self.offset_px + delta_px);
    }

    /// Jump to a proportional position (`0.0` = top, `1.0` = bottom).
    pub fn jump_to_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() {
            self.set_offset_px(ratio.clamp(0.0, 1.0) * self.max_offset_px());
        }
    }

    /// Check if the viewport is at the top bound.
    #[must_use]
    pub fn at_start(&self) -> bool {
        self.offset_px <= 0.0
    }

    /// Check if the viewport is at the bottom bound.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.offset_px >= self.max_offset_px()
    }

    /// The row window for the current offset.
    #[must_use]
    pub fn window(&self) -> RowWindow {
        self.spec.window(self.offset_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // The metrics of the 10,001-row table the calculator was built for.
    const SPEC: WindowSpec = WindowSpec {
        total_rows: 10_001,
        row_height: 40,
        visible_rows: 20,
        buffer: 5,
    };

    #[test]
    fn window_at_top() {
        let w = SPEC.window(0.0);
        assert_eq!((w.start, w.end), (1, 26));
    }

    #[test]
    fn window_at_row_100() {
        // offset 4000 puts row 100 at the viewport top
        let w = SPEC.window(4000.0);
        assert_eq!((w.start, w.end), (95, 120));
    }

    #[test]
    fn window_at_max_extent_clamps_end() {
        let w = SPEC.window(f64::from(SPEC.max_offset_px()));
        assert_eq!(w.end, 10_001);
        assert!(w.start >= 1);
    }

    #[test]
    fn window_ignores_negative_and_non_finite_offsets() {
        assert_eq!(SPEC.window(-500.0), SPEC.window(0.0));
        assert_eq!(SPEC.window(f64::NAN), SPEC.window(0.0));
    }

    #[test]
    fn window_fractional_offset_floors() {
        // 39.9px is still within row 0's band, same window as offset 0
        assert_eq!(SPEC.window(39.9), SPEC.window(0.0));
        // crossing the row boundary moves the window by one
        assert_eq!(SPEC.window(240.0).start, 1);
        assert_eq!(SPEC.window(241.0).start, 1);
        assert_eq!(SPEC.window(440.0).start, 6);
    }

    #[test]
    fn viewport_clamps_offset() {
        let mut vp = Viewport::new(SPEC);
        vp.scroll_by_px(-100.0);
        assert_eq!(vp.offset_px(), 0.0);
        assert!(vp.at_start());

        vp.set_offset_px(1e12);
        assert_eq!(vp.offset_px(), vp.max_offset_px());
        assert!(vp.at_end());
    }

    #[test]
    fn viewport_jump_to_ratio() {
        let mut vp = Viewport::new(SPEC);
        vp.jump_to_ratio(0.5);
        assert_eq!(vp.offset_px(), vp.max_offset_px() / 2.0);

        vp.jump_to_ratio(7.0);
        assert_eq!(vp.offset_px(), vp.max_offset_px());
    }

    #[test]
    fn window_is_empty_for_degenerate_spec() {
        let spec = WindowSpec {
            total_rows: 0,
            row_height: 40,
            visible_rows: 20,
            buffer: 5,
        };
        assert!(spec.window(0.0).is_empty());
    }

    proptest! {
        #[test]
        fn window_bounds_hold_for_any_offset(offset in 0.0f64..399_240.0) {
            let w = SPEC.window(offset);
            prop_assert!(w.start >= 1);
            prop_assert!(w.end <= SPEC.total_rows);
            prop_assert!(w.len() <= SPEC.visible_rows + 2 * SPEC.buffer);
        }

        #[test]
        fn window_covers_fully_visible_rows(offset in 0.0f64..399_240.0) {
            // Every row whose pixel band lies entirely inside the viewport
            // is in the window. (A row straddling the bottom edge may fall
            // outside it: the buffer is applied above the viewport only.)
            let w = SPEC.window(offset);
            let first_full = (offset / 40.0).ceil() as u32;
            let last_full = (offset / 40.0).floor() as u32 + SPEC.visible_rows - 1;
            for index in first_full.max(1)..=last_full.min(SPEC.total_rows - 1) {
                prop_assert!(w.contains(index), "row {} not in {:?}", index, w);
            }
        }

        #[test]
        fn window_is_monotone_in_offset(a in 0.0f64..399_240.0, b in 0.0f64..399_240.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let wl = SPEC.window(lo);
            let wh = SPEC.window(hi);
            prop_assert!(wl.start <= wh.start);
            prop_assert!(wl.end <= wh.end);
        }
    }
}
