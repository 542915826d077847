//! Fixed metrics of the roster table.

use std::time::Duration;

use vgrid_widgets::window::WindowSpec;

/// Total number of rows; indices run 1..=TOTAL_ROWS.
pub const TOTAL_ROWS: u32 = 10_001;

/// Height of each row in virtual pixels.
pub const ROW_HEIGHT: u32 = 40;

/// Number of rows visible in the viewport.
pub const VISIBLE_ROWS: u32 = 20;

/// Extra rows rendered above the viewport.
pub const BUFFER_ROWS: u32 = 5;

/// Pixels per 16ms frame for press-and-hold scrolling.
pub const SCROLL_SPEED: f64 = 2.0;

/// Target interval between continuous-scroll animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Where selections persist between runs.
pub const STATE_FILE: &str = ".vgrid-roster.json";

/// The table metrics as a window spec.
#[must_use]
pub const fn window_spec() -> WindowSpec {
    WindowSpec {
        total_rows: TOTAL_ROWS,
        row_height: ROW_HEIGHT,
        visible_rows: VISIBLE_ROWS,
        buffer: BUFFER_ROWS,
    }
}
