#![forbid(unsafe_code)]

//! The selectable row table.
//!
//! Renders the current row window as ephemeral view-models: a label cell
//! followed by three mutually-exclusive choice cells per row. The rendered
//! row set is rebuilt from scratch every pass, so it always exactly matches
//! the window calculation and no row element outlives a render.

use crate::mouse::MouseResult;
use crate::store::{Choice, SelectionSource};
use crate::window::{RowWindow, Viewport, WindowSpec};
use crate::{StatefulWidget, draw_text_span};
use vgrid_core::event::{MouseButton, MouseEvent, MouseEventKind};
use vgrid_core::geometry::Rect;
use vgrid_render::{Frame, HitData, HitId, HitRegion};
use vgrid_style::Style;

/// Width of one rendered choice cell, including its trailing gap.
pub const CHOICE_CELL_WIDTH: u16 = 4;

/// Width of the three-choice block at the right edge of a row.
pub const CHOICE_BLOCK_WIDTH: u16 = CHOICE_CELL_WIDTH * 3;

/// Narrowest area the table will render into; below this it is inert.
pub const MIN_WIDTH: u16 = 10 + CHOICE_BLOCK_WIDTH;

/// Wheel scroll distance, in rows.
const WHEEL_ROWS: f64 = 3.0;

/// Ephemeral per-row view-model, rebuilt on every render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView {
    /// 1-based row index.
    pub index: u32,
    /// The row's effective choice.
    pub selected: Choice,
}

/// The virtually scrolled, selectable row table.
pub struct RowTable<'a> {
    selections: &'a dyn SelectionSource,
    style: Style,
    label_style: Style,
    choice_style: Style,
    active_style: Style,
    hit_id: Option<HitId>,
}

impl<'a> RowTable<'a> {
    /// Create a table reading selections from the given source.
    #[must_use]
    pub fn new(selections: &'a dyn SelectionSource) -> Self {
        Self {
            selections,
            style: Style::default(),
            label_style: Style::default(),
            choice_style: Style::default(),
            active_style: Style::default(),
            hit_id: None,
        }
    }

    /// Set the base style painted under the whole table area.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the style for row labels.
    #[must_use]
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Set the style for inactive choice cells.
    #[must_use]
    pub fn choice_style(mut self, style: Style) -> Self {
        self.choice_style = style;
        self
    }

    /// Set the style for the active choice cell.
    #[must_use]
    pub fn active_style(mut self, style: Style) -> Self {
        self.active_style = style;
        self
    }

    /// Set a hit ID so choice cells register mouse regions.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Build the view-models for a row window.
    ///
    /// One entry per index in the window, each consulting the selection
    /// source; unwritten rows carry the default choice.
    #[must_use]
    pub fn build_rows(&self, window: RowWindow) -> Vec<RowView> {
        window
            .rows()
            .map(|index| RowView {
                index,
                selected: self.selections.get(index),
            })
            .collect()
    }

    /// Handle a mouse event routed to the table.
    ///
    /// Left-down on a registered choice cell picks that choice; wheel
    /// events scroll the viewport by a few rows. Everything else is
    /// ignored, since presses in the content area have no scroll meaning.
    pub fn handle_mouse(
        event: &MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
        expected_id: HitId,
        viewport: &mut Viewport,
    ) -> MouseResult {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((id, HitRegion::Content, data)) = hit
                    && id == expected_id
                    && let Some((row, choice)) = unpack_choice(data)
                {
                    return MouseResult::Selected { row, choice };
                }
                MouseResult::Ignored
            }
            MouseEventKind::ScrollUp => {
                viewport.scroll_by_px(-WHEEL_ROWS * f64::from(viewport.spec().row_height));
                MouseResult::Scrolled
            }
            MouseEventKind::ScrollDown => {
                viewport.scroll_by_px(WHEEL_ROWS * f64::from(viewport.spec().row_height));
                MouseResult::Scrolled
            }
            _ => MouseResult::Ignored,
        }
    }
}

/// Pack a (row, choice) pair into hit data.
fn pack_choice(row: u32, choice: Choice) -> HitData {
    (u64::from(row) << 2) | u64::from(choice.index())
}

/// Inverse of [`pack_choice`].
fn unpack_choice(data: HitData) -> Option<(u32, Choice)> {
    let row = u32::try_from(data >> 2).ok()?;
    let choice = Choice::from_index((data & 0b11) as u8)?;
    Some((row, choice))
}

/// Terminal line of a row within the viewport, if any.
///
/// Rows sit at absolute pixel offset `index × row_height`; the line is the
/// floor of the distance from the viewport top in row heights.
fn row_line(spec: WindowSpec, offset_px: f64, index: u32) -> Option<u16> {
    let row_height = f64::from(spec.row_height.max(1));
    let top_px = f64::from(index) * f64::from(spec.row_height);
    let line = ((top_px - offset_px) / row_height).floor();
    if (0.0..f64::from(u16::MAX)).contains(&line) {
        Some(line as u16)
    } else {
        None
    }
}

impl StatefulWidget for RowTable<'_> {
    type State = Viewport;

    fn render(&self, area: Rect, frame: &mut Frame, viewport: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "RowTable",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        // Inert without enough room for label plus choice cells.
        if area.is_empty() || area.width < MIN_WIDTH {
            return;
        }

        frame.buffer.set_style(area, self.style);

        let spec = viewport.spec();
        let visible_lines = area
            .height
            .min(u16::try_from(spec.visible_rows).unwrap_or(u16::MAX));
        let offset_px = viewport.offset_px();
        let choices_x = area.right() - CHOICE_BLOCK_WIDTH;

        // Full replace: the drawn set is exactly the current window's
        // view-models, rebuilt from scratch.
        for view in self.build_rows(viewport.window()) {
            let Some(line) = row_line(spec, offset_px, view.index) else {
                continue;
            };
            if line >= visible_lines {
                continue;
            }
            let y = area.y + line;

            let label = format!("Row {}", view.index);
            draw_text_span(frame, area.x, y, &label, self.label_style, choices_x);

            for choice in Choice::ALL {
                let cx = choices_x + u16::from(choice.index()) * CHOICE_CELL_WIDTH;
                let active = choice == view.selected;
                let (glyph, style) = if active {
                    ("(•)", self.active_style)
                } else {
                    ("( )", self.choice_style)
                };
                draw_text_span(frame, cx, y, glyph, style, cx.saturating_add(3));

                if let Some(id) = self.hit_id {
                    frame.register_hit(
                        Rect::new(cx, y, 3, 1),
                        id,
                        HitRegion::Content,
                        pack_choice(view.index, choice),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBlob, SelectionStore};

    const SPEC: WindowSpec = WindowSpec {
        total_rows: 10_001,
        row_height: 40,
        visible_rows: 20,
        buffer: 5,
    };

    fn line_text(frame: &Frame, y: u16) -> String {
        (0..frame.width())
            .map(|x| frame.buffer.get(x, y).unwrap().ch)
            .collect()
    }

    #[test]
    fn build_rows_matches_window_and_store() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(3, Choice::Three);

        let table = RowTable::new(&store);
        let rows = table.build_rows(RowWindow { start: 2, end: 5 });
        assert_eq!(
            rows,
            vec![
                RowView {
                    index: 2,
                    selected: Choice::One
                },
                RowView {
                    index: 3,
                    selected: Choice::Three
                },
                RowView {
                    index: 4,
                    selected: Choice::One
                },
            ]
        );
    }

    #[test]
    fn renders_rows_at_absolute_lines() {
        let store = SelectionStore::load(MemoryBlob::new());
        let table = RowTable::new(&store);
        let mut vp = Viewport::new(SPEC);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(&table, Rect::new(0, 0, 30, 20), &mut frame, &mut vp);

        // Row 1 sits at pixel 40, one line below the viewport top.
        assert!(line_text(&frame, 0).trim().is_empty());
        assert!(line_text(&frame, 1).starts_with("Row 1 "));
        assert!(line_text(&frame, 19).starts_with("Row 19"));
    }

    #[test]
    fn scrolled_render_replaces_rows() {
        let store = SelectionStore::load(MemoryBlob::new());
        let table = RowTable::new(&store);
        let mut vp = Viewport::new(SPEC);
        vp.set_offset_px(4000.0);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(&table, Rect::new(0, 0, 30, 20), &mut frame, &mut vp);

        // Window is [95, 120); row 100 sits at the viewport top.
        assert!(line_text(&frame, 0).starts_with("Row 100 "));
        assert!(line_text(&frame, 19).starts_with("Row 119"));
        assert!(!line_text(&frame, 0).starts_with("Row 1 "));
    }

    #[test]
    fn active_choice_reflects_store() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(1, Choice::Two);
        let table = RowTable::new(&store);
        let mut vp = Viewport::new(SPEC);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(&table, Rect::new(0, 0, 30, 20), &mut frame, &mut vp);

        // Default rows mark the first choice; row 1 marks the second.
        let choices = |y: u16| line_text(&frame, y).chars().skip(18).collect::<String>();
        assert_eq!(choices(1), "( ) (•) ( ) ");
        assert_eq!(choices(2), "(•) ( ) ( ) ");
    }

    #[test]
    fn choice_hit_round_trips() {
        let store = SelectionStore::load(MemoryBlob::new());
        let id = HitId::new(1);
        let table = RowTable::new(&store).hit_id(id);
        let mut vp = Viewport::new(SPEC);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(&table, Rect::new(0, 0, 30, 20), &mut frame, &mut vp);

        // Row 2 renders on line 2; its second choice cell starts at x 22.
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 22, 2);
        let hit = frame.hit_test(event.x, event.y);
        assert_eq!(
            RowTable::handle_mouse(&event, hit, id, &mut vp),
            MouseResult::Selected {
                row: 2,
                choice: Choice::Two
            }
        );
    }

    #[test]
    fn press_outside_choice_cells_is_ignored() {
        let store = SelectionStore::load(MemoryBlob::new());
        let id = HitId::new(1);
        let table = RowTable::new(&store).hit_id(id);
        let mut vp = Viewport::new(SPEC);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(&table, Rect::new(0, 0, 30, 20), &mut frame, &mut vp);

        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 2, 2);
        let hit = frame.hit_test(event.x, event.y);
        assert_eq!(
            RowTable::handle_mouse(&event, hit, id, &mut vp),
            MouseResult::Ignored
        );
    }

    #[test]
    fn wheel_scrolls_by_rows() {
        let mut vp = Viewport::new(SPEC);

        let down = MouseEvent::new(MouseEventKind::ScrollDown, 5, 5);
        assert_eq!(
            RowTable::handle_mouse(&down, None, HitId::new(1), &mut vp),
            MouseResult::Scrolled
        );
        assert_eq!(vp.offset_px(), 120.0);

        let up = MouseEvent::new(MouseEventKind::ScrollUp, 5, 5);
        RowTable::handle_mouse(&up, None, HitId::new(1), &mut vp);
        assert_eq!(vp.offset_px(), 0.0);
    }

    #[test]
    fn narrow_area_is_inert() {
        let store = SelectionStore::load(MemoryBlob::new());
        let table = RowTable::new(&store).hit_id(HitId::new(1));
        let mut vp = Viewport::new(SPEC);
        let mut frame = Frame::new(30, 20);

        StatefulWidget::render(
            &table,
            Rect::new(0, 0, MIN_WIDTH - 1, 20),
            &mut frame,
            &mut vp,
        );

        assert!(line_text(&frame, 1).trim().is_empty());
        assert_eq!(frame.hit_test(0, 1), None);
    }
}
