//! The roster application model.

use std::cell::RefCell;

use vgrid_core::event::{MouseButton, MouseEvent, MouseEventKind};
use vgrid_core::geometry::Rect;
use vgrid_render::{Frame, HitData, HitId, HitRegion};
use vgrid_runtime::{Cmd, Model};
use vgrid_widgets::mouse::MouseResult;
use vgrid_widgets::scroll::{ScrollController, ScrollDirection};
use vgrid_widgets::scrollbar::{self, Scrollbar, ScrollbarHit};
use vgrid_widgets::store::{FileBlob, SelectionStore};
use vgrid_widgets::table::{self, RowTable};
use vgrid_widgets::window::Viewport;
use vgrid_widgets::{StatefulWidget, draw_text_span};

use crate::config;
use crate::msg::Msg;
use crate::theme;

const TABLE_HIT: HitId = HitId::new(1);
const SCROLLBAR_HIT: HitId = HitId::new(2);
const RESET_HIT: HitId = HitId::new(3);

/// Track cells between the scrollbar arrows.
const TRACK_LEN: u16 = config::VISIBLE_ROWS as u16 - 2;

/// Screen regions of the fixed layout.
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    title: Rect,
    table: Rect,
    scrollbar: Rect,
    status: Rect,
}

/// Compute the layout, or `None` if the terminal cannot hold it.
fn layout(width: u16, height: u16) -> Option<Layout> {
    let rows = config::VISIBLE_ROWS as u16;
    if height < rows + 2 || width < table::MIN_WIDTH + 1 {
        return None;
    }
    Some(Layout {
        title: Rect::new(0, 0, width, 1),
        table: Rect::new(0, 1, width - 1, rows),
        scrollbar: Rect::new(width - 1, 1, 1, rows),
        status: Rect::new(0, rows + 1, width, 1),
    })
}

/// Application model: the viewport, the scroll session, and the store.
pub struct RosterApp {
    store: SelectionStore<FileBlob>,
    viewport: RefCell<Viewport>,
    controller: ScrollController,
    /// The scroll surface from the last render, for leave detection.
    surface: RefCell<Rect>,
}

impl RosterApp {
    /// Build the app, loading persisted selections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: SelectionStore::load(FileBlob::new(config::STATE_FILE)),
            viewport: RefCell::new(Viewport::new(config::window_spec())),
            controller: ScrollController::new(config::SCROLL_SPEED),
            surface: RefCell::new(Rect::default()),
        }
    }

    fn start_scroll(&mut self, direction: ScrollDirection) -> Cmd<Msg> {
        if self.controller.start(direction) {
            Cmd::tick(config::FRAME_INTERVAL)
        } else {
            Cmd::none()
        }
    }

    fn handle_press(&mut self, event: &MouseEvent, hit: Option<(HitId, HitRegion, HitData)>) -> Cmd<Msg> {
        if let Some(part) = scrollbar::decode_hit(hit, SCROLLBAR_HIT) {
            return match part {
                ScrollbarHit::Begin => self.start_scroll(ScrollDirection::Up),
                ScrollbarHit::End => self.start_scroll(ScrollDirection::Down),
                ScrollbarHit::Track { pos } => {
                    // Proportional jump, applied immediately; the render
                    // that follows this event reflects the new range.
                    let ratio = scrollbar::track_ratio(pos, TRACK_LEN);
                    self.viewport.borrow_mut().jump_to_ratio(ratio);
                    Cmd::none()
                }
            };
        }

        if let Some((id, HitRegion::Button, _)) = hit
            && id == RESET_HIT
        {
            self.store.clear();
            return Cmd::none();
        }

        if let MouseResult::Selected { row, choice } =
            RowTable::handle_mouse(event, hit, TABLE_HIT, &mut self.viewport.borrow_mut())
        {
            self.store.set(row, choice);
        }
        Cmd::none()
    }
}

impl Default for RosterApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for RosterApp {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Quit => Cmd::quit(),
            Msg::Reset => {
                self.store.clear();
                Cmd::none()
            }
            Msg::ScrollByPx(delta) => {
                self.viewport.borrow_mut().scroll_by_px(delta);
                Cmd::none()
            }
            Msg::ScrollToStart => {
                self.viewport.borrow_mut().set_offset_px(0.0);
                Cmd::none()
            }
            Msg::ScrollToEnd => {
                let mut viewport = self.viewport.borrow_mut();
                let max = viewport.max_offset_px();
                viewport.set_offset_px(max);
                Cmd::none()
            }
            Msg::FocusLost => {
                self.controller.stop();
                Cmd::none()
            }
            Msg::Noop => Cmd::none(),
        }
    }

    fn on_mouse(&mut self, event: MouseEvent, hit: Option<(HitId, HitRegion, HitData)>) -> Cmd<Msg> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(&event, hit),
            MouseEventKind::Up(_) => {
                self.controller.stop();
                Cmd::none()
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Leaving the scroll surface ends the session even if the
                // release was missed.
                if self.controller.is_scrolling()
                    && !self.surface.borrow().contains(event.x, event.y)
                {
                    self.controller.stop();
                }
                Cmd::none()
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                RowTable::handle_mouse(&event, hit, TABLE_HIT, &mut self.viewport.borrow_mut());
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn tick(&mut self, dt: std::time::Duration) -> Cmd<Msg> {
        let mut viewport = self.viewport.borrow_mut();
        self.controller.step(&mut viewport, dt);
        if self.controller.is_scrolling() {
            Cmd::tick(config::FRAME_INTERVAL)
        } else {
            Cmd::none()
        }
    }

    fn view(&self, frame: &mut Frame) {
        // Without room for all three anchors the app is inert.
        let Some(layout) = layout(frame.width(), frame.height()) else {
            *self.surface.borrow_mut() = Rect::default();
            return;
        };
        *self.surface.borrow_mut() = Rect::new(
            layout.table.x,
            layout.table.y,
            layout.table.width + layout.scrollbar.width,
            layout.table.height,
        );

        draw_text_span(
            frame,
            layout.title.x,
            layout.title.y,
            "Roster (10,001 rows)",
            theme::title(),
            layout.title.right(),
        );

        let table = RowTable::new(&self.store)
            .label_style(theme::label())
            .choice_style(theme::choice())
            .active_style(theme::active_choice())
            .hit_id(TABLE_HIT);
        table.render(layout.table, frame, &mut self.viewport.borrow_mut());

        let scrollbar_widget = Scrollbar::new()
            .track_style(theme::scrollbar_track())
            .thumb_style(theme::scrollbar_thumb())
            .arrow_style(theme::scrollbar_arrow())
            .hit_id(SCROLLBAR_HIT);
        scrollbar_widget.render(layout.scrollbar, frame, &mut self.viewport.borrow_mut());

        let summary = format!("{} marked  r resets  q quits", self.store.len());
        draw_text_span(
            frame,
            layout.status.x,
            layout.status.y,
            &summary,
            theme::status(),
            layout.status.right(),
        );

        let reset = "[Reset]";
        let reset_x = layout.status.right().saturating_sub(reset.len() as u16);
        draw_text_span(
            frame,
            reset_x,
            layout.status.y,
            reset,
            theme::reset_button(),
            layout.status.right(),
        );
        frame.register_hit(
            Rect::new(reset_x, layout.status.y, reset.len() as u16, 1),
            RESET_HIT,
            HitRegion::Button,
            0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_requires_room_for_all_anchors() {
        assert!(layout(80, 24).is_some());
        assert!(layout(80, 21).is_none());
        assert!(layout(table::MIN_WIDTH, 24).is_none());
    }

    #[test]
    fn layout_places_scrollbar_in_last_column() {
        let l = layout(80, 24).unwrap();
        assert_eq!(l.scrollbar, Rect::new(79, 1, 1, 20));
        assert_eq!(l.table, Rect::new(0, 1, 79, 20));
        assert_eq!(l.status.y, 21);
    }
}
