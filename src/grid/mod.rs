pub mod blink;
pub mod editor;
pub mod paint;
pub mod segments;

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::units::{BlinkPhase, UnitId, GRID_COLS, GRID_ROWS};
use blink::BlinkClock;
use editor::Editor;
use paint::PaintSession;

pub const ZOOM_MIN: u8 = 6;
pub const ZOOM_MAX: u8 = 20;
const ZOOM_DEFAULT: u8 = 10;
/// Columns reserved for the A..J row labels.
pub const LABEL_WIDTH: u16 = 3;
/// Rows reserved for the 1..20 column header.
pub const HEADER_HEIGHT: u16 = 1;
const CELL_GAP: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    Tap,
    Paint,
}

impl InteractionMode {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Tap => "Tap mode",
            InteractionMode::Paint => "Paint mode",
        }
    }
}

/// What a grid interaction asks the shell to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridAction {
    None,
    Toggle(UnitId),
    Open(UnitId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u16,
    pub height: u16,
}

impl CellMetrics {
    /// Six columns and two rows at 1.0x.
    pub fn for_zoom(tenths: u8) -> Self {
        let t = tenths as u16;
        Self {
            width: ((6 * t + 5) / 10).max(4),
            height: ((3 * t + 10) / 20).max(1),
        }
    }

    fn pitch_x(&self) -> u16 {
        self.width + CELL_GAP
    }
}

/// Where the cells landed on the last draw; used for mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub cells: Rect,
    pub metrics: CellMetrics,
    pub first_row: u16,
    pub first_col: u16,
    pub visible_rows: u16,
    pub visible_cols: u16,
}

impl GridGeometry {
    pub fn cell_at(&self, column: u16, row: u16) -> Option<UnitId> {
        if column < self.cells.x || row < self.cells.y {
            return None;
        }
        let dx = column - self.cells.x;
        let dy = row - self.cells.y;
        let pitch = self.metrics.pitch_x();
        if dx % pitch >= self.metrics.width {
            return None;
        }
        let c = dx / pitch;
        let r = dy / self.metrics.height;
        if c >= self.visible_cols || r >= self.visible_rows {
            return None;
        }
        UnitId::from_coord(self.first_row + r, self.first_col + c)
    }

    pub fn cell_rect(&self, id: UnitId) -> Option<Rect> {
        let (r, c) = (id.row(), id.col());
        if r < self.first_row
            || c < self.first_col
            || r >= self.first_row + self.visible_rows
            || c >= self.first_col + self.visible_cols
        {
            return None;
        }
        Some(Rect::new(
            self.cells.x + (c - self.first_col) * self.metrics.pitch_x(),
            self.cells.y + (r - self.first_row) * self.metrics.height,
            self.metrics.width,
            self.metrics.height,
        ))
    }
}

/// Controller-tab view state: interaction mode, cursor, viewport, zoom, the
/// paint session, the blink clock and the open editor.
pub struct GridView {
    pub mode: InteractionMode,
    pub zoom: u8,
    pub cursor: UnitId,
    pub scroll_row: u16,
    pub scroll_col: u16,
    pub paint: PaintSession,
    pub blink: BlinkClock,
    pub editor: Option<Editor>,
    geometry: Option<GridGeometry>,
}

impl GridView {
    pub fn new(blink_interval: Duration) -> Self {
        Self {
            mode: InteractionMode::Tap,
            zoom: ZOOM_DEFAULT,
            cursor: UnitId::FIRST,
            scroll_row: 0,
            scroll_col: 0,
            paint: PaintSession::Idle,
            blink: BlinkClock::new(blink_interval),
            editor: None,
            geometry: None,
        }
    }

    /// Called when the controller tab becomes visible.
    pub fn enter(&mut self, now: Instant) {
        self.blink.start(now);
    }

    /// Called when the controller tab is hidden. Tears down time-driven and
    /// pointer-driven state.
    pub fn leave(&mut self) {
        self.blink.stop();
        self.paint.release();
    }

    pub fn tick(&mut self, now: Instant) {
        self.blink.tick(now);
    }

    pub fn phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    pub fn metrics(&self) -> CellMetrics {
        CellMetrics::for_zoom(self.zoom)
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom as f32 / 10.0
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(ZOOM_MIN);
    }

    pub fn toggle_mode(&mut self) {
        self.paint.release();
        self.mode = match self.mode {
            InteractionMode::Tap => InteractionMode::Paint,
            InteractionMode::Paint => InteractionMode::Tap,
        };
    }

    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row() as i32 + d_row).clamp(0, GRID_ROWS as i32 - 1) as u16;
        let col = (self.cursor.col() as i32 + d_col).clamp(0, GRID_COLS as i32 - 1) as u16;
        if let Some(id) = UnitId::from_coord(row, col) {
            self.cursor = id;
        }
    }

    /// Viewport origin that keeps the cursor inside a window of the given size.
    pub fn scroll_to_cursor(&mut self, visible_rows: u16, visible_cols: u16) {
        self.scroll_row = follow(self.scroll_row, self.cursor.row(), visible_rows, GRID_ROWS);
        self.scroll_col = follow(self.scroll_col, self.cursor.col(), visible_cols, GRID_COLS);
    }

    /// Lays out the visible window for `area` and records it for hit-testing.
    pub fn layout(&mut self, area: Rect) -> GridGeometry {
        let metrics = self.metrics();
        let cells = Rect::new(
            area.x + LABEL_WIDTH,
            area.y + HEADER_HEIGHT,
            area.width.saturating_sub(LABEL_WIDTH),
            area.height.saturating_sub(HEADER_HEIGHT),
        );
        let visible_cols = ((cells.width + CELL_GAP) / metrics.pitch_x()).clamp(1, GRID_COLS);
        let visible_rows = (cells.height / metrics.height).clamp(1, GRID_ROWS);
        self.scroll_to_cursor(visible_rows, visible_cols);
        let geometry = GridGeometry {
            cells,
            metrics,
            first_row: self.scroll_row,
            first_col: self.scroll_col,
            visible_rows,
            visible_cols,
        };
        self.geometry = Some(geometry);
        geometry
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<UnitId> {
        self.geometry.and_then(|g| g.cell_at(column, row))
    }

    pub fn pointer_down(&mut self, id: UnitId) -> GridAction {
        self.cursor = id;
        match self.mode {
            InteractionMode::Tap => self.open(id),
            InteractionMode::Paint => self.paint.press(id).map_or(GridAction::None, GridAction::Toggle),
        }
    }

    pub fn pointer_drag(&mut self, id: UnitId) -> GridAction {
        if self.mode != InteractionMode::Paint {
            return GridAction::None;
        }
        match self.paint.enter(id) {
            Some(id) => {
                self.cursor = id;
                GridAction::Toggle(id)
            }
            None => GridAction::None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.paint.release();
    }

    /// Keyboard activation of the cursor cell.
    pub fn activate_cursor(&mut self) -> GridAction {
        let id = self.cursor;
        let action = self.pointer_down(id);
        self.pointer_up();
        action
    }

    pub fn open(&mut self, id: UnitId) -> GridAction {
        self.editor = Some(Editor::new(id));
        GridAction::Open(id)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }
}

fn follow(origin: u16, target: u16, window: u16, total: u16) -> u16 {
    let window = window.max(1);
    let max_origin = total.saturating_sub(window);
    let origin = if target < origin {
        target
    } else if target >= origin + window {
        target + 1 - window
    } else {
        origin
    };
    origin.min(max_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u16) -> UnitId {
        UnitId::new(n).unwrap()
    }

    fn view() -> GridView {
        GridView::new(Duration::from_millis(1200))
    }

    #[test]
    fn tap_mode_opens_editor_without_toggling() {
        let mut grid = view();
        assert_eq!(grid.pointer_down(id(22)), GridAction::Open(id(22)));
        assert_eq!(grid.editor.as_ref().map(|e| e.unit), Some(id(22)));
        assert_eq!(grid.pointer_drag(id(23)), GridAction::None);
    }

    #[test]
    fn paint_mode_toggles_each_cell_once_per_drag() {
        let mut grid = view();
        grid.toggle_mode();
        assert_eq!(grid.pointer_down(id(1)), GridAction::Toggle(id(1)));
        assert_eq!(grid.pointer_drag(id(2)), GridAction::Toggle(id(2)));
        assert_eq!(grid.pointer_drag(id(1)), GridAction::None);
        assert_eq!(grid.pointer_drag(id(2)), GridAction::None);
        grid.pointer_up();
        assert_eq!(grid.pointer_drag(id(3)), GridAction::None);
        assert!(grid.editor.is_none());
    }

    #[test]
    fn mode_switch_and_leave_end_the_session() {
        let mut grid = view();
        grid.toggle_mode();
        grid.pointer_down(id(1));
        grid.leave();
        assert!(!grid.paint.is_painting());
        grid.pointer_down(id(1));
        grid.toggle_mode();
        assert!(!grid.paint.is_painting());
        assert_eq!(grid.mode, InteractionMode::Tap);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut grid = view();
        for _ in 0..30 {
            grid.zoom_in();
        }
        assert_eq!(grid.zoom, ZOOM_MAX);
        for _ in 0..30 {
            grid.zoom_out();
        }
        assert_eq!(grid.zoom, ZOOM_MIN);
        assert!((grid.zoom_factor() - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn metrics_grow_with_zoom() {
        assert_eq!(CellMetrics::for_zoom(6), CellMetrics { width: 4, height: 1 });
        assert_eq!(CellMetrics::for_zoom(10), CellMetrics { width: 6, height: 2 });
        assert_eq!(CellMetrics::for_zoom(20), CellMetrics { width: 12, height: 3 });
    }

    #[test]
    fn cursor_is_clamped_to_grid() {
        let mut grid = view();
        grid.move_cursor(-1, -1);
        assert_eq!(grid.cursor, id(1));
        grid.move_cursor(20, 40);
        assert_eq!(grid.cursor, id(200));
    }

    #[test]
    fn viewport_follows_cursor() {
        let mut grid = view();
        grid.cursor = id(200);
        grid.scroll_to_cursor(4, 8);
        assert_eq!((grid.scroll_row, grid.scroll_col), (6, 12));
        grid.cursor = id(1);
        grid.scroll_to_cursor(4, 8);
        assert_eq!((grid.scroll_row, grid.scroll_col), (0, 0));
    }

    #[test]
    fn hit_test_maps_screen_cells_to_ids() {
        let mut grid = view();
        let geometry = grid.layout(Rect::new(0, 0, 200, 40));
        assert_eq!(geometry.visible_cols, GRID_COLS);
        assert_eq!(geometry.visible_rows, GRID_ROWS);
        // First cell starts right of the labels and under the header.
        assert_eq!(grid.hit_test(LABEL_WIDTH, HEADER_HEIGHT), Some(id(1)));
        // Gap column between A1 and A2.
        assert_eq!(grid.hit_test(LABEL_WIDTH + 6, HEADER_HEIGHT), None);
        assert_eq!(grid.hit_test(LABEL_WIDTH + 7, HEADER_HEIGHT + 2), Some(id(22)));
        assert_eq!(grid.hit_test(0, 0), None);
        assert_eq!(geometry.cell_rect(id(22)), Some(Rect::new(LABEL_WIDTH + 7, HEADER_HEIGHT + 2, 6, 2)));
    }

    #[test]
    fn blink_runs_only_while_entered() {
        let t0 = Instant::now();
        let mut grid = GridView::new(Duration::from_millis(100));
        grid.tick(t0 + Duration::from_millis(500));
        assert_eq!(grid.phase(), BlinkPhase::Primary);
        grid.enter(t0);
        grid.tick(t0 + Duration::from_millis(100));
        assert_eq!(grid.phase(), BlinkPhase::Secondary);
        grid.leave();
        assert_eq!(grid.phase(), BlinkPhase::Primary);
    }
}
