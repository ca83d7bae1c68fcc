use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::HardwareConfig;
use crate::firmware;
use crate::grid::editor::EditorAction;
use crate::grid::{GridAction, GridView};
use crate::pattern::{apply_pattern, PatternInterpreter, PendingGeneration};
use crate::snapshot::Snapshot;
use crate::units::{PaletteColor, UnitGrid, UnitId, UnitPatch};

const SYNC_DURATION: Duration = Duration::from_millis(1000);
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Controller,
    HardwareGuide,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Controller, Tab::HardwareGuide, Tab::Settings]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Controller => " Controller ",
            Tab::HardwareGuide => " Wiring ",
            Tab::Settings => " Setup ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Controller => 0,
            Tab::HardwareGuide => 1,
            Tab::Settings => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

/// Root application state. Owned by `main` and lent to the renderers.
pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub units: UnitGrid,
    pub grid: GridView,
    pub selected_color: PaletteColor,
    pub prompt: String,
    pub prompt_focused: bool,
    pub hardware: HardwareConfig,
    pub editing_ip: bool,
    pub confirm_reset: bool,
    pub guide_scroll: u16,
    pub toast: Option<Toast>,
    snapshot: Snapshot,
    interpreter: Arc<dyn PatternInterpreter>,
    pending: Option<PendingGeneration>,
    sync_until: Option<Instant>,
}

impl App {
    pub fn new(
        snapshot: Snapshot,
        hardware: HardwareConfig,
        interpreter: Arc<dyn PatternInterpreter>,
        blink_interval: Duration,
        now: Instant,
    ) -> Self {
        let units = snapshot.load();
        let mut grid = GridView::new(blink_interval);
        grid.enter(now);
        Self {
            should_quit: false,
            current_tab: Tab::Controller,
            units,
            grid,
            selected_color: PaletteColor::Red,
            prompt: String::new(),
            prompt_focused: false,
            hardware,
            editing_ip: false,
            confirm_reset: false,
            guide_scroll: 0,
            toast: None,
            snapshot,
            interpreter,
            pending: None,
            sync_until: None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_syncing(&self) -> bool {
        self.sync_until.is_some()
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.current_tab == Tab::Controller {
            self.grid.tick(now);
        }
        if self.sync_until.is_some_and(|t| now >= t) {
            self.sync_until = None;
            tracing::debug!("sync window closed");
        }
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
        self.poll_generation(now);
        self.flush(now);
    }

    /// Persists the grid if anything changed since the last write.
    pub fn flush(&mut self, now: Instant) {
        if !self.units.is_dirty() {
            return;
        }
        // Marked clean either way; the next edit retries a failed write.
        self.units.mark_clean();
        if let Err(e) = self.snapshot.save(self.units.units()) {
            tracing::error!(error = %e, "failed to persist snapshot");
            self.notify(format!("Could not save state: {e}"), ToastKind::Error, now);
        }
    }

    pub fn quit(&mut self, now: Instant) {
        self.flush(now);
        self.should_quit = true;
    }

    fn notify(&mut self, message: String, kind: ToastKind, now: Instant) {
        self.toast = Some(Toast {
            message,
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }

    pub fn set_tab(&mut self, tab: Tab, now: Instant) {
        if tab == self.current_tab {
            return;
        }
        if self.current_tab == Tab::Controller {
            self.grid.leave();
        }
        self.prompt_focused = false;
        self.editing_ip = false;
        self.current_tab = tab;
        if tab == Tab::Controller {
            self.grid.enter(now);
        }
    }

    fn next_tab(&mut self, now: Instant) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.set_tab(tabs[(idx + 1) % tabs.len()], now);
    }

    fn prev_tab(&mut self, now: Instant) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.set_tab(tabs[(idx + tabs.len() - 1) % tabs.len()], now);
    }

    // --- grid mutations -------------------------------------------------

    pub fn toggle_unit(&mut self, id: UnitId) {
        self.units.toggle(id, self.selected_color);
    }

    pub fn update_unit(&mut self, id: UnitId, patch: UnitPatch) {
        self.units.update(id, patch);
    }

    fn apply_grid_action(&mut self, action: GridAction) {
        match action {
            GridAction::Toggle(id) => self.toggle_unit(id),
            GridAction::Open(id) => tracing::debug!(unit = %id, "editor opened"),
            GridAction::None => {}
        }
    }

    fn apply_editor_action(&mut self, id: UnitId, action: EditorAction) {
        match action {
            EditorAction::None => {}
            EditorAction::Close => self.grid.close_editor(),
            EditorAction::TogglePower => self.toggle_unit(id),
            EditorAction::ToggleAlternating => {
                let alternating = !self.units.get(id).is_alternating;
                self.update_unit(
                    id,
                    UnitPatch {
                        is_alternating: Some(alternating),
                        ..Default::default()
                    },
                );
            }
            EditorAction::SetValue(value) => self.update_unit(
                id,
                UnitPatch {
                    value: Some(value),
                    ..Default::default()
                },
            ),
            EditorAction::SetSecondary(value) => self.update_unit(
                id,
                UnitPatch {
                    secondary_value: Some(value),
                    ..Default::default()
                },
            ),
            EditorAction::SetColor(color) => self.update_unit(
                id,
                UnitPatch {
                    color: Some(color),
                    ..Default::default()
                },
            ),
        }
    }

    pub fn reset(&mut self) {
        self.units.reset();
        self.grid.close_editor();
        tracing::info!("grid reset to defaults");
    }

    // --- pattern generation ---------------------------------------------

    pub fn submit_prompt(&mut self) {
        let prompt = self.prompt.trim();
        if prompt.is_empty() || self.pending.is_some() {
            return;
        }
        tracing::info!(prompt, "pattern generation started");
        self.pending = Some(PendingGeneration::spawn(
            Arc::clone(&self.interpreter),
            prompt.to_string(),
            self.units.units().len(),
        ));
    }

    fn poll_generation(&mut self, now: Instant) {
        let Some(result) = self.pending.as_ref().and_then(|p| p.poll()) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(patch) => {
                let next = apply_pattern(&patch, self.units.units());
                match self.units.replace_all(next) {
                    Ok(()) => {
                        self.prompt.clear();
                        let lit = self.units.lit_count();
                        tracing::info!(lit, overrides = patch.overrides.len(), "pattern applied");
                        self.notify(format!("Pattern applied: {lit} modules lit"), ToastKind::Info, now);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "pattern produced an invalid grid");
                        self.notify(format!("Pattern rejected: {e}"), ToastKind::Error, now);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "pattern generation failed");
                self.notify(format!("AI error: {e}"), ToastKind::Error, now);
            }
        }
    }

    // --- hardware -------------------------------------------------------

    /// Placeholder for the network push to the controller.
    pub fn start_sync(&mut self, now: Instant) {
        if self.sync_until.is_some() {
            return;
        }
        tracing::info!(
            ip = %self.hardware.ip_address,
            lit = self.units.lit_count(),
            "sync requested; network push is not implemented"
        );
        self.sync_until = Some(now + SYNC_DURATION);
    }

    pub fn export_sketch(&mut self, now: Instant) {
        let dir = self
            .snapshot
            .path()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        match firmware::export_sketch(&self.hardware, &dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "firmware sketch exported");
                self.notify(format!("Sketch written to {}", path.display()), ToastKind::Info, now);
            }
            Err(e) => {
                tracing::error!(error = %e, "firmware export failed");
                self.notify(format!("Export failed: {e}"), ToastKind::Error, now);
            }
        }
    }

    // --- input ----------------------------------------------------------

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit(now);
            return;
        }

        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.reset();
            }
            return;
        }

        // The detail editor captures everything while open.
        if let Some(editor) = self.grid.editor.as_mut() {
            let id = editor.unit;
            let action = editor.handle_key(key, self.units.get(id));
            self.apply_editor_action(id, action);
            return;
        }

        if self.prompt_focused {
            self.handle_prompt_input(key);
            return;
        }
        if self.editing_ip {
            self.handle_ip_input(key);
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.quit(now);
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab(now);
                } else {
                    self.next_tab(now);
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab(now);
                return;
            }
            KeyCode::F(n @ 1..=3) => {
                self.set_tab(Tab::all()[n as usize - 1], now);
                return;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.start_sync(now);
                return;
            }
            _ => {}
        }

        match self.current_tab {
            Tab::Controller => self.handle_controller_key(key),
            Tab::HardwareGuide => match key.code {
                KeyCode::Up => self.guide_scroll = self.guide_scroll.saturating_sub(1),
                KeyCode::Down => self.guide_scroll = self.guide_scroll.saturating_add(1),
                KeyCode::PageUp => self.guide_scroll = self.guide_scroll.saturating_sub(10),
                KeyCode::PageDown => self.guide_scroll = self.guide_scroll.saturating_add(10),
                KeyCode::Char('e') | KeyCode::Char('E') => self.export_sketch(now),
                _ => {}
            },
            Tab::Settings => {
                if key.code == KeyCode::Enter {
                    self.editing_ip = true;
                }
            }
        }
    }

    fn handle_controller_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.grid.move_cursor(-1, 0),
            KeyCode::Down => self.grid.move_cursor(1, 0),
            KeyCode::Left => self.grid.move_cursor(0, -1),
            KeyCode::Right => self.grid.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let action = self.grid.activate_cursor();
                self.apply_grid_action(action);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.grid.toggle_mode(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.grid.zoom_in(),
            KeyCode::Char('-') | KeyCode::Char('_') => self.grid.zoom_out(),
            KeyCode::Char('/') => self.prompt_focused = true,
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => self.confirm_reset = true,
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_color = PaletteColor::all()[c as usize - '1' as usize];
            }
            _ => {}
        }
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Esc => self.prompt_focused = false,
            KeyCode::Backspace => {
                self.prompt.pop();
            }
            KeyCode::Char(c) => self.prompt.push(c),
            _ => {}
        }
    }

    fn handle_ip_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing_ip = false;
                tracing::info!(ip = %self.hardware.ip_address, "controller address updated");
            }
            KeyCode::Backspace => {
                self.hardware.ip_address.pop();
            }
            KeyCode::Char(c) if !c.is_control() => self.hardware.ip_address.push(c),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.current_tab != Tab::Controller || self.grid.editor.is_some() || self.confirm_reset {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = self.grid.hit_test(mouse.column, mouse.row) {
                    self.prompt_focused = false;
                    let action = self.grid.pointer_down(id);
                    self.apply_grid_action(action);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(id) = self.grid.hit_test(mouse.column, mouse.row) {
                    let action = self.grid.pointer_drag(id);
                    self.apply_grid_action(action);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.grid.pointer_up(),
            MouseEventKind::ScrollUp => self.grid.zoom_in(),
            MouseEventKind::ScrollDown => self.grid.zoom_out(),
            _ => {}
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.grid.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{InteractionMode, HEADER_HEIGHT, LABEL_WIDTH};
    use crate::pattern::tests::FixedInterpreter;
    use crate::pattern::PatternPatch;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn id(n: u16) -> UnitId {
        UnitId::new(n).unwrap()
    }

    fn app_with(interp: FixedInterpreter) -> (App, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(
            Snapshot::new(dir.path().join("state.json")),
            HardwareConfig::default(),
            Arc::new(interp),
            Duration::from_millis(1200),
            Instant::now(),
        );
        (app, dir)
    }

    fn app() -> (App, TempDir) {
        app_with(FixedInterpreter(Ok(PatternPatch::default())))
    }

    fn wait_for_generation(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_generating() {
            assert!(Instant::now() < deadline, "generation never finished");
            std::thread::sleep(Duration::from_millis(5));
            app.on_tick(Instant::now());
        }
    }

    #[test]
    fn palette_key_then_paint_uses_selected_color() {
        let (mut app, _dir) = app();
        app.on_key(key(KeyCode::Char('3')), Instant::now());
        app.on_key(key(KeyCode::Char('m')), Instant::now());
        assert_eq!(app.grid.mode, InteractionMode::Paint);
        app.on_key(key(KeyCode::Char(' ')), Instant::now());
        let unit = app.units.get(id(1));
        assert!(unit.is_on);
        assert_eq!(unit.color, PaletteColor::Blue);
    }

    #[test]
    fn enter_in_tap_mode_opens_editor_without_mutation() {
        let (mut app, _dir) = app();
        app.on_key(key(KeyCode::Right), Instant::now());
        app.on_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(app.grid.editor.as_ref().map(|e| e.unit), Some(id(2)));
        assert!(!app.units.is_dirty());

        // Power is the first editor field.
        app.on_key(key(KeyCode::Enter), Instant::now());
        assert!(app.units.get(id(2)).is_on);
        app.on_key(key(KeyCode::Esc), Instant::now());
        assert!(app.grid.editor.is_none());
    }

    #[test]
    fn editor_edits_value_and_alternation() {
        let (mut app, _dir) = app();
        app.on_key(key(KeyCode::Enter), Instant::now());
        app.on_key(key(KeyCode::Down), Instant::now());
        app.on_key(key(KeyCode::Enter), Instant::now());
        assert!(app.units.get(id(1)).is_alternating);
        app.on_key(key(KeyCode::Down), Instant::now());
        app.on_key(key(KeyCode::Backspace), Instant::now());
        app.on_key(key(KeyCode::Backspace), Instant::now());
        app.on_key(key(KeyCode::Char('f')), Instant::now());
        app.on_key(key(KeyCode::Char('2')), Instant::now());
        assert_eq!(app.units.get(id(1)).value, "F2");
        assert_eq!(app.units.get(id(2)).value, "00");
    }

    #[test]
    fn mouse_drag_paints_each_cell_once() {
        let (mut app, _dir) = app();
        app.grid.toggle_mode();
        app.grid.layout(Rect::new(0, 0, 200, 40));
        let y = HEADER_HEIGHT;
        let a1 = LABEL_WIDTH;
        let a2 = LABEL_WIDTH + 7;

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), a1, y));
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), a1 + 1, y));
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), a2, y));
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), a1, y));
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), a2 + 2, y));
        app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), a2, y));

        assert!(app.units.get(id(1)).is_on);
        assert!(app.units.get(id(2)).is_on);
        assert_eq!(app.units.lit_count(), 2);

        // A fresh stroke toggles again.
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), a2, y));
        assert!(!app.units.get(id(2)).is_on);
    }

    #[test]
    fn focus_loss_ends_the_drag() {
        let (mut app, _dir) = app();
        app.grid.toggle_mode();
        app.grid.layout(Rect::new(0, 0, 200, 40));
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), LABEL_WIDTH, HEADER_HEIGHT));
        app.on_focus_lost();
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), LABEL_WIDTH + 7, HEADER_HEIGHT));
        assert!(!app.units.get(id(2)).is_on);
    }

    #[test]
    fn reset_requires_confirmation() {
        let (mut app, _dir) = app();
        app.toggle_unit(id(10));
        app.on_key(key(KeyCode::Char('x')), Instant::now());
        assert!(app.confirm_reset);
        app.on_key(key(KeyCode::Char('n')), Instant::now());
        assert!(app.units.get(id(10)).is_on);

        app.on_key(key(KeyCode::Char('x')), Instant::now());
        app.on_key(key(KeyCode::Char('y')), Instant::now());
        assert_eq!(app.units.lit_count(), 0);
    }

    #[test]
    fn edits_are_flushed_on_tick() {
        let (mut app, dir) = app();
        app.toggle_unit(id(200));
        app.on_tick(Instant::now());
        assert!(!app.units.is_dirty());
        let reloaded = Snapshot::new(dir.path().join("state.json")).load();
        assert!(reloaded.get(id(200)).is_on);
    }

    #[test]
    fn successful_generation_replaces_grid_and_clears_prompt() {
        let patch = PatternPatch {
            activate: [id(1), id(5)].into_iter().collect(),
            overrides: [(id(1), "42".to_string())].into_iter().collect(),
        };
        let (mut app, _dir) = app_with(FixedInterpreter(Ok(patch)));
        app.toggle_unit(id(9));
        app.on_key(key(KeyCode::Char('/')), Instant::now());
        for c in "two on".chars() {
            app.on_key(key(KeyCode::Char(c)), Instant::now());
        }
        app.on_key(key(KeyCode::Enter), Instant::now());
        assert!(app.is_generating());
        // Re-entrant submit is refused while the first is in flight.
        app.submit_prompt();
        wait_for_generation(&mut app);

        assert_eq!(app.units.lit_count(), 2);
        assert!(app.units.get(id(1)).is_on && app.units.get(id(5)).is_on);
        assert_eq!(app.units.get(id(1)).value, "42");
        assert_eq!(app.units.get(id(5)).value, "00");
        assert!(app.prompt.is_empty());
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Info));
    }

    #[test]
    fn failed_generation_keeps_state_and_prompt() {
        let (mut app, _dir) = app_with(FixedInterpreter(Err("bad json".to_string())));
        app.toggle_unit(id(3));
        let before = app.units.units().to_vec();
        app.prompt = "anything".to_string();
        app.submit_prompt();
        wait_for_generation(&mut app);

        assert_eq!(app.units.units(), before.as_slice());
        assert_eq!(app.prompt, "anything");
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains("bad json"));
    }

    #[test]
    fn blank_prompt_is_ignored() {
        let (mut app, _dir) = app();
        app.prompt = "   ".to_string();
        app.submit_prompt();
        assert!(!app.is_generating());
    }

    #[test]
    fn leaving_the_grid_stops_the_blink_clock() {
        let (mut app, _dir) = app();
        assert!(app.grid.blink.is_running());
        app.on_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.current_tab, Tab::HardwareGuide);
        assert!(!app.grid.blink.is_running());
        app.on_key(key(KeyCode::F(1)), Instant::now());
        assert!(app.grid.blink.is_running());
    }

    #[test]
    fn sync_is_a_timed_stub() {
        let (mut app, _dir) = app();
        let t0 = Instant::now();
        app.on_key(key(KeyCode::Char('s')), t0);
        assert!(app.is_syncing());
        app.on_tick(t0 + Duration::from_millis(500));
        assert!(app.is_syncing());
        app.on_tick(t0 + SYNC_DURATION);
        assert!(!app.is_syncing());
    }

    #[test]
    fn ip_address_is_free_text() {
        let (mut app, _dir) = app();
        app.set_tab(Tab::Settings, Instant::now());
        app.on_key(key(KeyCode::Enter), Instant::now());
        for _ in 0..20 {
            app.on_key(key(KeyCode::Backspace), Instant::now());
        }
        for c in "esp.local".chars() {
            app.on_key(key(KeyCode::Char(c)), Instant::now());
        }
        // 'q' while typing is text, not quit.
        app.on_key(key(KeyCode::Char('q')), Instant::now());
        app.on_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(app.hardware.ip_address, "esp.localq");
        assert!(!app.should_quit);
    }

    #[test]
    fn export_writes_sketch_next_to_state() {
        let (mut app, dir) = app();
        app.set_tab(Tab::HardwareGuide, Instant::now());
        app.on_key(key(KeyCode::Char('e')), Instant::now());
        assert!(dir.path().join(firmware::SKETCH_FILE_NAME).exists());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let (mut app, _dir) = app();
        app.prompt_focused = true;
        app.on_key(
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: crossterm::event::KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
            Instant::now(),
        );
        assert!(app.should_quit);
    }
}
