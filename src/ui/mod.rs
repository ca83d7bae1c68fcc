pub mod editor;
pub mod grid;
pub mod guide;
pub mod settings;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab, ToastKind};

pub const BG: Color = Color::Rgb(2, 6, 23);
pub const PANEL: Color = Color::Rgb(15, 23, 42);
pub const BORDER: Color = Color::Rgb(51, 65, 85);
pub const MUTED: Color = Color::Rgb(100, 116, 139);
pub const ACCENT: Color = Color::Rgb(59, 130, 246);
pub const TEXT: Color = Color::Rgb(226, 232, 240);

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Controller => grid::render_controller(frame, chunks[1], app),
        Tab::HardwareGuide => guide::render_guide(frame, chunks[1], app),
        Tab::Settings => settings::render_settings(frame, chunks[1], app),
    }

    render_hints(frame, chunks[2], app);

    // Overlays render on top of everything
    let area = frame.area();
    if let Some(editor) = app.grid.editor.as_ref() {
        let unit = app.units.get(editor.unit);
        editor::render_editor(frame, area, editor, unit, app.grid.phase());
    }
    if app.confirm_reset {
        render_confirm_reset(frame, area);
    }
    if let Some(toast) = app.toast.as_ref() {
        render_toast(frame, area, &toast.message, toast.kind);
    }
}

/// Fixed-size rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(key, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}

fn hint_span(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(MUTED))
}

fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let pairs: &[(&str, &str)] = if app.grid.editor.is_some() {
        &[("↑↓", " field  "), ("Enter", " toggle  "), ("←→/1-7", " color  "), ("Esc", " close")]
    } else if app.prompt_focused {
        &[("Enter", " generate  "), ("Esc", " leave prompt")]
    } else if app.editing_ip {
        &[("Enter", " done")]
    } else {
        match app.current_tab {
            Tab::Controller => &[
                ("←↑↓→", " move  "),
                ("Enter", " open/paint  "),
                ("m", " mode  "),
                ("1-7", " color  "),
                ("+/-", " zoom  "),
                ("/", " prompt  "),
                ("x", " reset  "),
                ("s", " sync  "),
                ("Tab", " switch  "),
                ("q", " quit"),
            ],
            Tab::HardwareGuide => &[("↑↓", " scroll  "), ("e", " export sketch  "), ("Tab", " switch  "), ("q", " quit")],
            Tab::Settings => &[("Enter", " edit address  "), ("s", " sync  "), ("Tab", " switch  "), ("q", " quit")],
        }
    };
    let spans: Vec<Span> = pairs
        .iter()
        .flat_map(|(k, t)| [key_span(k), hint_span(t)])
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(BG)), area);
}

fn render_confirm_reset(frame: &mut Frame, area: Rect) {
    let overlay = centered(area, 44, 7);
    frame.render_widget(Clear, overlay);

    let red = Color::Rgb(239, 68, 68);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(red))
        .title(" Reset grid ")
        .title_style(Style::default().fg(red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Reset all 200 modules?",
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            key_span("y"),
            hint_span(" reset  "),
            key_span("any other key"),
            hint_span(" cancel"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_toast(frame: &mut Frame, area: Rect, message: &str, kind: ToastKind) {
    let color = match kind {
        ToastKind::Info => Color::Rgb(34, 197, 94),
        ToastKind::Error => Color::Rgb(239, 68, 68),
    };
    let width = (message.chars().count() as u16 + 4).min(area.width.saturating_sub(2)).max(10);
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(4);
    let overlay = Rect::new(x, y, width, 3).intersection(area);
    frame.render_widget(Clear, overlay);
    let p = Paragraph::new(Span::styled(message, Style::default().fg(TEXT)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(PANEL)),
        );
    frame.render_widget(p, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use ratatui::backend::TestBackend;

    use crate::config::HardwareConfig;
    use crate::pattern::tests::FixedInterpreter;
    use crate::pattern::PatternPatch;
    use crate::snapshot::Snapshot;
    use crate::units::{PaletteColor, UnitId, UnitPatch};

    fn app(dir: &tempfile::TempDir) -> App {
        App::new(
            Snapshot::new(dir.path().join("state.json")),
            HardwareConfig::default(),
            Arc::new(FixedInterpreter(Ok(PatternPatch::default()))),
            Duration::from_millis(1200),
            Instant::now(),
        )
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn controller_shows_labels_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let id = UnitId::new(1).unwrap();
        app.units.toggle(id, PaletteColor::Green);
        app.units.update(
            id,
            UnitPatch {
                value: Some("F7".to_string()),
                ..Default::default()
            },
        );
        let screen = draw(&mut app, 160, 40);
        assert!(screen.contains("MatrixRadar"));
        assert!(screen.contains("Online"));
        assert!(screen.contains("F7"));
        assert!(screen.contains(" A "));
        assert!(screen.contains("Tap mode"));
    }

    #[test]
    fn overlays_render_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.confirm_reset = true;
        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("Reset all 200 modules?"));

        app.confirm_reset = false;
        app.grid.open(UnitId::new(22).unwrap());
        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("B2"));
        assert!(screen.contains("Alternating"));
    }

    #[test]
    fn every_tab_renders_in_a_small_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        for tab in Tab::all() {
            app.set_tab(*tab, Instant::now());
            draw(&mut app, 40, 12);
        }
        app.set_tab(Tab::HardwareGuide, Instant::now());
        assert!(draw(&mut app, 120, 40).contains("SK6805"));
        app.set_tab(Tab::Settings, Instant::now());
        assert!(draw(&mut app, 120, 40).contains("192.168.4.1"));
    }
}
