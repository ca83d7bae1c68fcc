use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::grid::GridGeometry;
use crate::units::{display_text, row_label, BlinkPhase, PaletteColor, UnitId, TOTAL_DISPLAYS};

use super::{ACCENT, BG, BORDER, MUTED, PANEL, TEXT};

const CELL_ON_BG: Color = Color::Rgb(15, 23, 42);
const CELL_OFF_BG: Color = Color::Rgb(8, 12, 28);
const CELL_OFF_FG: Color = Color::Rgb(30, 41, 59);
const CURSOR_BG: Color = Color::Rgb(51, 65, 85);

pub fn render_controller(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_toolbar(frame, chunks[0], app);
    render_grid(frame, chunks[1], app);
}

fn render_toolbar(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.prompt_focused { ACCENT } else { BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(" ✦ AI pattern ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut prompt = vec![Span::styled(" > ", Style::default().fg(ACCENT))];
    if app.prompt.is_empty() && !app.prompt_focused {
        prompt.push(Span::styled(
            "press / and describe a pattern, e.g. \"a smiley face\"",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        ));
    } else {
        prompt.push(Span::styled(app.prompt.as_str(), Style::default().fg(TEXT)));
        if app.prompt_focused {
            prompt.push(Span::styled("▏", Style::default().fg(ACCENT)));
        }
    }
    if app.is_generating() {
        prompt.push(Span::styled(
            "  ⟳ generating...",
            Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::BOLD),
        ));
    }

    let mut controls: Vec<Span> = vec![Span::raw(" ")];
    for (i, color) in PaletteColor::all().iter().enumerate() {
        let selected = *color == app.selected_color;
        let bracket = if selected {
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        controls.push(Span::styled(if selected { "[" } else { " " }, bracket));
        controls.push(Span::styled(format!("{}", i + 1), bracket));
        controls.push(Span::styled("●", Style::default().fg(color.rgb())));
        controls.push(Span::styled(if selected { "]" } else { " " }, bracket));
    }
    let sep = || Span::styled(" │ ", Style::default().fg(BORDER));
    controls.push(sep());
    controls.push(Span::styled(
        app.grid.mode.label(),
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    ));
    if app.grid.paint.is_painting() {
        controls.push(Span::styled(" ✎", Style::default().fg(ACCENT)));
    }
    controls.push(sep());
    if app.grid.blink.is_running() {
        let phase = match app.grid.phase() {
            BlinkPhase::Primary => "◐ A",
            BlinkPhase::Secondary => "◑ B",
        };
        controls.push(Span::styled(phase, Style::default().fg(MUTED)));
        controls.push(sep());
    }
    controls.push(Span::styled(
        format!("Zoom {:.1}x", app.grid.zoom_factor()),
        Style::default().fg(TEXT),
    ));
    controls.push(sep());
    controls.push(Span::styled(
        format!("Lit {}/{}", app.units.lit_count(), TOTAL_DISPLAYS),
        Style::default().fg(MUTED),
    ));

    frame.render_widget(
        Paragraph::new(vec![Line::from(prompt), Line::from(controls)]),
        inner,
    );
}

fn render_grid(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .style(Style::default().bg(BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let geometry = app.grid.layout(inner);
    let phase = app.grid.phase();
    let cursor = app.grid.cursor;
    let buf = frame.buffer_mut();

    render_headers(buf, inner, &geometry);

    for r in 0..geometry.visible_rows {
        for c in 0..geometry.visible_cols {
            let Some(id) = UnitId::from_coord(geometry.first_row + r, geometry.first_col + c) else {
                continue;
            };
            let Some(rect) = geometry.cell_rect(id) else {
                continue;
            };
            let rect = rect.intersection(inner);
            if rect.is_empty() {
                continue;
            }

            let unit = app.units.get(id);
            let (fg, mut bg) = if unit.is_on {
                (unit.color.rgb(), CELL_ON_BG)
            } else {
                (CELL_OFF_FG, CELL_OFF_BG)
            };
            let mut style = Style::default().fg(fg);
            if unit.is_on {
                style = style.add_modifier(Modifier::BOLD);
            }
            if id == cursor {
                bg = CURSOR_BG;
                if !unit.is_on {
                    style = style.fg(MUTED);
                }
            }
            style = style.bg(bg);
            buf.set_style(rect, style);

            let text = display_text(unit.shown_value(phase));
            let x = rect.x + rect.width.saturating_sub(2) / 2;
            let y = rect.y + rect.height.saturating_sub(1) / 2;
            buf.set_stringn(x, y, &text, rect.right().saturating_sub(x) as usize, style);

            if unit.is_on && unit.is_alternating && rect.width >= 4 {
                buf.set_string(rect.right() - 1, rect.y, "•", Style::default().fg(ACCENT).bg(bg));
            }
        }
    }
}

fn render_headers(buf: &mut Buffer, inner: Rect, geometry: &GridGeometry) {
    let label_style = Style::default().fg(MUTED).bg(PANEL).add_modifier(Modifier::BOLD);

    for c in 0..geometry.visible_cols {
        let col = geometry.first_col + c;
        let Some(rect) = UnitId::from_coord(geometry.first_row, col).and_then(|id| geometry.cell_rect(id)) else {
            continue;
        };
        let text = format!("{}", col + 1);
        let x = rect.x + rect.width.saturating_sub(text.len() as u16) / 2;
        if x < inner.right() {
            buf.set_stringn(x, inner.y, &text, (inner.right() - x) as usize, label_style);
        }
    }

    for r in 0..geometry.visible_rows {
        let row = geometry.first_row + r;
        let Some(rect) = UnitId::from_coord(row, geometry.first_col).and_then(|id| geometry.cell_rect(id)) else {
            continue;
        };
        let y = rect.y + rect.height.saturating_sub(1) / 2;
        if y < inner.bottom() {
            let text = format!(" {} ", row_label(row));
            buf.set_stringn(inner.x, y, &text, inner.width as usize, label_style);
        }
    }
}
