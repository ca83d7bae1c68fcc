use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::grid::editor::{Editor, EditorField};
use crate::grid::segments::glyph_rows;
use crate::units::{display_text, BlinkPhase, DisplayUnit, PaletteColor};

use super::{centered, ACCENT, BORDER, MUTED, PANEL, TEXT};

const SEGMENT_OFF: Color = Color::Rgb(30, 41, 59);

/// Modal detail editor for a single module.
pub fn render_editor(frame: &mut Frame, area: Rect, editor: &Editor, unit: &DisplayUnit, phase: BlinkPhase) {
    let overlay = centered(area, 46, 20);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} · module #{} ", unit.id, unit.id.get()))
        .title_style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![Line::from("")];
    lines.extend(preview_lines(unit, phase));
    lines.push(Line::from(""));

    let focus = editor.focus;
    for field in EditorField::all() {
        lines.push(field_line(*field, focus == *field, unit));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Two seven-segment glyphs; unlit segments are drawn dim so the digit
/// outline stays visible.
fn preview_lines(unit: &DisplayUnit, phase: BlinkPhase) -> Vec<Line<'static>> {
    let text = display_text(unit.shown_value(phase));
    let mut chars = text.chars();
    let first = chars.next().unwrap_or(' ');
    let second = chars.next().unwrap_or(' ');
    let lit = Style::default().fg(unit.color.rgb()).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(SEGMENT_OFF);

    let outline = glyph_rows('8');
    let a = glyph_rows(first);
    let b = glyph_rows(second);

    (0..outline.len())
        .map(|row| {
            let mut spans = vec![Span::raw("             ")];
            for (glyph, gap) in [(&a, "   "), (&b, "")] {
                for (on, full) in glyph[row].chars().zip(outline[row].chars()) {
                    let span = if on != ' ' && unit.is_on {
                        Span::styled(on.to_string(), lit)
                    } else {
                        Span::styled(full.to_string(), dim)
                    };
                    spans.push(span);
                }
                spans.push(Span::raw(gap));
            }
            Line::from(spans)
        })
        .collect()
}

fn field_line(field: EditorField, focused: bool, unit: &DisplayUnit) -> Line<'static> {
    let marker = if focused {
        Span::styled("  ▶ ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("    ")
    };
    let label_style = if focused {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    let on_off = |on: bool| {
        if on {
            Span::styled("ON ", Style::default().fg(Color::Rgb(34, 197, 94)).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("OFF", Style::default().fg(MUTED))
        }
    };
    let value_box = |value: &str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SEGMENT_OFF)
        };
        vec![
            Span::styled("[", Style::default().fg(BORDER)),
            Span::styled(format!("{value:<2}"), style),
            Span::styled("]", Style::default().fg(BORDER)),
        ]
    };

    let mut spans = vec![marker];
    match field {
        EditorField::Power => {
            spans.push(Span::styled(format!("{:<13}", "Power"), label_style));
            spans.push(on_off(unit.is_on));
        }
        EditorField::Alternating => {
            spans.push(Span::styled(format!("{:<13}", "Alternating"), label_style));
            spans.push(on_off(unit.is_alternating));
        }
        EditorField::ValueA => {
            spans.push(Span::styled(format!("{:<13}", "Value A"), label_style));
            spans.extend(value_box(&unit.value, true));
        }
        EditorField::ValueB => {
            spans.push(Span::styled(format!("{:<13}", "Value B"), label_style));
            spans.extend(value_box(&unit.secondary_value, unit.is_alternating));
            if !unit.is_alternating {
                spans.push(Span::styled(" locked", Style::default().fg(SEGMENT_OFF)));
            }
        }
        EditorField::Color => {
            spans.push(Span::styled(format!("{:<13}", "Color"), label_style));
            for color in PaletteColor::all() {
                let symbol = if *color == unit.color { "◉ " } else { "● " };
                spans.push(Span::styled(symbol, Style::default().fg(color.rgb())));
            }
            spans.push(Span::styled(unit.color.name(), Style::default().fg(MUTED)));
        }
    }
    Line::from(spans)
}
