use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

use super::{ACCENT, BG, BORDER, MUTED, TEXT};

pub fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let hw = &app.hardware;
    let label = |text: &'static str| Span::styled(format!("  {text:<18}"), Style::default().fg(MUTED));
    let value = |text: String| Span::styled(text, Style::default().fg(TEXT).add_modifier(Modifier::BOLD));

    let ip_style = if app.editing_ip {
        Style::default().fg(TEXT).bg(Color::Rgb(30, 41, 59)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    };
    let mut ip = vec![label("ESP32 address"), Span::styled(hw.ip_address.clone(), ip_style)];
    if app.editing_ip {
        ip.push(Span::styled("▏", Style::default().fg(ACCENT)));
    } else {
        ip.push(Span::styled("   (Enter to edit)", Style::default().fg(MUTED)));
    }

    let bits = |map: &[u8; 7]| {
        map.iter()
            .zip('a'..='g')
            .map(|(bit, seg)| format!("{seg}:{bit:<3}"))
            .collect::<String>()
    };

    let lines = vec![
        Line::from(""),
        Line::from(ip),
        Line::from(""),
        Line::from(vec![label("Total displays"), value(hw.total_displays.to_string())]),
        Line::from(vec![
            label("LEDs per module"),
            value(hw.pin_mapping.leds_per_module().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Segment to LED mapping",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![label("Digit 1"), value(bits(&hw.pin_mapping.digit1))]),
        Line::from(vec![label("Digit 2"), value(bits(&hw.pin_mapping.digit2))]),
        Line::from(""),
        Line::from(Span::styled(
            "  The address is kept for this session only.",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title(" Hardware settings ")
            .title_style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(BG)),
    );
    frame.render_widget(p, area);
}
