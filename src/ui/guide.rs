use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::firmware::{render_sketch, DATA_PIN, SKETCH_FILE_NAME};

use super::{ACCENT, BG, BORDER, MUTED, TEXT};

const WARN: Color = Color::Rgb(250, 204, 21);
const CODE: Color = Color::Rgb(134, 239, 172);
/// Lines of the generated sketch shown inline.
const SNIPPET_LINES: usize = 14;

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
}

fn body(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(TEXT)))
}

fn kv(key: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("    {key:<12}"), Style::default().fg(MUTED)),
        Span::styled(value, Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
    ])
}

pub fn render_guide(frame: &mut Frame, area: Rect, app: &App) {
    let hw = &app.hardware;
    let total_leds = hw.total_displays * hw.pin_mapping.leds_per_module();

    let mut lines = vec![
        heading("⚡ SK6805 (NeoPixel) bus"),
        Line::from(""),
        body("  Each module carries 14 SK6805-EC LEDs, seven per digit. The LEDs sit on a"),
        body("  single-wire serial bus: one data line drives every module in turn."),
        Line::from(""),
        heading("⛓ Wiring the modules"),
        Line::from(""),
        body("  Connector pinout (CN1 / CN2):"),
        kv("Pin 1", "VCC   +5V".to_string()),
        kv("Pin 2", "DATA  DIN / DOUT".to_string()),
        kv("Pin 3", "GND   0V".to_string()),
        Line::from(""),
        body("  Daisy chain: DOUT of one module feeds DIN of the next, across all"),
        Line::from(Span::styled(
            format!("  {} modules. The ESP32 drives the chain from GPIO {DATA_PIN}.", hw.total_displays),
            Style::default().fg(TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Power tip: ", Style::default().fg(WARN).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{} modules means {total_leds} RGB LEDs. Inject +5V every 20-30", hw.total_displays),
                Style::default().fg(TEXT),
            ),
        ]),
        body("  modules to avoid voltage drop and washed-out colors."),
        Line::from(""),
        heading("⌁ Segment mapping (bit index per segment a..g)"),
        Line::from(""),
        kv("Digit 1", format!("{:?}", hw.pin_mapping.digit1)),
        kv("Digit 2", format!("{:?}", hw.pin_mapping.digit2)),
        Line::from(""),
        heading("⌨ ESP32 firmware (Arduino)"),
        Line::from(""),
    ];

    let sketch = render_sketch(hw);
    for code in sketch.lines().take(SNIPPET_LINES) {
        lines.push(Line::from(Span::styled(format!("    {code}"), Style::default().fg(CODE))));
    }
    lines.push(Line::from(Span::styled("    ...", Style::default().fg(MUTED))));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(MUTED)),
        Span::styled("e", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" to write the full sketch ({SKETCH_FILE_NAME}) next to the state file."),
            Style::default().fg(MUTED),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(heading("☰ Bill of materials"));
    lines.push(Line::from(""));
    lines.push(kv("SK6805-EC", "14x per module. RGB LED with built-in driver, 2424 package.".to_string()));
    lines.push(kv("C0402", "100nF decoupling per LED, prevents flicker.".to_string()));

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title(" Hardware guide ")
                .title_style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(BG)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.guide_scroll, 0));
    frame.render_widget(p, area);
}
