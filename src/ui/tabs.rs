use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

use super::{ACCENT, BORDER, MUTED, TEXT};

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let status = if app.is_syncing() {
        Span::styled(" ⟳ Sync... ", Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" ● Online ", Style::default().fg(Color::Rgb(34, 197, 94)))
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .border_type(BorderType::Rounded)
                .title(" ▦ MatrixRadar ")
                .title_style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
                .title(Line::from(status).right_aligned()),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(BORDER)));

    frame.render_widget(tabs, area);
}
