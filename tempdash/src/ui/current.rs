//! Latest-reading cards: current temperature and its timestamp.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tempdash_core::CycleResult;

use crate::ui::util::{fmt_temp, temp_color, trend_arrow};

pub fn draw_current_temp(f: &mut ratatui::Frame<'_>, area: Rect, c: Option<&CycleResult>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Current Temperature");
    let Some(cc) = c else {
        f.render_widget(Paragraph::new("--").alignment(Alignment::Center).block(block), area);
        return;
    };

    let v = cc.latest.value();
    let mut spans = vec![Span::styled(
        fmt_temp(v),
        Style::default()
            .fg(temp_color(v))
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(t) = &cc.trend {
        spans.push(Span::raw(format!(" {}", trend_arrow(t.fit.slope))));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

pub fn draw_timestamp(f: &mut ratatui::Frame<'_>, area: Rect, c: Option<&CycleResult>) {
    let text = c
        .map(|cc| cc.latest.timestamp_str())
        .unwrap_or_else(|| "--".into());
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Current Date and Time");
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
}
