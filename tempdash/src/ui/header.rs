//! Top header with feed, tick counter and window fill.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};
use tempdash_core::CycleResult;

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    c: Option<&CycleResult>,
    feed_label: &str,
    window_size: Option<usize>,
) {
    let title = if let Some(cc) = c {
        let fill = match window_size {
            Some(n) => format!("{}/{}", cc.readings.len(), n),
            None => cc.readings.len().to_string(),
        };
        format!(
            "tempdash — {feed_label} | tick {} | window {fill}  (+/- resize, 'q' to quit)",
            cc.tick
        )
    } else {
        format!("tempdash — {feed_label} | waiting for first reading... (press 'q' to quit)")
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
