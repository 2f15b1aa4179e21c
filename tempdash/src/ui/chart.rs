//! Scatter of the window's readings with the fitted regression line on top.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use tempdash_core::CycleResult;

use crate::ui::theme::{FIT_COLOR, POINT_COLOR};
use crate::ui::util::{time_of_day, y_bounds};

pub fn draw_trend_chart(f: &mut ratatui::Frame<'_>, area: Rect, c: Option<&CycleResult>) {
    let Some(cc) = c.filter(|cc| !cc.readings.is_empty()) else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Chart with Current Trend");
        f.render_widget(Paragraph::new("collecting...").block(block), area);
        return;
    };

    let values = cc.values();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let fit_points: Vec<(f64, f64)> = cc
        .trend
        .as_ref()
        .map(|t| {
            t.fitted
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect()
        })
        .unwrap_or_default();

    let mut datasets = vec![Dataset::default()
        .name("readings")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(POINT_COLOR))
        .data(&points)];
    if !fit_points.is_empty() {
        datasets.push(
            Dataset::default()
                .name("regression line")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(FIT_COLOR))
                .data(&fit_points),
        );
    }

    let title = match &cc.trend {
        Some(t) => format!(
            "Temperature Readings with Regression Line (slope {:+.2}/tick, r {:.2})",
            t.fit.slope, t.fit.r_value
        ),
        None => "Temperature Readings".to_string(),
    };

    let first = cc.table.rows.first().map(|r| time_of_day(&r.timestamp).to_string());
    let last = cc.table.rows.last().map(|r| time_of_day(&r.timestamp).to_string());
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);
    let [y_min, y_max] = y_bounds(&values);

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Time")
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(first.unwrap_or_default()),
                    Span::raw(last.unwrap_or_default()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Temperature (°F)")
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.0}")),
                    Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );
    f.render_widget(chart, area);
}
