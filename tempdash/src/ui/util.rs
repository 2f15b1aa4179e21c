//! Small UI helpers: temperature formatting, colors, trend glyphs, axis bounds.

use ratatui::style::Color;

pub fn fmt_temp(v: f64) -> String {
    format!("{v:.1} °F")
}

pub fn temp_color(v: f64) -> Color {
    match v {
        x if x < 32.0 => Color::Cyan,
        x if x < 60.0 => Color::Green,
        x if x < 85.0 => Color::Yellow,
        _ => Color::Red,
    }
}

/// "2024-01-01 08:30:15" -> "08:30:15"
pub fn time_of_day(ts: &str) -> &str {
    ts.split_once(' ').map(|(_, t)| t).unwrap_or(ts)
}

pub fn trend_arrow(slope: f64) -> &'static str {
    if slope > 0.05 {
        "↑"
    } else if slope < -0.05 {
        "↓"
    } else {
        "╌"
    }
}

/// Y range for the chart: at least 0..=100, widened to fit outliers.
pub fn y_bounds(values: &[f64]) -> [f64; 2] {
    let lo = values.iter().copied().fold(0.0_f64, f64::min);
    let hi = values.iter().copied().fold(100.0_f64, f64::max);
    [lo.floor(), hi.ceil()]
}
