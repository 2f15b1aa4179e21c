//! Shared UI theme constants.

use ratatui::style::Color;

// Chart series
pub const POINT_COLOR: Color = Color::Blue;
pub const FIT_COLOR: Color = Color::Magenta;

// Readings table
pub const HEADER_FG: Color = Color::Rgb(170, 170, 180);
pub const ZEBRA_BG: Color = Color::Rgb(30, 30, 36);
