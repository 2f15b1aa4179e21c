//! tempdash: terminal dashboard for live temperature readings.

pub mod app;
pub mod cli;
pub mod feed;
pub mod ui;
pub mod ws;
