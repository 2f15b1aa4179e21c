//! App state and main loop: input handling, picking up tick results, and drawing.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tempdash_core::CycleResult;
use tokio::time::sleep;
use tracing::debug;

use crate::feed::Feed;
use crate::ui::{
    chart::draw_trend_chart,
    current::{draw_current_temp, draw_timestamp},
    header::draw_header,
    readings::draw_readings_table,
};

pub struct App {
    current: Option<Arc<CycleResult>>,
    feed_label: String,
    // Requested window size, None when the feed does not report one
    window_size: Option<usize>,
    should_quit: bool,
}

impl App {
    pub fn new(feed_label: String, window_size: Option<usize>) -> Self {
        Self {
            current: None,
            feed_label,
            window_size,
            should_quit: false,
        }
    }

    pub fn current(&self) -> Option<&CycleResult> {
        self.current.as_deref()
    }

    pub fn window_size(&self) -> Option<usize> {
        self.window_size
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self, feed: &mut Feed) -> Result<(), Box<dyn std::error::Error>> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, feed).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        feed: &mut Feed,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k, feed);
                }
            }
            if self.should_quit {
                break;
            }

            if let Some(c) = feed.poll().await {
                self.update_with_cycle(c);
            }

            terminal.draw(|f| self.draw(f))?;

            sleep(Duration::from_millis(200)).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent, feed: &Feed) {
        if k.kind != KeyEventKind::Press {
            return;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_window(feed, 1),
            KeyCode::Char('-') | KeyCode::Char('_') => self.step_window(feed, -1),
            _ => {}
        }
    }

    fn step_window(&mut self, feed: &Feed, delta: isize) {
        let (Some(cur), Some(max)) = (self.window_size, feed.max_window()) else {
            return;
        };
        let next = cur.saturating_add_signed(delta).clamp(1, max);
        if next == cur {
            return;
        }
        match feed.resize_window(next) {
            Ok(()) => self.window_size = Some(next),
            Err(e) => debug!("resize rejected: {e}"),
        }
    }

    pub fn update_with_cycle(&mut self, c: Arc<CycleResult>) {
        if let Some(prev) = &self.current {
            if prev.tick == c.tick {
                return;
            }
        }
        self.current = Some(c);
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let c = self.current.as_deref();

        // Root rows: header, latest cards, table, chart
        let table_h = c.map(|cc| cc.table.len()).unwrap_or(0) as u16 + 3;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(table_h.clamp(4, 14)),
                Constraint::Min(8),
            ])
            .split(area);

        draw_header(f, rows[0], c, &self.feed_label, self.window_size);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        draw_current_temp(f, cards[0], c);
        draw_timestamp(f, cards[1], c);

        draw_readings_table(f, rows[2], c);
        draw_trend_chart(f, rows[3], c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use tempdash_core::{Reading, SlidingWindow};

    fn cycle(tick: u64, vals: &[f64]) -> Arc<CycleResult> {
        let ts = NaiveDate::from_ymd_opt(2024, 8, 2)
            .and_then(|d| d.and_hms_opt(14, 5, 9))
            .unwrap();
        let mut w = SlidingWindow::new(5, 30).unwrap();
        let mut last = None;
        for v in vals {
            let r = Reading::new(*v, ts);
            w.push(r);
            last = Some(r);
        }
        Arc::new(CycleResult::derive(tick, &w, last.unwrap()))
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_app_shows_waiting() {
        let mut app = App::new("local".into(), Some(5));
        let text = render(&mut app);
        assert!(text.contains("waiting for first reading"));
        assert!(text.contains("collecting..."));
    }

    #[test]
    fn every_panel_shows_the_same_tick() {
        let mut app = App::new("local".into(), Some(5));
        app.update_with_cycle(cycle(7, &[10.0, 20.0, 42.5]));
        let text = render(&mut app);
        assert!(text.contains("tick 7"));
        assert!(text.contains("window 3/5"));
        assert!(text.contains("42.5 °F"));
        assert!(text.contains("2024-08-02 14:05:09"));
        assert!(text.contains("Most Recent Readings"));
        assert!(text.contains("best_fit"));
        assert!(text.contains("Regression Line"));
    }

    #[test]
    fn single_reading_draws_without_trend() {
        let mut app = App::new("local".into(), Some(5));
        app.update_with_cycle(cycle(1, &[42.5]));
        let text = render(&mut app);
        assert!(text.contains("42.5 °F"));
        assert!(!text.contains("best_fit"));
        assert!(!text.contains("Regression Line"));
    }

    #[test]
    fn same_tick_is_not_replaced() {
        let mut app = App::new("local".into(), None);
        let first = cycle(3, &[1.0, 2.0]);
        app.update_with_cycle(first.clone());
        app.update_with_cycle(cycle(3, &[9.0, 9.0]));
        assert_eq!(app.current(), Some(&*first));
    }
}
