//! Most recent readings as a zebra-striped table, oldest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use tempdash_core::CycleResult;

use crate::ui::theme::{HEADER_FG, ZEBRA_BG};
use crate::ui::util::temp_color;

const COLS: [Constraint; 4] = [
    Constraint::Length(4),  // #
    Constraint::Length(10), // Temp
    Constraint::Length(21), // Timestamp
    Constraint::Length(10), // Trend
];

pub fn draw_readings_table(f: &mut ratatui::Frame<'_>, area: Rect, c: Option<&CycleResult>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Most Recent Readings");
    let Some(cc) = c else {
        f.render_widget(block, area);
        return;
    };

    let header = Row::new(
        cc.table
            .columns()
            .iter()
            .map(|h| Cell::from(*h)),
    )
    .style(Style::default().fg(HEADER_FG).add_modifier(Modifier::BOLD));

    // Keep the newest rows when the pane is shorter than the window.
    let visible = area.height.saturating_sub(3) as usize;
    let skip = cc.table.rows.len().saturating_sub(visible);

    let rows = cc.table.rows.iter().skip(skip).map(|r| {
        let mut cells = vec![
            Cell::from(r.index.to_string()),
            Cell::from(format!("{:.1}", r.temp)).style(Style::default().fg(temp_color(r.temp))),
            Cell::from(r.timestamp.clone()),
        ];
        if let Some(fit) = r.best_fit {
            cells.push(Cell::from(format!("{fit:.2}")));
        }
        let row = Row::new(cells);
        if r.index % 2 == 1 {
            row.style(Style::default().bg(ZEBRA_BG))
        } else {
            row
        }
    });

    let table = Table::new(rows, COLS)
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}
