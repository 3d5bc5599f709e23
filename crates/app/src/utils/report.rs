//! Plain-text rendering of the agenda for the headless binary

use std::fmt::Write;

use casedesk_core::is_deadline;
use casedesk_domain::{CalendarEvent, Cell, MonthGrid};
use chrono::TimeZone;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Month grid as a Sunday-first table; days with events carry a `*`
pub fn render_month(grid: &MonthGrid) -> String {
    let mut out = format!("{}\n{}\n", grid.year_month(), WEEKDAYS.join(" "));

    for week in grid.cells.chunks(7) {
        let line: String = week.iter().map(render_cell).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_cell(cell: &Cell) -> String {
    match cell.day_of_month {
        None => "   ".to_string(),
        Some(day) if cell.events.is_empty() => format!("{day:>2} "),
        Some(day) => format!("{day:>2}*"),
    }
}

/// One line per event, in the order given, with local times in `tz`
///
/// Deadlines are flagged with `!`.
pub fn render_events<Tz: TimeZone>(events: &[CalendarEvent], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    for event in events {
        let local = event.timestamp_utc.with_timezone(tz);
        let marker = if is_deadline(event) { '!' } else { ' ' };
        let case = event.case_ref.as_ref().map_or("-", |c| c.title.as_str());
        let _ = writeln!(
            out,
            "{marker} {} {:<11} {} ({case})",
            local.format("%Y-%m-%d %H:%M"),
            event.kind.wire_name(),
            event.title,
        );
    }
    out
}
