//! Month grid construction

use casedesk_domain::{CalendarEvent, CaseDeskError, Cell, MonthGrid, Result, YearMonth};
use chrono::{Datelike, NaiveDate, TimeZone};

/// Bucket `events` into the grid of `year`-`month` as seen from `tz`
///
/// The grid starts with `start_day` padding cells (Sunday = 0), followed by
/// one cell per day. An event lands on the cell of its local date in `tz`;
/// events outside the month are left out. Within a cell events keep the order
/// they were given in.
pub fn build_month_grid<Tz: TimeZone>(
    events: &[CalendarEvent],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Result<MonthGrid> {
    let year_month = YearMonth::new(year, month)?;
    let first = year_month.first_day()?;
    let start_day = first.weekday().num_days_from_sunday();
    let days_in_month = year_month.days_in_month()?;

    let mut cells: Vec<Cell> = Vec::with_capacity((start_day + days_in_month) as usize);
    cells.extend((0..start_day).map(|_| Cell::padding()));
    cells.extend((1..=days_in_month).map(|day| Cell { day_of_month: Some(day), events: Vec::new() }));

    for event in events {
        let local = local_date(event, tz);
        if local.year() != year || local.month() != month {
            continue;
        }
        let index = (start_day + local.day() - 1) as usize;
        let cell = cells.get_mut(index).ok_or_else(|| {
            CaseDeskError::Internal(format!("no grid cell for {local} in {year_month}"))
        })?;
        cell.events.push(event.clone());
    }

    Ok(MonthGrid { year, month, start_day, days_in_month, cells })
}

pub(crate) fn local_date<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> NaiveDate {
    event.timestamp_utc.with_timezone(tz).date_naive()
}
