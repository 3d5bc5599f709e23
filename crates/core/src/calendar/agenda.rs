//! Agenda helpers used by the case detail and dashboard views

use casedesk_domain::{CalendarEvent, EventKind};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::grid::local_date;

/// Events whose local date in `tz` is `date`, in the given order
pub fn events_on<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| local_date(e, tz) == date).collect()
}

/// Stable sort by instant; events at the same instant keep their order
pub fn sort_chronologically(events: &mut [CalendarEvent]) {
    events.sort_by_key(|e| e.timestamp_utc);
}

pub fn is_deadline(event: &CalendarEvent) -> bool {
    event.kind == EventKind::Deadline
}

/// Events at or after `now`, soonest first, at most `limit`
pub fn upcoming(events: &[CalendarEvent], now: DateTime<Utc>, limit: usize) -> Vec<CalendarEvent> {
    let mut ahead: Vec<CalendarEvent> =
        events.iter().filter(|e| e.timestamp_utc >= now).cloned().collect();
    sort_chronologically(&mut ahead);
    ahead.truncate(limit);
    ahead
}
