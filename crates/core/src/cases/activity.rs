//! Case inactivity helpers for the dashboard table

use casedesk_domain::Case;
use chrono::{DateTime, Utc};

/// Cases ordered from longest to shortest without review
///
/// Ties keep the service's order.
pub fn by_inactivity(cases: &[Case], now: DateTime<Utc>) -> Vec<&Case> {
    let mut ordered: Vec<&Case> = cases.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(c.days_inactive(now)));
    ordered
}

/// Cases flagged as stale (not reviewed for more than the stale threshold)
pub fn stale_cases(cases: &[Case], now: DateTime<Utc>) -> Vec<&Case> {
    cases.iter().filter(|c| c.is_stale(now)).collect()
}
