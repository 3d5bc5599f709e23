//! Calendar events and the month grid built from them

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CaseDeskError, Result};

/// Kind of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Audiencia")]
    Hearing,
    #[serde(rename = "Vencimiento")]
    Deadline,
    #[serde(rename = "Trámite")]
    Procedure,
    /// Also absorbs kinds this client does not know about
    #[serde(rename = "Otro", other)]
    Other,
}

impl EventKind {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Hearing => "Audiencia",
            Self::Deadline => "Vencimiento",
            Self::Procedure => "Trámite",
            Self::Other => "Otro",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Owning case of an event, as embedded by the aggregate endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRef {
    pub id: String,
    #[serde(rename = "caratula")]
    pub title: String,
}

/// A scheduled event. `timestamp_utc` is the instant; local placement is
/// decided by the viewer's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "fecha")]
    pub timestamp_utc: DateTime<Utc>,
    #[serde(rename = "tipo")]
    pub kind: EventKind,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "causa", default, skip_serializing_if = "Option::is_none")]
    pub case_ref: Option<CaseRef>,
}

/// Payload of `POST /causas/{id}/eventos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "fecha")]
    pub timestamp_utc: DateTime<Utc>,
    #[serde(rename = "tipo")]
    pub kind: EventKind,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CaseDeskError::InvalidInput(format!("month out of range: {month}")));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn first_day(self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            CaseDeskError::InvalidInput(format!("unrepresentable month {}-{:02}", self.year, self.month))
        })
    }

    /// Number of days, taken as the day before the first of the following month
    pub fn days_in_month(self) -> Result<u32> {
        let last = self
            .next()
            .first_day()?
            .pred_opt()
            .ok_or_else(|| CaseDeskError::Internal("no day before month start".into()))?;
        Ok(last.day())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One grid cell. Padding cells carry no day and no events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub day_of_month: Option<u32>,
    pub events: Vec<CalendarEvent>,
}

impl Cell {
    pub fn padding() -> Self {
        Self { day_of_month: None, events: Vec::new() }
    }

    pub fn is_padding(&self) -> bool {
        self.day_of_month.is_none()
    }
}

/// Month view: `start_day` padding cells (Sunday = 0) followed by one cell per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub start_day: u32,
    pub days_in_month: u32,
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    pub fn year_month(&self) -> YearMonth {
        YearMonth { year: self.year, month: self.month }
    }

    /// Cell for a given day of the month
    pub fn day(&self, day_of_month: u32) -> Option<&Cell> {
        if day_of_month == 0 || day_of_month > self.days_in_month {
            return None;
        }
        self.cells.get((self.start_day + day_of_month - 1) as usize)
    }

    /// Day cells only, in order
    pub fn days(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_padding())
    }

    pub fn event_count(&self) -> usize {
        self.cells.iter().map(|c| c.events.len()).sum()
    }
}
