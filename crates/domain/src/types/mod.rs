//! Domain types and models
//!
//! Records exchanged with the case-management service keep the service's
//! field names on the wire through serde renames; the Rust side uses English
//! names throughout.

pub mod calendar;
pub mod case;
pub mod mutation;
pub mod search;
pub mod session;

pub use calendar::{CalendarEvent, CaseRef, Cell, EventKind, MonthGrid, NewCalendarEvent, YearMonth};
pub use case::{
    Case, CaseStats, CaseStatus, CaseSummary, CaseUpdate, Document, DocumentKind, NewCase,
    STALE_AFTER_DAYS,
};
pub use mutation::{ConfirmOutcome, Notification, NotificationLevel, PendingDestructiveAction};
pub use search::{SearchQuery, SearchResultSet, SearchView};
pub use session::{
    Credentials, LoginResponse, PasswordChange, ProfileUpdate, Session, SessionState, UserIdentity,
};
