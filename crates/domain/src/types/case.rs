//! Case records ("causas")

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::CalendarEvent;

/// Days without review after which a case is flagged as stale
pub const STALE_AFTER_DAYS: i64 = 15;

/// Procedural status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "Inicio")]
    Initial,
    #[serde(rename = "Etapa Probatoria")]
    Evidence,
    #[serde(rename = "Alegatos")]
    Closing,
    #[serde(rename = "Sentencia")]
    Judgment,
    #[serde(rename = "Apelación")]
    Appeal,
    #[serde(rename = "Archivada")]
    Archived,
}

impl CaseStatus {
    /// Label used by the service
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Initial => "Inicio",
            Self::Evidence => "Etapa Probatoria",
            Self::Closing => "Alegatos",
            Self::Judgment => "Sentencia",
            Self::Appeal => "Apelación",
            Self::Archived => "Archivada",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Kind of an attached document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
    Excel,
    Img,
    #[serde(rename = "otro")]
    Other,
}

/// Metadata of a document attached to a case
///
/// File transfer itself is not handled by this client core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(rename = "nombre_archivo")]
    pub file_name: String,
    #[serde(rename = "tipo")]
    pub kind: DocumentKind,
    #[serde(rename = "fecha_carga")]
    pub uploaded_at: DateTime<Utc>,
}

/// Full case record as returned by `GET /causas` and `GET /causas/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    #[serde(rename = "caratula")]
    pub title: String,
    #[serde(rename = "nro_expediente", default)]
    pub file_number: String,
    #[serde(rename = "juzgado", default)]
    pub court: String,
    #[serde(rename = "fuero", default)]
    pub jurisdiction: String,
    #[serde(rename = "estado")]
    pub status: CaseStatus,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "telefono_cliente", default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(rename = "ultima_revision")]
    pub last_review: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "documentos", default)]
    pub documents: Vec<Document>,
    #[serde(rename = "eventos", default)]
    pub events: Vec<CalendarEvent>,
}

impl Case {
    /// Whole days elapsed since the last review, never negative
    pub fn days_inactive(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_review).num_days().max(0)
    }

    /// Whether the case has gone unreviewed for longer than [`STALE_AFTER_DAYS`]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.days_inactive(now) > STALE_AFTER_DAYS
    }

    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            file_number: self.file_number.clone(),
        }
    }
}

/// Compact case entry returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    #[serde(rename = "caratula")]
    pub title: String,
    /// Empty when the service omits it
    #[serde(rename = "nro_expediente", default, deserialize_with = "null_as_empty")]
    pub file_number: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload of `POST /causas`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    #[serde(rename = "caratula")]
    pub title: String,
    #[serde(rename = "nro_expediente")]
    pub file_number: String,
    #[serde(rename = "juzgado")]
    pub court: String,
    #[serde(rename = "fuero")]
    pub jurisdiction: String,
    #[serde(rename = "observaciones", default)]
    pub notes: String,
    #[serde(rename = "telefono_cliente", default)]
    pub client_phone: String,
}

/// Payload of `PATCH /causas/{id}`
///
/// Only the fields that are set are sent; the service leaves the rest as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    #[serde(rename = "caratula", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "nro_expediente", default, skip_serializing_if = "Option::is_none")]
    pub file_number: Option<String>,
    #[serde(rename = "juzgado", default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(rename = "observaciones", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "telefono_cliente", default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
}

impl CaseUpdate {
    /// Prefill every editable field from the current record
    pub fn from_case(case: &Case) -> Self {
        Self {
            title: Some(case.title.clone()),
            file_number: Some(case.file_number.clone()),
            court: Some(case.court.clone()),
            status: Some(case.status),
            notes: Some(case.notes.clone().unwrap_or_default()),
            client_phone: Some(case.client_phone.clone().unwrap_or_default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Dashboard counters from `GET /causas/stats/general`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStats {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "enSentencia", default)]
    pub in_judgment: u64,
    #[serde(rename = "audienciasMes", default)]
    pub hearings_this_month: u64,
}
