//! Integration tests for the service wire format
//!
//! Payloads below mirror what the case-management service actually sends.

use casedesk_domain::{
    CalendarEvent, Case, CaseDeskError, CaseStats, CaseStatus, CaseSummary, Config, EventKind,
    LoginResponse, NewCalendarEvent, NewCase, UserIdentity,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

// ============================================================================
// Cases
// ============================================================================

/// Full case record with nested documents and events
///
/// Scenario: detail page loads a case under evidence stage
#[test]
fn test_case_detail_deserializes() {
    let payload = json!({
        "id": "c-42",
        "caratula": "Pérez c/ Gómez s/ daños y perjuicios",
        "nro_expediente": "CIV 1234/2024",
        "juzgado": "Juzgado Nacional Civil 4",
        "fuero": "Civil",
        "estado": "Etapa Probatoria",
        "observaciones": "Pericia contable pendiente",
        "ultima_revision": "2024-03-01T12:00:00.000Z",
        "updatedAt": "2024-03-02T09:30:00.000Z",
        "documentos": [
            { "id": "d1", "nombre_archivo": "demanda.pdf", "tipo": "pdf", "fecha_carga": "2024-02-01T10:00:00Z" }
        ],
        "eventos": [
            { "id": "e1", "titulo": "Audiencia preliminar", "fecha": "2024-03-31T23:45:00Z", "tipo": "Audiencia" }
        ]
    });

    let case: Case = serde_json::from_value(payload).unwrap();

    assert_eq!(case.title, "Pérez c/ Gómez s/ daños y perjuicios");
    assert_eq!(case.status, CaseStatus::Evidence);
    assert_eq!(case.client_phone, None);
    assert_eq!(case.documents.len(), 1);
    assert_eq!(case.events[0].kind, EventKind::Hearing);
    assert_eq!(case.events[0].timestamp_utc, Utc.with_ymd_and_hms(2024, 3, 31, 23, 45, 0).unwrap());
    assert_eq!(case.summary().file_number, "CIV 1234/2024");
}

/// Search entries with a missing or null file number fall back to empty
#[test]
fn test_case_summary_missing_file_number() {
    let items: Vec<CaseSummary> = serde_json::from_value(json!([
        { "id": "a", "caratula": "Rodríguez s/ sucesión" },
        { "id": "b", "caratula": "Banco c/ López", "nro_expediente": null },
        { "id": "c", "caratula": "Fisco c/ Martínez", "nro_expediente": "F-77" }
    ]))
    .unwrap();

    assert_eq!(items[0].file_number, "");
    assert_eq!(items[1].file_number, "");
    assert_eq!(items[2].file_number, "F-77");
}

#[test]
fn test_new_case_serializes_service_names() {
    let new_case = NewCase {
        title: "Gómez c/ ART".into(),
        file_number: "LAB 9/2024".into(),
        court: "Juzgado Laboral 2".into(),
        jurisdiction: "Laboral".into(),
        ..NewCase::default()
    };

    let value = serde_json::to_value(&new_case).unwrap();
    assert_eq!(value["caratula"], "Gómez c/ ART");
    assert_eq!(value["nro_expediente"], "LAB 9/2024");
    assert_eq!(value["fuero"], "Laboral");
    assert_eq!(value["telefono_cliente"], "");
}

#[test]
fn test_stats_deserialize() {
    let stats: CaseStats =
        serde_json::from_value(json!({ "total": 12, "enSentencia": 3, "audienciasMes": 5 })).unwrap();
    assert_eq!(stats, CaseStats { total: 12, in_judgment: 3, hearings_this_month: 5 });
}

// ============================================================================
// Events, identity, login
// ============================================================================

/// Upcoming-deadline entries embed their owning case
#[test]
fn test_upcoming_event_with_case_ref() {
    let event: CalendarEvent = serde_json::from_value(json!({
        "id": "e9",
        "titulo": "Contestar traslado",
        "fecha": "2024-04-05T15:00:00Z",
        "tipo": "Vencimiento",
        "causa": { "id": "c-42", "caratula": "Pérez c/ Gómez" }
    }))
    .unwrap();

    assert_eq!(event.kind, EventKind::Deadline);
    assert_eq!(event.case_ref.as_ref().map(|c| c.id.as_str()), Some("c-42"));
    assert_eq!(event.description, None);
}

#[test]
fn test_new_event_serializes_iso_utc() {
    let event = NewCalendarEvent {
        title: "Audiencia testimonial".into(),
        timestamp_utc: Utc.with_ymd_and_hms(2024, 5, 2, 13, 0, 0).unwrap(),
        kind: EventKind::Procedure,
        description: String::new(),
    };

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["fecha"], "2024-05-02T13:00:00Z");
    assert_eq!(value["tipo"], "Trámite");
}

#[test]
fn test_identity_and_login_payloads() {
    let user: UserIdentity =
        serde_json::from_value(json!({ "id": "u1", "email": "ana@estudio.com", "nombre": "Ana", "role": "admin" }))
            .unwrap();
    assert_eq!(user.display_name(), "Ana");

    let login: LoginResponse = serde_json::from_value(json!({ "access_token": "jwt" })).unwrap();
    assert_eq!(login.access_token, "jwt");
}

// ============================================================================
// Errors and configuration
// ============================================================================

#[test]
fn test_error_serializes_tagged() {
    let value = serde_json::to_value(CaseDeskError::AuthExpired("token rejected".into())).unwrap();
    assert_eq!(value, json!({ "type": "AuthExpired", "message": "token rejected" }));
}

/// Partial config files keep defaults for everything they omit
#[test]
fn test_partial_config_keeps_defaults() {
    let config: Config = serde_json::from_value(json!({ "api": { "base_url": "https://casedesk.example/api" } }))
        .unwrap();

    assert_eq!(config.api.base_url, "https://casedesk.example/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.search.debounce_ms, 300);
    assert_eq!(config.search.min_chars, 2);
    assert_eq!(config.session.min_loading_ms, 1500);
    assert_eq!(config.confirmation.window_ms, 4000);
}
