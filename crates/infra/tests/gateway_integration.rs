//! Endpoint and wire-format coverage for `HttpCaseGateway`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use casedesk_core::{CaseGateway, CredentialSource, IdentityApi};
use casedesk_domain::{
    CaseDeskError, CaseStatus, CaseUpdate, EventKind, NewCalendarEvent, NewCase, PasswordChange,
    ProfileUpdate,
};
use casedesk_infra::{ApiClient, ApiClientConfig, HttpCaseGateway};
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedToken;

#[async_trait]
impl CredentialSource for FixedToken {
    fn bearer_token(&self) -> Option<String> {
        Some("jwt".into())
    }

    async fn on_auth_rejected(&self, _attached: Option<&str>) {}
}

fn gateway(server: &MockServer) -> HttpCaseGateway {
    let config = ApiClientConfig {
        base_url: format!("{}/api/", server.uri()),
        timeout: Duration::from_secs(5),
        user_agent: "casedesk-tests".into(),
    };
    HttpCaseGateway::new(Arc::new(ApiClient::new(config, Arc::new(FixedToken)).unwrap()))
}

fn case_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "caratula": "Pérez c/ Gómez s/ daños",
        "nro_expediente": "123/2024",
        "juzgado": "Juzgado Civil 4",
        "fuero": "Civil",
        "estado": "Etapa Probatoria",
        "ultima_revision": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-02T10:00:00.000Z",
        "eventos": [
            { "id": "e1", "titulo": "Audiencia preliminar", "fecha": "2024-04-01T13:00:00.000Z", "tipo": "Audiencia" }
        ]
    })
}

#[tokio::test]
async fn search_sends_encoded_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/causas/search"))
        .and(query_param("q", "pérez & co"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c1", "caratula": "Pérez c/ Gómez", "nro_expediente": null },
            { "id": "c2", "caratula": "Pérez c/ Banco", "nro_expediente": "77/2023" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = gateway(&server).search_cases("pérez & co").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].file_number, "");
    assert_eq!(results[1].file_number, "77/2023");
}

#[tokio::test]
async fn case_detail_and_listing_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/causas/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("c1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/causas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([case_json("c1"), case_json("c2")])))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let case = gateway.get_case("c1").await.unwrap();
    assert_eq!(case.status, CaseStatus::Evidence);
    assert_eq!(case.events[0].kind, EventKind::Hearing);

    let cases = gateway.list_cases().await.unwrap();
    assert_eq!(cases.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["c1", "c2"]);
}

#[tokio::test]
async fn create_case_surfaces_validation_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/causas"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": 400,
            "message": ["caratula should not be empty", "fuero must be a string"],
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).create_case(&NewCase::default()).await.unwrap_err();
    assert_eq!(
        err,
        CaseDeskError::ValidationRejected(
            "caratula should not be empty; fuero must be a string".into()
        )
    );
    assert_eq!(err.to_string(), "caratula should not be empty; fuero must be a string");
}

#[tokio::test]
async fn stats_and_event_feeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/causas/stats/general"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "total": 12, "enSentencia": 3, "audienciasMes": 5 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/causas/eventos/proximos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "e9",
            "titulo": "Vence traslado",
            "fecha": "2024-04-05T15:00:00.000Z",
            "tipo": "Vencimiento",
            "causa": { "id": "c1", "caratula": "Pérez c/ Gómez" }
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/causas/eventos/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let stats = gateway.case_stats().await.unwrap();
    assert_eq!((stats.total, stats.in_judgment, stats.hearings_this_month), (12, 3, 5));

    let upcoming = gateway.upcoming_events().await.unwrap();
    assert_eq!(upcoming[0].kind, EventKind::Deadline);
    assert_eq!(upcoming[0].case_ref.as_ref().map(|c| c.id.as_str()), Some("c1"));

    assert!(gateway.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_and_delete_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/causas/c1/eventos"))
        .and(body_json(json!({
            "titulo": "Audiencia testimonial",
            "fecha": "2024-04-10T12:30:00Z",
            "tipo": "Audiencia",
            "descripcion": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "e2",
            "titulo": "Audiencia testimonial",
            "fecha": "2024-04-10T12:30:00.000Z",
            "tipo": "Audiencia"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/causas/eventos/e2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/causas/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let new_event = NewCalendarEvent {
        title: "Audiencia testimonial".into(),
        timestamp_utc: Utc.with_ymd_and_hms(2024, 4, 10, 12, 30, 0).unwrap(),
        kind: EventKind::Hearing,
        description: String::new(),
    };
    let created = gateway.create_event("c1", &new_event).await.unwrap();
    assert_eq!(created.id, "e2");

    gateway.delete_event("e2").await.unwrap();
    gateway.delete_case("c1").await.unwrap();
}

#[tokio::test]
async fn missing_case_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/causas/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Causa no encontrada" })),
        )
        .mount(&server)
        .await;

    let err = gateway(&server).get_case("nope").await.unwrap_err();
    assert_eq!(err, CaseDeskError::Remote { status: 404, message: "Causa no encontrada".into() });
}

#[tokio::test]
async fn update_case_patches_only_edited_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/causas/c1"))
        .and(header("authorization", "Bearer jwt"))
        .and(body_json(json!({ "estado": "Sentencia", "observaciones": "Sentencia favorable" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("c1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/causas/c2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": 400,
            "message": ["estado must be one of the following values: Inicio, Sentencia"],
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let edit = CaseUpdate {
        status: Some(CaseStatus::Judgment),
        notes: Some("Sentencia favorable".into()),
        ..Default::default()
    };
    gateway.update_case("c1", &edit).await.unwrap();

    let err = gateway.update_case("c2", &edit).await.unwrap_err();
    assert_eq!(
        err,
        CaseDeskError::ValidationRejected(
            "estado must be one of the following values: Inicio, Sentencia".into()
        )
    );
}

#[tokio::test]
async fn update_profile_patches_users_me() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer jwt"))
        .and(body_json(json!({ "nombre": "Ana María" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let update = ProfileUpdate { name: Some("Ana María".into()) };
    gateway(&server).update_profile(&update).await.unwrap();
}

/// Validates the password change endpoint.
///
/// Assertions:
/// - Only `currentPass` and `newPass` are sent
/// - A rejected current password surfaces as `ValidationRejected`
#[tokio::test]
async fn change_password_sends_current_and_new_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/me/password"))
        .and(body_json(json!({ "currentPass": "viejo1", "newPass": "secreto" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/me/password"))
        .and(body_json(json!({ "currentPass": "otro", "newPass": "secreto" })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "La contraseña actual es incorrecta" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    gateway
        .change_password(&PasswordChange::new("viejo1", "secreto", "secreto"))
        .await
        .unwrap();

    let err = gateway
        .change_password(&PasswordChange::new("otro", "secreto", "secreto"))
        .await
        .unwrap_err();
    assert_eq!(err, CaseDeskError::ValidationRejected("La contraseña actual es incorrecta".into()));
}
