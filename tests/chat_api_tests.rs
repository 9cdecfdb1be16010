mod common;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use loan_docs_server::chat::handlers;
use loan_docs_server::chat::models::FileContent;
use loan_docs_server::AppState;

fn state(dir: &std::path::Path) -> web::Data<AppState> {
    web::Data::new(AppState::with_service(Arc::new(
        common::service_with_assets(dir),
    )))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .service(web::scope("/api").configure(handlers::config)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_chat_flow_returns_document() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(dir.path());
    let app = app!(state);

    let mut body = Value::Null;
    for text in ["/start", "/carta", "Mario Rossi", "5000", "36", "", ""] {
        let req = test::TestRequest::post()
            .uri("/api/chat/42/messages")
            .set_json(json!({ "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        body = test::read_body_json(resp).await;
    }

    assert_eq!(body["chat_id"], "42");
    assert_eq!(body["state"], "choosing_document");
    assert_eq!(body["reply"]["keyboard"][0], "/contratto");

    let file: FileContent = serde_json::from_value(body["document"].clone()).unwrap();
    assert_eq!(file.metadata.filename, "Carta_Mario Rossi.pdf");
    assert_eq!(file.metadata.mime_type, "application/pdf");
    let pdf = file.decode_data().unwrap();
    assert_eq!(pdf.len(), file.metadata.size_bytes);
    assert!(pdf.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn test_chat_sessions_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(dir.path());
    let app = app!(state);

    for (chat, text) in [("a", "/contratto"), ("b", "/garanzia"), ("a", "Anna")] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/chat/{}/messages", chat))
            .set_json(json!({ "text": text }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/chat/b/messages")
        .set_json(json!({ "text": "Luca Verdi" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["document"]["metadata"]["filename"], "Garanzia_Luca Verdi.pdf");
    assert_eq!(state.sessions.len(), 2);
}

#[actix_web::test]
async fn test_delete_session() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(dir.path());
    let app = app!(state);

    let req = test::TestRequest::delete().uri("/api/chat/7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NotFound");

    let req = test::TestRequest::post()
        .uri("/api/chat/7/messages")
        .set_json(json!({ "text": "/carta" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/api/chat/7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(state.sessions.is_empty());
}

#[actix_web::test]
async fn test_generate_document_returns_pdf() {
    let dir = tempfile::tempdir().unwrap();
    common::write_assets(dir.path());
    let app = app!(state(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({
            "kind": "contract",
            "client_name": "Mario Rossi",
            "amount": "5000",
            "duration_months": 36,
            "tan": "7.86"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Contratto_Mario Rossi.pdf"));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn test_generate_document_rejects_missing_terms() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({ "kind": "card_letter", "client_name": "Mario Rossi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BadRequest");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("[amount]"));
    assert!(message.contains("[duration_months]"));
}

#[actix_web::test]
async fn test_generate_document_accepts_zero_amount() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({
            "kind": "card_letter",
            "client_name": "Mario Rossi",
            "amount": "0",
            "duration_months": 12
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_generate_document_rejects_unprintable_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({ "kind": "guarantee_letter", "client_name": "Иван Петров" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
