use crate::common::{self, StubEngine};
use actix_web::test;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_chat_when_fields_present_expect_engine_answer_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StubEngine::default();
    let questions = engine.questions.clone();
    let app = common::initialize_app(dir.path(), engine).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"question": "Who pays rent?", "documentId": "doc-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"answer": "You asked: Who pays rent?"}));
    assert_eq!(
        *questions.lock().unwrap(),
        [("Who pays rent?".to_owned(), "doc-1".to_owned())]
    );
}

#[actix_web::test]
async fn test_chat_when_document_id_missing_expect_bad_request_without_engine_call() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StubEngine::default();
    let questions = engine.questions.clone();
    let app = common::initialize_app(dir.path(), engine).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"question": "Who pays rent?"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Question and documentId are required."}));
    assert!(questions.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_chat_when_body_not_json_expect_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::initialize_app(dir.path(), StubEngine::default()).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .insert_header(("content-type", "application/json"))
        .set_payload("question=rent")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Question and documentId are required.");
}

#[actix_web::test]
async fn test_chat_when_engine_fails_with_detail_expect_detail_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StubEngine::failing(404, Some(json!({"detail": "Document ID not found."})));
    let app = common::initialize_app(dir.path(), engine).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"question": "Who pays rent?", "documentId": "gone"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "error": "Failed to get response from AI engine.",
            "detail": "Document ID not found."
        })
    );
}

#[actix_web::test]
async fn test_chat_when_engine_unreachable_expect_fallback_detail() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StubEngine::failing(502, None);
    let app = common::initialize_app(dir.path(), engine).await;
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"question": "Who pays rent?", "documentId": "doc-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "AI service is unavailable.");
}
