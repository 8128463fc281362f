use std::io::Cursor;

use crate::common::{self, StubRelay};
use clarity::client::browse::{run_session, Session};
use clarity::client::detail::Delivery;
use clarity::client::router::View;
use url::Url;

#[actix_web::test]
async fn test_session_opens_asks_and_returns_to_list() {
    let relay = StubRelay::processing();
    let (_dir, store) = common::store_with_uploads(&relay, 2).await;
    let backend = Url::parse("http://localhost:5000").unwrap();
    let mut session = Session::new(store, &relay, backend, "/");
    let input = Cursor::new("open 2\ntoggle 1\nask Who pays rent?\nback\nforward\n");
    let mut out = Vec::new();
    run_session(&mut session, input, &mut out).await.unwrap();

    assert!(matches!(session.view(), View::Detail(doc) if doc.id == 2));
    let detail = session.detail().unwrap();
    assert_eq!(detail.messages().len(), 1, "transcript resets after leaving");

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("[/documents/2]"));
    assert!(printed.contains("you> Who pays rent?"));
    assert!(printed.contains("ai> You asked: Who pays rent?"));
    assert!(printed.contains("  [1] v Parties"));
}

#[actix_web::test]
async fn test_session_keeps_transcript_while_document_open() {
    let relay = StubRelay::processing();
    let (_dir, store) = common::store_with_uploads(&relay, 1).await;
    let backend = Url::parse("http://localhost:5000").unwrap();
    let mut session = Session::new(store, &relay, backend, "/documents/1");
    let input = Cursor::new("ask first\nsearch nothing\nask second\n");
    run_session(&mut session, input, &mut Vec::new()).await.unwrap();

    let messages = session.detail().unwrap().messages();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|message| message.status == Delivery::Delivered));
}

#[actix_web::test]
async fn test_session_at_unknown_document_shows_not_found() {
    let relay = StubRelay::processing();
    let (_dir, store) = common::empty_store();
    let backend = Url::parse("http://localhost:5000").unwrap();
    let mut session = Session::new(store, &relay, backend, "/documents/7");
    let mut out = Vec::new();
    run_session(&mut session, Cursor::new("ask anything\nquit\nopen 1\n"), &mut out)
        .await
        .unwrap();

    assert_eq!(session.view(), &View::NotFound);
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Document not found"));
    assert!(printed.contains("Open a document before asking about it."));
}
