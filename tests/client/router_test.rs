use crate::common::{self, StubRelay};
use clarity::client::router::{resolve, Router, View};

#[actix_web::test]
async fn test_resolve_document_paths() {
    let relay = StubRelay::processing();
    let (_dir, store) = common::store_with_uploads(&relay, 2).await;
    assert!(matches!(resolve("/documents/2", &store), View::Detail(doc) if doc.id == 2));
    assert!(matches!(resolve("/documents/2/", &store), View::Detail(doc) if doc.id == 2));
    assert_eq!(resolve("/documents/9", &store), View::NotFound);
    assert_eq!(resolve("/documents/abc", &store), View::NotFound);
    assert_eq!(resolve("/", &store), View::List);
    assert_eq!(resolve("/documents", &store), View::List);
    assert_eq!(resolve("/anything/else", &store), View::List);
}

#[actix_web::test]
async fn test_navigate_then_back_and_forward() {
    let relay = StubRelay::processing();
    let (_dir, store) = common::store_with_uploads(&relay, 2).await;
    let mut router = Router::new("/", &store);
    assert_eq!(router.view(), &View::List);

    router.navigate_to_document(1, &store);
    assert_eq!(router.current_path(), "/documents/1");
    assert!(matches!(router.view(), View::Detail(doc) if doc.id == 1));

    assert_eq!(router.back(&store), &View::List);
    assert!(matches!(router.forward(&store), View::Detail(doc) if doc.id == 1));

    router.go_back_to_list(&store);
    assert_eq!(router.current_path(), "/");
    assert!(matches!(router.back(&store), View::Detail(doc) if doc.id == 1));
}

#[actix_web::test]
async fn test_refresh_after_delete_expect_not_found() {
    let relay = StubRelay::processing();
    let (_dir, mut store) = common::store_with_uploads(&relay, 1).await;
    let mut router = Router::new("/documents/1", &store);
    assert!(matches!(router.view(), View::Detail(_)));
    store.delete(1).unwrap();
    assert_eq!(router.refresh(&store), &View::NotFound);
}
