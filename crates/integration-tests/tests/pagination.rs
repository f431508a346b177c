//! Paged list screens against a 23-product catalogue.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use stampdesk_console::api::ops;
use stampdesk_console::screens::entities::{BusinessListScreen, ProductListScreen};
use stampdesk_console::{Navigator, Route};
use stampdesk_integration_tests::MockServer;

#[tokio::test]
async fn test_walks_pages_within_bounds() {
    let server = MockServer::with_products(23).await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::ProductList);
    let mut screen = ProductListScreen::new(10);

    screen.load(&client, &mut nav).await;
    let controls = screen.controls().unwrap();
    assert_eq!((controls.page, controls.total_pages, controls.total), (1, 3, 23));
    assert!(!controls.previous_enabled);
    assert!(controls.next_enabled);

    // Previous on page 1 is a no-op.
    screen.previous(&client, &mut nav).await;
    assert_eq!(screen.request().page(), 1);

    screen.next(&client, &mut nav).await;
    screen.next(&client, &mut nav).await;
    let page = screen.state().value().unwrap();
    assert_eq!(page.page(), 3);
    assert_eq!(page.items().len(), 3);
    assert_eq!(page.items()[0].name, "Product 21");
    assert!(!screen.controls().unwrap().next_enabled);

    screen.next(&client, &mut nav).await;
    assert_eq!(screen.request().page(), 3);

    for request in server.requests().iter().filter(|r| r.path == "/api/product/list") {
        let query = request.query.as_deref().unwrap();
        assert!(query.starts_with("page="), "{query}");
        assert!(query.ends_with("&perpage=10"), "{query}");
    }
}

#[tokio::test]
async fn test_every_page_respects_page_size() {
    let server = MockServer::with_products(23).await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::ProductList);
    let mut screen = ProductListScreen::new(7);

    for page in 1..=4 {
        screen.go_to(page, &client, &mut nav).await;
        let loaded = screen.state().value().unwrap();
        assert!(loaded.page() >= 1);
        assert!(loaded.items().len() <= loaded.page_size() as usize);
    }
    assert_eq!(screen.state().value().unwrap().items().len(), 2);
}

#[tokio::test]
async fn test_stale_page_is_discarded() {
    let server = MockServer::with_products(23).await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::ProductList);
    let mut screen = ProductListScreen::new(10);

    // The user clicks page 2 and then page 3 before page 2 answers.
    let slow = screen.begin(2);
    let fast = screen.begin(3);

    let fast_result = client.query::<ops::ListProducts>(fast).await;
    assert!(screen.apply(fast, fast_result, &mut nav));

    let slow_result = client.query::<ops::ListProducts>(slow).await;
    assert!(!screen.apply(slow, slow_result, &mut nav));

    assert_eq!(screen.state().value().unwrap().page(), 3);
}

#[tokio::test]
async fn test_business_list_reads_flat_pagination() {
    let server = MockServer::start().await;
    let client = server.signed_in_client().await;
    let mut nav = Navigator::new(Route::BusinessList);
    let mut screen = BusinessListScreen::new(10);

    screen.load(&client, &mut nav).await;
    let page = screen.state().value().unwrap();
    assert_eq!(page.total(), 1);
    assert_eq!(page.items()[0].name, "Acme");
    assert_eq!(page.items()[0].tax_code.as_deref(), Some("0101234567"));
}
