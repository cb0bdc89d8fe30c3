//! Adverts holder: listing, stale responses, advert chain and form rules.

mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{advert_json, context_for, eventually, list_json, logged_in, logged_out, profile_json, single_json};
use marketlog::api::AdvertQuery;
use marketlog::ui::forms::AdvertFormIntent;
use marketlog::ui::settled;
use marketlog::RequestState;

#[tokio::test]
async fn test_listing_goes_through_loading() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(
            MockResponse::json(&list_json(vec![advert_json(1, "adv-1", "Tractor")], 1, 1, 1))
                .with_delay(100),
        )
        .await;

    let context = context_for(&backend, logged_out());
    let holder = context.adverts_holder();
    let slot = holder.adverts();
    assert!(holder.adverts_state().is_idle());

    holder.load_adverts(AdvertQuery::first_page(10));
    assert!(eventually(Duration::from_secs(1), || slot.borrow().is_loading()).await);

    let state = settled(&mut holder.adverts()).await;
    assert_eq!(state.value().unwrap().data[0].document_id, "adv-1");
}

#[tokio::test]
async fn test_latest_request_wins() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(
            MockResponse::json(&single_json(advert_json(1, "adv-1", "First"))).with_delay(300),
        )
        .await;
    backend
        .enqueue_response(MockResponse::json(&single_json(advert_json(2, "adv-2", "Second"))))
        .await;

    let context = context_for(&backend, logged_out());
    let holder = context.adverts_holder();

    holder.load_advert("adv-1");
    // Make sure the slow request reaches the server first.
    let mut waited = 0;
    while backend.captured_requests().await.is_empty() && waited < 100 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        waited += 1;
    }
    holder.load_advert("adv-2");

    let state = settled(&mut holder.advert()).await;
    assert_eq!(state.value().unwrap().title, "Second");

    // The slow response arrives later and is dropped.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let mut slot = holder.advert();
    assert_eq!(slot.borrow_and_update().value().unwrap().title, "Second");
}

#[tokio::test]
async fn test_create_advert_links_to_profile() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::status(201, &single_json(advert_json(5, "adv-5", "Plough"))))
        .await;
    backend
        .enqueue_response(MockResponse::json(&single_json(profile_json("prof-1"))))
        .await;
    backend
        .enqueue_response(MockResponse::json(&list_json(vec![advert_json(5, "adv-5", "Plough")], 1, 1, 1)))
        .await;

    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();
    holder.edit_form(AdvertFormIntent::Title("Plough".to_string()));
    holder.edit_form(AdvertFormIntent::Price("450,50".to_string()));
    holder.edit_form(AdvertFormIntent::Category(Some("cat-1".to_string())));

    holder.create_advert("prof-1").unwrap();
    let outcome = settled(&mut holder.status().outcome()).await;
    assert_eq!(outcome, RequestState::Success("Advert created".to_string()));
    assert_eq!(holder.form_state().title, "");

    let list = settled(&mut holder.adverts()).await;
    assert_eq!(list.value().unwrap().data.len(), 1);

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].json()["data"]["price"], 450.5);
    assert_eq!(requests[1].path, "/api/profiles/prof-1");
    assert_eq!(
        requests[1].json(),
        serde_json::json!({"data": {"adverts": {"connect": ["adv-5"]}}})
    );
    assert_eq!(requests[2].path, "/api/adverts");
}

#[tokio::test]
async fn test_negative_price_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();
    holder.edit_form(AdvertFormIntent::Title("Plough".to_string()));
    holder.edit_form(AdvertFormIntent::Price("-3".to_string()));

    let errors = holder.create_advert("prof-1").unwrap_err();
    assert!(errors.contains_key("price"));
    assert!(errors.contains_key("category"));
    assert!(!errors.contains_key("title"));
    assert_eq!(holder.form_state().errors, errors);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_delete_reloads_last_query() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json(&list_json(vec![], 2, 2, 11))).await;
    backend.enqueue_response(MockResponse::empty(204)).await;
    backend.enqueue_response(MockResponse::json(&list_json(vec![], 2, 2, 10))).await;

    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();
    let query = AdvertQuery {
        page: 2,
        ..AdvertQuery::first_page(10)
    };
    holder.load_adverts(query.clone());
    settled(&mut holder.adverts()).await;
    assert_eq!(holder.current_query(), query);

    holder.delete_advert("adv-1");
    let outcome = settled(&mut holder.status().outcome()).await;
    assert_eq!(outcome, RequestState::Success("Advert deleted".to_string()));

    let total = |h: &marketlog::ui::AdvertsHolder| {
        h.adverts_state().value().map(|page| page.meta.pagination.total)
    };
    assert!(eventually(Duration::from_secs(1), || total(&holder) == Some(10)).await);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 3);
    assert!(requests[2].decoded_query().contains("pagination[page]=2"));
}

#[tokio::test]
async fn test_categories_error_message() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::error(403, "Forbidden")).await;

    let context = context_for(&backend, logged_out());
    let holder = context.adverts_holder();
    holder.load_categories();

    let state = settled(&mut holder.categories()).await;
    assert_eq!(
        state.error_message(),
        Some("Forbidden: you do not have permission to perform this action")
    );
}

#[tokio::test]
async fn test_busy_until_latest_action_finishes() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::empty(204).with_delay(50)).await;
    backend.enqueue_response(MockResponse::empty(204).with_delay(800)).await;
    backend.enqueue_response(MockResponse::json(&list_json(vec![], 1, 1, 0))).await;
    backend.enqueue_response(MockResponse::json(&list_json(vec![], 1, 1, 0))).await;

    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();

    holder.delete_advert("adv-1");
    let mut waited = 0;
    while backend.captured_requests().await.is_empty() && waited < 100 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        waited += 1;
    }
    holder.delete_advert("adv-2");

    // The first delete is done and has reloaded; the second is still pending.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(holder.status().is_busy());
    assert!(holder.status().current_outcome().is_loading());
    assert_eq!(holder.status().take_message(), None);

    let outcome = settled(&mut holder.status().outcome()).await;
    assert_eq!(outcome, RequestState::Success("Advert deleted".to_string()));
    assert!(!holder.status().is_busy());

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].path, "/api/adverts/adv-1");
    assert_eq!(requests[1].path, "/api/adverts/adv-2");
}

#[tokio::test]
async fn test_update_advert_publishes_detail_and_reloads() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(&list_json(vec![advert_json(1, "adv-1", "Tractor")], 1, 1, 1)))
        .await;
    backend
        .enqueue_response(MockResponse::json(&single_json(advert_json(1, "adv-1", "Red tractor"))))
        .await;
    backend
        .enqueue_response(MockResponse::json(&list_json(vec![advert_json(1, "adv-1", "Red tractor")], 1, 1, 1)))
        .await;

    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();
    holder.load_adverts(AdvertQuery {
        search: Some("tractor".to_string()),
        ..AdvertQuery::first_page(10)
    });
    settled(&mut holder.adverts()).await;

    holder.edit_form(AdvertFormIntent::Title("Red tractor".to_string()));
    holder.edit_form(AdvertFormIntent::Price("1200".to_string()));
    holder.edit_form(AdvertFormIntent::Category(Some("cat-1".to_string())));
    holder.update_advert("adv-1").unwrap();

    let outcome = settled(&mut holder.status().outcome()).await;
    assert_eq!(outcome, RequestState::Success("Advert \"Red tractor\" updated".to_string()));
    let detail = settled(&mut holder.advert()).await;
    assert_eq!(detail.value().unwrap().title, "Red tractor");

    let title = |h: &marketlog::ui::AdvertsHolder| {
        h.adverts_state()
            .value()
            .and_then(|page| page.data.first().map(|advert| advert.title.clone()))
    };
    assert!(eventually(Duration::from_secs(1), || title(&holder).as_deref() == Some("Red tractor")).await);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!((requests[1].method.as_str(), requests[1].path.as_str()), ("PUT", "/api/adverts/adv-1"));
    assert_eq!(
        requests[1].json(),
        serde_json::json!({"data": {"title": "Red tractor", "price": 1200.0, "category": "cat-1"}})
    );
    assert_eq!((requests[2].method.as_str(), requests[2].path.as_str()), ("GET", "/api/adverts"));
    assert!(requests[2].decoded_query().contains("filters[title][$containsi]=tractor"));
}

#[tokio::test]
async fn test_update_advert_validates_locally() {
    let backend = MockBackend::start().await;
    let context = context_for(&backend, logged_in("jwt"));
    let holder = context.adverts_holder();
    holder.edit_form(AdvertFormIntent::Price("cheap".to_string()));
    holder.edit_form(AdvertFormIntent::Category(Some("cat-1".to_string())));

    let errors = holder.update_advert("adv-1").unwrap_err();
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("price"));
    assert!(holder.status().current_outcome().is_idle());
    assert!(holder.advert().borrow().is_idle());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(backend.captured_requests().await.is_empty());
}
