//! Cached, retried list queries against a mock backend.

mod common;

use common::{OfflineBackend, PagedBackend, TestContext, fast_policy, user_rows};
use livebet_business::resources::{Transactions, Users};
use livebet_business::{
    ApiError, Locale, PaginationMode, Resource, ResourceQuery, TableModel, TableOptions, TableState,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_users(ctx: &TestContext, count: usize) {
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(count),
        })
        .mount(&ctx.mock_server)
        .await;
}

#[tokio::test]
async fn test_second_page_of_sorted_users() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    mount_users(&ctx, 25).await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.change_page(2);
    let data = query.refresh().await;

    let model = TableModel::new(TableOptions {
        mode: PaginationMode::Server,
        ..TableOptions::default()
    });
    let columns = Users::columns(Locale::En);
    let view = model.view(&data, &columns);

    let TableState::Rows(rows) = &view.state else {
        panic!("expected rows, got {:?}", view.state);
    };
    let numbers: Vec<u64> = rows.iter().map(|r| r.number).collect();
    assert_eq!(numbers, (11..=20).collect::<Vec<_>>());
    assert_eq!(rows[0].row.amount, 15_000.0);
    assert_eq!(rows[9].row.amount, 6_000.0);

    let pagination = view.pagination.expect("pagination shown");
    assert_eq!(pagination.total_pages, 3);
    assert_eq!((pagination.from, pagination.to, pagination.total_items), (11, 20, 25));
}

#[tokio::test]
async fn test_page_size_change_requests_first_page() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .and(body_json(json!({
            "page": 1,
            "limit": 20,
            "filterBy": {},
            "sortBy": { "amount": -1 }
        })))
        .respond_with(PagedBackend {
            rows: user_rows(25),
        })
        .expect(1)
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .and(body_partial_json(json!({ "page": 3, "limit": 10 })))
        .respond_with(PagedBackend {
            rows: user_rows(25),
        })
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.change_page(3);
    let third = query.refresh().await;
    assert_eq!(third.rows().len(), 5);

    query.change_page_size(20);
    let first = query.refresh().await;

    assert_eq!(first.rows().len(), 20);
    assert_eq!(query.params().page, 1);
}

#[tokio::test]
async fn test_fresh_cache_is_not_refetched() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(3),
        })
        .expect(2)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.refresh().await;
    let cached = query.refresh().await;
    assert_eq!(cached.rows().len(), 3);

    ctx.clock.advance(chrono::Duration::minutes(14));
    query.refresh().await;

    ctx.clock.advance(chrono::Duration::minutes(1));
    query.refresh().await;
}

#[tokio::test]
async fn test_focus_regained_refetches_fresh_page_once() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(3),
        })
        .expect(2)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.refresh().await;
    query.refresh().await;

    query.on_focus_regained();
    let data = query.refresh().await;
    query.refresh().await;

    assert_eq!(data.rows().len(), 3);
}

#[tokio::test]
async fn test_unused_page_is_dropped_after_gc_time() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(25),
        })
        .expect(4)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.refresh().await;
    query.change_page(2);
    query.refresh().await;

    ctx.clock.advance(chrono::Duration::minutes(21));
    query.refresh().await;
    query.change_page(1);
    assert!(query.view().data.is_none());

    let back = query.refresh().await;
    assert_eq!(back.rows()[0].amount, 25_000.0);
}

#[tokio::test]
async fn test_reconnect_refetches_page_that_failed_offline() {
    let backend = OfflineBackend::new();
    backend.sign_in();

    let mut users =
        ResourceQuery::<Users>::new(backend.client.clone()).with_policy(fast_policy());
    let offline = users.refresh().await;
    assert!(matches!(offline.error.as_deref(), Some(message) if !message.is_empty()));
    assert!(backend.client.is_offline());

    let server = backend.start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(4),
        })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/transaction/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": { "data": [] }
        })))
        .mount(&server)
        .await;

    let still_failed = users.refresh().await;
    assert!(still_failed.error.is_some());

    let mut transactions = ResourceQuery::<Transactions>::new(backend.client.clone());
    transactions.refresh().await;
    assert!(!backend.client.is_offline());

    let recovered = users.refresh().await;
    assert!(recovered.error.is_none());
    assert_eq!(recovered.rows().len(), 4);
}

#[tokio::test]
async fn test_going_back_to_a_cached_page_is_served_from_cache() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(PagedBackend {
            rows: user_rows(25),
        })
        .expect(2)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    query.refresh().await;
    query.change_page(2);
    query.refresh().await;
    query.change_page(1);
    let back = query.refresh().await;

    assert_eq!(back.rows()[0].amount, 25_000.0);
}

#[tokio::test]
async fn test_server_errors_are_retried_three_times() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/transaction/list"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .expect(4)
        .mount(&ctx.mock_server)
        .await;

    let mut query =
        ResourceQuery::<Transactions>::new(ctx.client.clone()).with_policy(fast_policy());
    let data = query.refresh().await;

    assert_eq!(data.error.as_deref(), Some("db down"));
    assert!(data.data.is_none());
    assert!(!data.is_loading);
}

#[tokio::test]
async fn test_auth_errors_are_not_retried() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/transaction/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let mut query =
        ResourceQuery::<Transactions>::new(ctx.client.clone()).with_policy(fast_policy());
    let data = query.refresh().await;

    assert_eq!(data.error.as_deref(), Some("expired"));
}

#[tokio::test]
async fn test_recovers_after_transient_failure() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&ctx.mock_server)
        .await;
    mount_users(&ctx, 4).await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone()).with_policy(fast_policy());
    let data = query.refresh().await;

    assert!(data.error.is_none());
    assert_eq!(data.rows().len(), 4);
}

#[tokio::test]
async fn test_failed_envelope_renders_empty() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/user/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "status": 403, "code": "FORBIDDEN", "message": "no access" }
        })))
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    let data = query.refresh().await;
    let columns = Users::columns(Locale::En);
    let view = TableModel::default().view(&data, &columns);

    assert!(data.error.is_none());
    assert!(matches!(view.state, TableState::Empty));
}

#[tokio::test]
async fn test_logged_out_query_stays_idle() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    let data = query.refresh().await;

    assert!(data.data.is_none());
    assert!(!data.is_loading);
    assert!(data.error.is_none());
}

#[tokio::test]
async fn test_superseded_job_is_cancelled_and_discarded() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    mount_users(&ctx, 12).await;

    let mut query = ResourceQuery::<Users>::new(ctx.client.clone());
    let first = query.prepare().expect("first job");
    query.change_page(2);
    let second = query.prepare().expect("second job");

    let stale = first.run().await;
    assert_eq!(stale.result, Err(ApiError::Cancelled));
    assert!(!query.apply(stale));

    let fresh = second.run().await;
    assert!(query.apply(fresh));
    assert_eq!(query.view().rows().len(), 2);
}
