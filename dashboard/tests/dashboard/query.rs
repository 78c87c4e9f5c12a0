use dashboard::hooks::{use_query, use_users};
use payloads::{ClientError, Page, Pagination, QueryOverrides, QueryParameters};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use test_helpers::{failed_envelope, list_data, mock, ok_envelope, spawn_app};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

fn users_page(
    items: Vec<Value>,
    total: u64,
    total_pages: u64,
) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(ok_envelope(list_data(
        "users",
        items,
        total,
        total_pages,
    )))
}

#[tokio::test]
async fn first_fetch_uses_initial_params() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .and(query_param("search", "jane"))
        .respond_with(users_page(vec![mock::jane_doe()], 1, 1))
        .expect(1)
        .mount(&app.server)
        .await;

    let users = use_users(
        app.client.clone(),
        QueryParameters::new(1, 20).search("jane"),
        app.reporter(),
    )
    .await;

    let state = users.snapshot();
    assert_eq!(state.items, vec![mock::jane_doe()]);
    assert_eq!(state.items[0]["fullName"], "Jane Doe");
    assert_eq!(users.total_items(), 1);
    assert_eq!(users.total_pages(), 1);
    assert!(!state.is_loading);
    assert!(app.toasts.errors().is_empty());

    Ok(())
}

#[tokio::test]
async fn empty_filters_are_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("search"))
        .respond_with(users_page(mock::users(), 2, 1))
        .expect(1)
        .mount(&app.server)
        .await;

    let users = use_users(
        app.client.clone(),
        QueryParameters::default().filter("status", ""),
        app.reporter(),
    )
    .await;
    assert_eq!(users.items().len(), 2);

    Ok(())
}

#[tokio::test]
async fn refetches_only_when_params_change() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(users_page(mock::users(), 2, 1))
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;

    // Same values, freshly built: no fetch.
    assert!(!users.set_params(QueryParameters::new(1, 20)).await);
    assert!(!users.set_search("").await);
    assert_eq!(app.requests_to("/admin/users").await.len(), 1);

    assert!(users.set_page(2).await);
    assert!(users.set_filter("status", "active").await);
    let requests = app.requests_to("/admin/users").await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[2].url.query(), Some("page=2&limit=20&status=active"));

    Ok(())
}

#[tokio::test]
async fn refetch_overrides_are_merged_per_key() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(users_page(mock::users(), 2, 1))
        .mount(&app.server)
        .await;

    let users = use_users(
        app.client.clone(),
        QueryParameters::new(1, 10)
            .search("ja")
            .filter("status", "active"),
        app.reporter(),
    )
    .await;

    users.refetch(QueryOverrides::default().page(3)).await;

    let requests = app.requests_to("/admin/users").await;
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].url.query(),
        Some("page=3&limit=10&search=ja&status=active")
    );
    // Overrides are for one call only.
    assert_eq!(users.params().current_page(), 1);

    Ok(())
}

#[tokio::test]
async fn refetch_is_idempotent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(users_page(mock::users(), 2, 1))
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;
    let before = users.snapshot();

    users.refetch(QueryOverrides::default()).await;
    users.refetch(QueryOverrides::default()).await;

    assert_eq!(users.snapshot(), before);
    assert_eq!(app.requests_to("/admin/users").await.len(), 3);

    Ok(())
}

#[tokio::test]
async fn latest_request_wins() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "1"))
        .respond_with(users_page(vec![mock::jane_doe()], 2, 2))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "1"))
        .respond_with(
            users_page(vec![mock::john_smith()], 2, 2)
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "2"))
        .respond_with(users_page(mock::users(), 4, 2))
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;

    // A (slow) is issued before B (fast); A resolves last and is dropped.
    tokio::join!(
        users.refetch(QueryOverrides::default()),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            users.refetch(QueryOverrides::default().page(2)).await;
        },
    );

    assert_eq!(users.items(), mock::users());
    assert_eq!(users.total_items(), 4);
    assert!(!users.is_loading());

    Ok(())
}

#[tokio::test]
async fn loading_spans_the_request() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(
            users_page(mock::users(), 2, 1).set_delay(Duration::from_millis(200)),
        )
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;
    assert!(!users.is_loading());

    let mut states = users.subscribe();
    let (_, was_loading) = tokio::join!(
        users.refetch(QueryOverrides::default()),
        async move {
            states.changed().await.ok();
            states.borrow_and_update().is_loading
        },
    );
    assert!(was_loading);
    assert!(!users.is_loading());

    Ok(())
}

#[tokio::test]
async fn failure_leaves_state_untouched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(users_page(mock::users(), 2, 1))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_envelope("X")))
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;
    let before = users.snapshot();

    users.refetch(QueryOverrides::default()).await;

    let after = users.snapshot();
    assert_eq!(after.items, before.items);
    assert_eq!(after.pagination, before.pagination);
    assert!(!after.is_loading);
    assert_eq!(app.toasts.errors(), vec!["X"]);

    Ok(())
}

#[tokio::test]
async fn unauthorized_redirects_without_toast() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    let users =
        use_users(app.client.clone(), QueryParameters::default(), app.reporter())
            .await;

    assert!(users.items().is_empty());
    assert!(!users.is_loading());
    assert_eq!(app.token(), None);
    assert_eq!(app.navigator.redirects(), vec!["/auth/login"]);
    assert!(app.toasts.errors().is_empty());

    Ok(())
}

#[tokio::test]
async fn custom_fetch_functions() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let hook = use_query(
        "numbers",
        QueryParameters::new(1, 2),
        move |params: QueryParameters| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if params.current_page() > 1 {
                    return Err(ClientError::Network("offline".into()));
                }
                Ok(Page {
                    items: vec![json!(1), json!(2)],
                    pagination: Pagination { total: 4, total_pages: 2 },
                })
            }
        },
        app.reporter(),
    )
    .await;
    assert_eq!(hook.items(), vec![json!(1), json!(2)]);

    hook.set_page(2).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(hook.items(), vec![json!(1), json!(2)]);
    assert_eq!(hook.params().current_page(), 2);
    assert_eq!(app.toasts.errors(), vec!["offline"]);

    Ok(())
}
