use payloads::{ClientError, QueryParameters, endpoints};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use test_helpers::{
    TEST_TOKEN, assert_error_message, assert_status_code, failed_envelope,
    list_data, ok_envelope, spawn_app, spawn_app_with_token,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn attaches_bearer_token() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({"totalUsers": 3}))),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let stats = app.client.dashboard_stats().await?;
    assert_eq!(stats.total_users, Some(3));

    Ok(())
}

#[tokio::test]
async fn omits_authorization_without_token() -> anyhow::Result<()> {
    let app = spawn_app_with_token(None).await;
    Mock::given(method("GET"))
        .and(path("/global/config"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({"maintenance": false}))),
        )
        .mount(&app.server)
        .await;

    app.client.app_config().await?;

    let requests = app.requests_to("/global/config").await;
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));

    Ok(())
}

#[tokio::test]
async fn unauthorized_ends_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "jwt expired"
        })))
        .mount(&app.server)
        .await;

    let result: Result<payloads::Page<Value>, _> = app
        .client
        .list(&endpoints::USERS, &QueryParameters::default())
        .await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(app.token(), None);
    assert_eq!(app.navigator.redirects(), vec!["/auth/login"]);

    Ok(())
}

#[tokio::test]
async fn unauthorized_with_truncated_body_ends_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 401 Unauthorized\r\n\
                      Content-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n{\"succ",
                )
                .await;
            // Closing here leaves the body short of its declared length.
        }
    });
    let client = dashboard::Config {
        backend_url: format!("http://{address}"),
        ..dashboard::Config::default()
    }
    .build_client(
        std::sync::Arc::new(app.tokens.clone()),
        std::sync::Arc::new(app.navigator.clone()),
    )?;

    let result = client.dashboard_stats().await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(app.token(), None);
    assert_eq!(app.navigator.redirects(), vec!["/auth/login"]);

    Ok(())
}

#[tokio::test]
async fn server_errors_carry_server_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/order/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Order not found"
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/report/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let order: Result<Option<Value>, _> =
        app.client.detail(&endpoints::ORDER, &9).await;
    assert_error_message(order, "Order not found");

    let report: Result<Option<Value>, _> =
        app.client.detail(&endpoints::REPORT, &9).await;
    assert_error_message(report, "Request failed with status code 500");

    let order: Result<Option<Value>, _> =
        app.client.detail(&endpoints::ORDER, &9).await;
    assert_status_code(order, StatusCode::NOT_FOUND);

    // Neither is a session problem.
    assert_eq!(app.token().as_deref(), Some(TEST_TOKEN));
    assert!(app.navigator.redirects().is_empty());

    Ok(())
}

#[tokio::test]
async fn rejected_envelope_uses_message_or_fallback() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(failed_envelope("X")),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false})),
        )
        .mount(&app.server)
        .await;

    let users: Result<payloads::Page<Value>, _> = app
        .client
        .list(&endpoints::USERS, &QueryParameters::default())
        .await;
    assert_error_message(users, "X");

    let orders: Result<payloads::Page<Value>, _> = app
        .client
        .list(&endpoints::ORDERS, &QueryParameters::default())
        .await;
    assert_error_message(orders, "Something went wrong, Please try again!");

    Ok(())
}

#[tokio::test]
async fn network_failure_has_a_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let unreachable = dashboard::Config {
        backend_url: "http://127.0.0.1:9".to_string(),
        ..dashboard::Config::default()
    }
    .build_client(
        std::sync::Arc::new(app.tokens.clone()),
        std::sync::Arc::new(app.navigator.clone()),
    )?;

    let result = unreachable.dashboard_stats().await;
    match result {
        Err(ClientError::Network(message)) => assert!(!message.is_empty()),
        other => panic!("Expected a network error, got {other:?}"),
    }
    assert!(app.navigator.redirects().is_empty());

    Ok(())
}

#[tokio::test]
async fn list_queries_skip_empty_values() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(
            list_data("orders", vec![], 0, 0),
        )))
        .mount(&app.server)
        .await;

    let params = QueryParameters::new(2, 20)
        .search("")
        .filter("startDate", "2025-01-01")
        .filter("endDate", "");
    let _: payloads::Page<Value> =
        app.client.list(&endpoints::ORDERS, &params).await?;

    let requests = app.requests_to("/admin/orders").await;
    assert_eq!(requests[0].url.query(), Some("page=2&limit=20&startDate=2025-01-01"));

    Ok(())
}
