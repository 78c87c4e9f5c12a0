use dashboard::hooks::{
    use_badge_status, use_block_user, use_create_notification,
    use_report_status, use_unblock_user,
};
use payloads::requests::{
    BadgeStatusChange, BlockUser, CreateNotification, ReportStatus,
    ReportStatusChange, UnblockUser,
};
use payloads::{ReportId, UserId, VerificationId};
use serde_json::{Value, json};
use test_helpers::{failed_envelope, ok_envelope, spawn_app};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn block_user_posts_reason() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/admin/block-user"))
        .and(body_json(json!({"userId": 1, "reason": "Spam"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "User blocked",
            "data": null
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let block = use_block_user(app.client.clone(), app.reporter());
    let blocked = block
        .execute(BlockUser {
            user_id: UserId::from(1),
            reason: "Spam".into(),
        })
        .await;

    assert!(blocked);
    assert!(!block.is_loading());
    assert_eq!(block.last_message().as_deref(), Some("User blocked"));
    assert!(app.toasts.errors().is_empty());

    Ok(())
}

#[tokio::test]
async fn rejected_mutation_returns_false() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/admin/unblock-user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(failed_envelope("User is not blocked")),
        )
        .mount(&app.server)
        .await;

    let unblock = use_unblock_user(app.client.clone(), app.reporter());
    let unblocked = unblock
        .execute(UnblockUser {
            user_id: UserId::from(1),
        })
        .await;

    assert!(!unblocked);
    assert!(!unblock.is_loading());
    assert_eq!(unblock.last_error().as_deref(), Some("User is not blocked"));
    assert_eq!(app.toasts.errors(), vec!["User is not blocked"]);

    Ok(())
}

#[tokio::test]
async fn server_error_returns_false() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/report/4/mark-as"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let status = use_report_status(app.client.clone(), app.reporter());
    let changed = status
        .execute(ReportStatusChange::new(
            ReportId::from(4),
            ReportStatus::Resolved,
        ))
        .await;

    assert!(!changed);
    assert_eq!(
        app.toasts.errors(),
        vec!["Request failed with status code 500"]
    );

    Ok(())
}

#[tokio::test]
async fn report_status_is_patched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/report/4/mark-as"))
        .and(body_json(json!({"status": "UNDER_REVIEW"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(Value::Null)))
        .expect(1)
        .mount(&app.server)
        .await;

    let status = use_report_status(app.client.clone(), app.reporter());
    assert!(
        status
            .execute(ReportStatusChange::new(
                ReportId::from(4),
                ReportStatus::UnderReview,
            ))
            .await
    );

    Ok(())
}

#[tokio::test]
async fn badge_rejection_needs_reason() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/verify-user/8"))
        .and(body_json(json!({
            "status": "REJECTED",
            "rejectionReason": "Blurry document"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(Value::Null)))
        .expect(1)
        .mount(&app.server)
        .await;

    let badge = use_badge_status(app.client.clone(), app.reporter());

    let no_reason = badge
        .execute(BadgeStatusChange::reject(VerificationId::from(8), ""))
        .await;
    assert!(!no_reason);
    assert_eq!(
        app.toasts.errors(),
        vec!["A reason is required to reject a verification request"]
    );

    let rejected = badge
        .execute(BadgeStatusChange::reject(
            VerificationId::from(8),
            "Blurry document",
        ))
        .await;
    assert!(rejected);

    Ok(())
}

#[tokio::test]
async fn notification_schedule_is_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/admin/send-notifications"))
        .and(body_json(json!({
            "title": "Maintenance",
            "message": "Back soon",
            "scheduleFor": "2025-06-01T09:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(Value::Null)))
        .expect(1)
        .mount(&app.server)
        .await;

    let notify = use_create_notification(app.client.clone(), app.reporter());
    let sent = notify
        .execute(CreateNotification {
            title: "Maintenance".into(),
            message: "Back soon".into(),
            schedule_for: Some("2025-06-01T09:00:00Z".parse()?),
        })
        .await;

    assert!(sent);

    Ok(())
}

#[tokio::test]
async fn mutations_do_not_refetch_lists() -> anyhow::Result<()> {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/admin/block-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(Value::Null)))
        .mount(&app.server)
        .await;

    let block = use_block_user(app.client.clone(), app.reporter());
    block
        .execute(BlockUser {
            user_id: UserId::from(2),
            reason: "Fraud".into(),
        })
        .await;

    let requests = app.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/admin/block-user");

    Ok(())
}
