/*
[INPUT]:  Mock /me responses and focus notifications
[OUTPUT]: Test results for status polling across mount/unmount
[POS]:    Integration tests - status poller lifecycle
[UPDATE]: When poll triggers or status mapping changes
*/

mod common;

use common::{TEST_ADDRESS, mock_me, providers_for, setup_mock_server};
use siwe_session_adapter::AuthenticationStatus;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_one_request_per_focus_event() {
    let server = setup_mock_server().await;
    // mount + 3 focus events
    mock_me(&server, Some(TEST_ADDRESS), 4).await;

    let mut providers = providers_for(&server);
    let focus = providers.mount();
    assert!(focus.notify());
    assert!(focus.notify());
    assert!(providers.notify_focus());
    providers.unmount().await;

    assert_eq!(providers.status(), AuthenticationStatus::Authenticated);
}

#[tokio::test]
async fn test_no_requests_after_unmount() {
    let server = setup_mock_server().await;
    mock_me(&server, None, 1).await;

    let mut providers = providers_for(&server);
    let focus = providers.mount();
    providers.unmount().await;
    assert!(!providers.is_mounted());

    assert!(!focus.notify());
    assert!(!providers.notify_focus());
    assert_eq!(providers.status(), AuthenticationStatus::Unauthenticated);
}

#[tokio::test]
async fn test_undecodable_poll_on_mount_stays_loading() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(2)
        .mount(&server)
        .await;

    let mut providers = providers_for(&server);
    let focus = providers.mount();
    assert!(focus.notify());
    providers.unmount().await;

    assert_eq!(providers.status(), AuthenticationStatus::Loading);
}

#[tokio::test]
async fn test_unreachable_backend_stays_loading() {
    let server = setup_mock_server().await;
    let mut providers = providers_for(&server);
    drop(server);

    let focus = providers.mount();
    assert!(focus.notify());
    providers.unmount().await;

    assert_eq!(providers.status(), AuthenticationStatus::Loading);
}

#[tokio::test]
async fn test_unauthorized_json_body_is_unauthenticated() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "x",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let providers = providers_for(&server);
    assert_eq!(
        providers.refresh_status().await,
        AuthenticationStatus::Unauthenticated
    );
    assert_eq!(providers.status(), AuthenticationStatus::Unauthenticated);
}

#[tokio::test]
async fn test_subscribers_see_transition() {
    let server = setup_mock_server().await;
    mock_me(&server, Some(TEST_ADDRESS), 1).await;

    let mut providers = providers_for(&server);
    let mut rx = providers.subscribe();
    assert_eq!(*rx.borrow(), AuthenticationStatus::Loading);

    providers.mount();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), AuthenticationStatus::Authenticated);

    providers.unmount().await;
}

#[tokio::test]
async fn test_remount_issues_fresh_poll() {
    let server = setup_mock_server().await;
    mock_me(&server, Some(TEST_ADDRESS), 2).await;

    let mut providers = providers_for(&server);
    let first = providers.mount();
    providers.unmount().await;

    let second = providers.mount();
    assert!(!first.notify());
    providers.unmount().await;
    assert!(!second.notify());
}
