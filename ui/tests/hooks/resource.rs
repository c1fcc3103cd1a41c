use std::time::Duration;

use payloads::ErrorKind;
use test_helpers::{mock, spawn_app, spawn_app_with};
use ui::Config;
use ui::hooks::{RenderState, Status};

#[tokio::test]
async fn successful_refresh_moves_idle_loading_ready() -> anyhow::Result<()> {
    let test = spawn_app();
    let info = &test.app.cache.info;
    assert_eq!(info.status(), Status::Idle);

    let gate = test.transport.gate("cache_info");
    let release = async {
        assert_eq!(info.status(), Status::Loading);
        assert!(info.snapshot().is_initial_loading());
        gate.succeed(&mock::sample_cache_info());
    };
    futures::join!(info.refresh(), release);

    assert_eq!(info.status(), Status::Ready);
    assert_eq!(info.error(), None);
    assert_eq!(info.data(), Some(mock::sample_cache_info()));
    assert!(info.last_fetched_at().is_some());
    Ok(())
}

#[tokio::test]
async fn rejected_refresh_moves_idle_loading_failed() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.fail("cache_info", "index file is corrupt");
    let info = &test.app.cache.info;

    info.refresh().await;

    assert_eq!(info.status(), Status::Failed);
    let error = info.error().expect("failed resource carries an error");
    assert_eq!(error.kind, ErrorKind::Internal);
    assert_eq!(error.tag, "cache_info_failed");
    assert_eq!(error.message, "index file is corrupt");
    assert_eq!(info.data(), None);

    let snapshot = info.snapshot();
    assert_eq!(
        snapshot.render_state(|_| false),
        RenderState::Error(&error),
        "a failed first load must not keep showing the skeleton"
    );
    Ok(())
}

#[tokio::test]
async fn error_is_cleared_by_next_successful_refresh() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.fail_once("env_list", "connection refused");
    test.transport.respond("env_list", &mock::sample_environments());
    let list = &test.app.environments.list;

    list.refresh().await;
    assert_eq!(list.status(), Status::Failed);
    assert_eq!(list.error().map(|e| e.tag), Some("network_error"));

    list.refresh().await;
    assert_eq!(list.status(), Status::Ready);
    assert_eq!(list.error(), None);
    Ok(())
}

#[tokio::test]
async fn failed_refresh_keeps_previous_data() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport
        .respond_once("cache_info", &mock::sample_cache_info());
    test.transport.fail("cache_info", "request timed out");
    let info = &test.app.cache.info;

    info.refresh().await;
    info.refresh().await;

    assert_eq!(info.status(), Status::Failed);
    assert_eq!(info.data(), Some(mock::sample_cache_info()));
    let snapshot = info.snapshot();
    match snapshot.render_state(|_| false) {
        RenderState::Ready { data, error, .. } => {
            assert_eq!(data, &mock::sample_cache_info());
            assert_eq!(error.map(|e| e.tag), Some("timeout_error"));
        }
        other => panic!("expected stale data with an error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn older_response_never_overwrites_newer_one() -> anyhow::Result<()> {
    let test = spawn_app();
    let list = &test.app.environments.list;
    let first = test.transport.gate("env_list");
    let second = test.transport.gate("env_list");

    let newest = mock::many_environments(2);
    let release = async {
        second.succeed(&newest);
        first.succeed(&mock::sample_environments());
    };
    futures::join!(list.refresh(), list.refresh(), release);

    assert_eq!(list.status(), Status::Ready);
    assert_eq!(list.data(), Some(newest));
    Ok(())
}

#[tokio::test]
async fn refresh_past_budget_fails_with_timeout() -> anyhow::Result<()> {
    let test = spawn_app_with(Config {
        request_timeout: Some(Duration::from_millis(20)),
        ..Config::default()
    });
    let _held = test.transport.gate("cache_info");
    let info = &test.app.cache.info;

    info.refresh().await;

    assert_eq!(info.status(), Status::Failed);
    let error = info.error().expect("timeout is reported");
    assert_eq!(error.kind, ErrorKind::Timeout);
    assert_eq!(error.tag, "timeout_error");
    Ok(())
}

#[tokio::test]
async fn unmount_aborts_in_flight_refresh() -> anyhow::Result<()> {
    let test = spawn_app();
    let info = &test.app.cache.info;
    let gate = test.transport.gate("cache_info");

    let teardown = async {
        info.unmount();
        gate.succeed(&mock::sample_cache_info());
    };
    futures::join!(info.refresh(), teardown);

    assert!(!info.is_mounted());
    assert_eq!(info.data(), None);

    test.transport.respond("cache_info", &mock::sample_cache_info());
    info.refresh().await;
    assert_eq!(test.transport.call_count("cache_info"), 1);
    assert_eq!(info.data(), None);
    Ok(())
}
