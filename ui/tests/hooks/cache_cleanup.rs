use payloads::requests::CleanType;
use serde_json::json;
use test_helpers::{TestApp, mock, spawn_app};
use ui::components::{CleanupStep, DialogOutcome};
use ui::contexts::ToastType;

fn script_cleanup(test: &TestApp) {
    let t = &test.transport;
    t.respond("cache_clean_preview", &mock::sample_clean_preview(CleanType::All));
    t.respond_once("cache_info", &mock::sample_cache_info());
    t.respond("cache_info", &mock::sample_cache_info_after_clean());
}

#[tokio::test]
async fn confirming_cleanup_refetches_info_and_reports_freed_space()
-> anyhow::Result<()> {
    let test = spawn_app();
    script_cleanup(&test);
    test.transport
        .respond("cache_clean", &mock::sample_clean_result());
    test.app.cache.info.refresh().await;

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;
    assert_eq!(dialog.step(), Some(&CleanupStep::Preview));
    assert!(dialog.can_proceed());
    assert!(dialog.proceed());
    assert_eq!(dialog.step(), Some(&CleanupStep::Confirm));

    let result = dialog.confirm().await;

    assert_eq!(result, Some(mock::sample_clean_result()));
    assert_eq!(
        dialog.step(),
        Some(&CleanupStep::Result(mock::sample_clean_result()))
    );
    assert_eq!(
        test.transport.last_args("cache_clean"),
        Some(json!({ "clean_type": "all", "use_trash": true }))
    );
    assert_eq!(test.transport.call_count("cache_info"), 2);
    assert_eq!(
        test.app.cache.info.data(),
        Some(mock::sample_cache_info_after_clean())
    );

    let toast = test.app.toasts.toasts().pop().expect("success toast raised");
    assert_eq!(toast.toast_type, ToastType::Success);
    assert!(toast.message.contains("700.0 MB"), "{}", toast.message);

    assert_eq!(dialog.finish(), Some(DialogOutcome::Confirmed));
    assert!(!dialog.is_open());
    Ok(())
}

#[tokio::test]
async fn failed_cleanup_stays_on_confirm() -> anyhow::Result<()> {
    let test = spawn_app();
    script_cleanup(&test);
    test.transport
        .fail("cache_clean", "permission denied: /home/dev/.cache/envdesk");

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;
    dialog.proceed();
    let result = dialog.confirm().await;

    assert_eq!(result, None);
    assert_eq!(dialog.step(), Some(&CleanupStep::Confirm));
    assert_eq!(test.transport.call_count("cache_info"), 0);
    let toast = test.app.toasts.toasts().pop().expect("error toast raised");
    assert_eq!(toast.toast_type, ToastType::Error);
    assert!(toast.retry.is_some());

    assert_eq!(dialog.cancel(), Some(DialogOutcome::Cancelled));
    assert_eq!(dialog.step(), None);
    Ok(())
}

#[tokio::test]
async fn empty_preview_cannot_proceed() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond(
        "cache_clean_preview",
        &mock::empty_clean_preview(CleanType::All),
    );

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;

    assert!(!dialog.can_proceed());
    assert!(!dialog.proceed());
    assert_eq!(dialog.confirm().await, None);
    assert_eq!(test.transport.call_count("cache_clean"), 0);
    Ok(())
}

#[tokio::test]
async fn changing_clean_type_reloads_preview() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond_once(
        "cache_clean_preview",
        &mock::sample_clean_preview(CleanType::All),
    );
    test.transport.respond_once(
        "cache_clean_preview",
        &mock::sample_clean_preview(CleanType::Downloads),
    );

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;
    dialog.set_clean_type(CleanType::Downloads).await;

    assert_eq!(dialog.clean_type(), CleanType::Downloads);
    assert_eq!(
        test.transport.last_args("cache_clean_preview"),
        Some(json!({ "clean_type": "downloads" }))
    );
    let preview = dialog.preview().data.into_option().expect("preview loaded");
    assert_eq!(preview.clean_type, CleanType::Downloads);
    Ok(())
}

#[tokio::test]
async fn failed_reload_keeps_old_preview_but_blocks_proceeding() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond_once(
        "cache_clean_preview",
        &mock::sample_clean_preview(CleanType::All),
    );
    test.transport
        .fail("cache_clean_preview", "cache index is locked");

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;
    assert!(dialog.can_proceed());

    dialog.set_clean_type(CleanType::Downloads).await;

    let shown = dialog.preview().data.into_option().expect("old preview kept");
    assert_eq!(shown.clean_type, CleanType::All);
    assert!(!dialog.can_proceed());
    assert!(!dialog.proceed());
    assert_eq!(dialog.step(), Some(&CleanupStep::Preview));
    assert_eq!(dialog.confirm().await, None);
    assert_eq!(test.transport.call_count("cache_clean"), 0);
    Ok(())
}

#[tokio::test]
async fn cannot_proceed_while_new_preview_loads() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond(
        "cache_clean_preview",
        &mock::sample_clean_preview(CleanType::All),
    );

    let mut dialog = test.app.cleanup_dialog();
    dialog.open().await;
    let gate = test.transport.gate("cache_clean_preview");

    let release = async {
        assert_eq!(dialog.clean_type(), CleanType::Downloads);
        assert!(!dialog.can_proceed());
        gate.succeed(&mock::sample_clean_preview(CleanType::Downloads));
    };
    futures::join!(dialog.set_clean_type(CleanType::Downloads), release);

    assert!(dialog.can_proceed());
    assert!(dialog.proceed());
    Ok(())
}

#[tokio::test]
async fn dropping_dialog_abandons_preview_in_flight() -> anyhow::Result<()> {
    let test = spawn_app();
    let dialog = test.app.cleanup_dialog();
    let preview = dialog.preview_resource().clone();
    let gate = test.transport.gate("cache_clean_preview");

    let close = async move {
        drop(dialog);
        gate.succeed(&mock::sample_clean_preview(CleanType::All));
    };
    futures::join!(preview.refresh(), close);

    assert!(!preview.is_mounted());
    assert_eq!(preview.data(), None);
    Ok(())
}
