mod actions;
mod cache_cleanup;
mod environment_list;
mod preferences;
mod resource;
mod shims_env_vars;
mod window_controls;

use test_helpers::spawn_app;
use ui::hooks::Status;

#[tokio::test]
async fn mount_loads_start_up_resources() -> anyhow::Result<()> {
    let test = spawn_app();
    test.script_mount_defaults();

    test.app.mount().await;

    assert_eq!(test.app.about.update.status(), Status::Ready);
    assert_eq!(test.app.about.system.status(), Status::Ready);
    assert_eq!(test.app.cache.info.status(), Status::Ready);
    assert_eq!(test.app.environments.list.status(), Status::Ready);
    assert_eq!(test.app.shims.shims.status(), Status::Ready);
    assert_eq!(test.app.shims.path_status.status(), Status::Ready);
    assert_eq!(test.app.about.update_available(), Some(true));
    // No window attached yet, so no window query.
    assert_eq!(test.transport.call_count("window_state"), 0);
    Ok(())
}

#[tokio::test]
async fn unmounted_app_makes_no_more_calls() -> anyhow::Result<()> {
    let test = spawn_app();
    test.script_mount_defaults();
    test.app.mount().await;
    test.transport.clear_calls();

    test.app.unmount();
    test.app.mount().await;

    assert!(test.transport.calls().is_empty());
    Ok(())
}
