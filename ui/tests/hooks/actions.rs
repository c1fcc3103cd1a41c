use payloads::requests::InstallEnvironment;
use test_helpers::{mock, spawn_app, spawn_app_with};
use ui::Config;
use ui::contexts::ToastType;

fn install_node() -> InstallEnvironment {
    InstallEnvironment {
        env_type: "node".into(),
        version: "20.11.1".into(),
        provider: None,
        force: false,
    }
}

#[tokio::test]
async fn invalid_parameters_make_no_call() -> anyhow::Result<()> {
    let test = spawn_app();
    let params = InstallEnvironment {
        env_type: " ".into(),
        ..install_node()
    };

    let result = test.app.environments.install.run(params).await;

    assert_eq!(result, None);
    assert!(test.transport.calls().is_empty());
    let toasts = test.app.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].toast_type, ToastType::Error);
    assert_eq!(toasts[0].message, "Install: env_type is required");
    Ok(())
}

#[tokio::test]
async fn success_refreshes_dependents_and_toasts() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("env_install", &());
    test.transport.respond("env_list", &mock::sample_environments());
    let envs = &test.app.environments;

    let result = envs.install.run(install_node()).await;

    assert_eq!(result, Some(()));
    assert_eq!(test.transport.call_count("env_install"), 1);
    assert_eq!(test.transport.call_count("env_list"), 1);
    assert_eq!(envs.list.data(), Some(mock::sample_environments()));
    assert!(!envs.install.is_pending());

    let toasts = test.app.toasts.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].toast_type, ToastType::Success);
    assert_eq!(toasts[0].message, "Installed node 20.11.1");
    Ok(())
}

#[tokio::test]
async fn failure_toast_stays_and_retries_same_parameters() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.fail_once("env_install", "connection refused");
    test.transport.respond("env_install", &());
    test.transport.respond("env_list", &mock::sample_environments());
    let envs = &test.app.environments;

    let result = envs.install.run(install_node()).await;

    assert_eq!(result, None);
    assert_eq!(test.transport.call_count("env_list"), 0);
    let toast = test.app.toasts.toasts().pop().expect("error toast raised");
    assert_eq!(toast.toast_type, ToastType::Error);
    assert_eq!(toast.message, "Install failed: connection refused");
    assert_eq!(toast.duration, None);
    assert!(toast.retry.is_some());

    assert!(test.app.toasts.retry(toast.id).await);

    assert_eq!(test.transport.call_count("env_install"), 2);
    assert_eq!(
        test.transport.last_args("env_install"),
        Some(serde_json::to_value(install_node())?)
    );
    assert_eq!(test.transport.call_count("env_list"), 1);
    let messages: Vec<_> = test
        .app
        .toasts
        .toasts()
        .into_iter()
        .map(|t| t.message)
        .collect();
    assert_eq!(messages, ["Installed node 20.11.1"]);
    Ok(())
}

#[tokio::test]
async fn second_run_while_pending_is_ignored() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("env_list", &mock::sample_environments());
    let gate = test.transport.gate("env_install");
    let install = &test.app.environments.install;

    let release = async {
        assert!(install.is_pending());
        gate.succeed(&());
    };
    let (first, second, ()) = futures::join!(
        install.run(install_node()),
        install.run(install_node()),
        release
    );

    assert_eq!(first, Some(()));
    assert_eq!(second, None);
    assert_eq!(test.transport.call_count("env_install"), 1);
    assert!(!install.is_pending());
    Ok(())
}

#[tokio::test]
async fn success_toast_uses_configured_duration() -> anyhow::Result<()> {
    for configured in [None, Some(1500)] {
        let test = spawn_app_with(Config {
            toast_duration_ms: configured,
            request_timeout: None,
            ..Config::default()
        });
        test.transport.respond("env_install", &());
        test.transport.respond("env_list", &mock::sample_environments());

        test.app.environments.install.run(install_node()).await;

        let toast = test.app.toasts.toasts().pop().expect("success toast raised");
        assert_eq!(toast.toast_type, ToastType::Success);
        assert_eq!(toast.duration, configured);
    }
    Ok(())
}
