use payloads::requests::{CreateShim, EnvVarScope, RemoveEnvVar, SetEnvVar};
use serde_json::json;
use test_helpers::{mock, spawn_app};

fn node_shim(binary_name: &str) -> CreateShim {
    CreateShim {
        binary_name: binary_name.into(),
        env_type: "node".into(),
        version: Some("20.11.1".into()),
        target_path: "/home/dev/.envdesk/node/20.11.1/bin/node".into(),
    }
}

#[tokio::test]
async fn creating_a_shim_refreshes_the_list() -> anyhow::Result<()> {
    let test = spawn_app();
    let created = mock::sample_shims().remove(0);
    test.transport.respond("shim_create", &created);
    test.transport.respond("shim_list", &mock::sample_shims());
    let shims = &test.app.shims;

    let result = shims.create.run(node_shim("node")).await;

    assert_eq!(result, Some(created));
    assert_eq!(test.transport.call_count("shim_list"), 1);
    assert_eq!(test.transport.call_count("path_status"), 0);
    assert_eq!(shims.shims.data(), Some(mock::sample_shims()));
    Ok(())
}

#[tokio::test]
async fn shim_name_with_separator_makes_no_call() -> anyhow::Result<()> {
    let test = spawn_app();

    let result = test.app.shims.create.run(node_shim("bin/node")).await;

    assert_eq!(result, None);
    assert!(test.transport.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn path_setup_refreshes_path_status() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("path_setup", &());
    test.transport
        .respond("path_status", &mock::sample_path_status(true));
    let shims = &test.app.shims;

    shims.setup_path.run(()).await;

    assert_eq!(
        shims.path_status.data().map(|status| status.is_in_path),
        Some(true)
    );
    assert_eq!(test.transport.call_count("shim_list"), 0);
    Ok(())
}

#[tokio::test]
async fn setting_a_variable_refreshes_its_scope() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("env_var_set", &());
    test.transport
        .respond("env_var_list", &mock::sample_env_vars(EnvVarScope::User));
    let vars = test.app.env_vars(EnvVarScope::User);

    vars.set
        .run(SetEnvVar {
            key: "EDITOR".into(),
            value: "nvim".into(),
            scope: EnvVarScope::User,
        })
        .await;

    assert_eq!(
        test.transport.last_args("env_var_list"),
        Some(json!({ "scope": "user" }))
    );
    assert_eq!(vars.vars.data(), Some(mock::sample_env_vars(EnvVarScope::User)));
    Ok(())
}

#[tokio::test]
async fn malformed_variable_key_makes_no_call() -> anyhow::Result<()> {
    let test = spawn_app();
    let vars = test.app.env_vars(EnvVarScope::Process);

    let result = vars
        .remove
        .run(RemoveEnvVar {
            key: "PATH=".into(),
            scope: EnvVarScope::Process,
        })
        .await;

    assert_eq!(result, None);
    assert!(test.transport.calls().is_empty());
    assert_eq!(test.app.toasts.toasts().len(), 1);
    Ok(())
}
