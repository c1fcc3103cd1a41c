use payloads::Environment;
use test_helpers::{mock, spawn_app};
use ui::components::environment_list::{NO_ENVIRONMENTS_MESSAGE, NO_MATCHES_MESSAGE};
use ui::components::{EnvironmentFilter, EnvironmentList, ListView};

fn keys<'a>(view: &ListView<'a, Environment>) -> Vec<&'a str> {
    view.items()
        .iter()
        .map(|env| EnvironmentList::key(*env))
        .collect()
}

#[tokio::test]
async fn empty_list_under_default_filter_says_nothing_matches() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("env_list", &Vec::<Environment>::new());
    let list = &test.app.environments.list;
    let mut view_model = EnvironmentList::default();

    let snapshot = list.snapshot();
    assert_eq!(view_model.view(&snapshot), ListView::Loading);

    list.refresh().await;
    let snapshot = list.snapshot();
    assert_eq!(view_model.view(&snapshot), ListView::Empty(NO_MATCHES_MESSAGE));

    view_model.set_filter(EnvironmentFilter::All);
    assert_eq!(
        view_model.view(&snapshot),
        ListView::Empty(NO_ENVIRONMENTS_MESSAGE)
    );
    Ok(())
}

#[tokio::test]
async fn failed_load_renders_error_not_empty() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.fail("env_list", "connection refused");
    let list = &test.app.environments.list;

    list.refresh().await;
    let snapshot = list.snapshot();

    match EnvironmentList::default().view(&snapshot) {
        ListView::Error { error, can_retry } => {
            assert_eq!(error.tag, "network_error");
            assert!(can_retry);
        }
        other => panic!("expected an error view, got {other:?}"),
    }
    Ok(())
}

#[test]
fn filters_are_idempotent() {
    let envs = mock::sample_environments();
    let mut view_model = EnvironmentList::default();

    let available = keys(&view_model.render(Some(&envs[..]), false, None));
    assert_eq!(available, ["node", "python", "rust"]);

    view_model.set_filter(EnvironmentFilter::All);
    let all = keys(&view_model.render(Some(&envs[..]), false, None));
    assert_eq!(all, ["node", "python", "go", "rust"]);

    view_model.set_filter(EnvironmentFilter::Available);
    assert_eq!(keys(&view_model.render(Some(&envs[..]), false, None)), available);

    view_model.set_filter(EnvironmentFilter::Installed);
    assert_eq!(
        keys(&view_model.render(Some(&envs[..]), false, None)),
        ["node", "rust"]
    );
}

#[test]
fn search_matches_type_or_provider_case_insensitively() {
    let envs = mock::sample_environments();
    let mut view_model = EnvironmentList {
        filter: EnvironmentFilter::All,
        ..EnvironmentList::default()
    };

    view_model.set_search("PY");
    assert_eq!(keys(&view_model.render(Some(&envs[..]), false, None)), ["python"]);

    view_model.set_search("rustup");
    assert_eq!(keys(&view_model.render(Some(&envs[..]), false, None)), ["rust"]);

    view_model.set_search("zig");
    assert_eq!(
        view_model.render(Some(&envs[..]), false, None),
        ListView::Empty(NO_MATCHES_MESSAGE)
    );
}

#[test]
fn show_more_is_reversible_with_stable_keys() {
    let envs = mock::many_environments(10);
    let mut view_model = EnvironmentList::default();

    let collapsed = view_model.render(Some(&envs[..]), false, None);
    let collapsed_keys = keys(&collapsed);
    match &collapsed {
        ListView::Items { total, hidden, .. } => {
            assert_eq!(*total, 10);
            assert_eq!(*hidden, 4);
        }
        other => panic!("expected items, got {other:?}"),
    }
    assert_eq!(collapsed_keys.len(), 6);

    view_model.toggle_show_more();
    let expanded = keys(&view_model.render(Some(&envs[..]), false, None));
    assert_eq!(expanded.len(), 10);
    assert_eq!(expanded[..6], collapsed_keys[..]);

    view_model.toggle_show_more();
    assert_eq!(
        keys(&view_model.render(Some(&envs[..]), false, None)),
        collapsed_keys
    );
}
