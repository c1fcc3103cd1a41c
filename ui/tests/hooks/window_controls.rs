use payloads::WindowState;
use serde_json::json;
use test_helpers::{mock, spawn_app};
use ui::components::WindowControl;
use ui::contexts::ToastType;

fn command_for(control: WindowControl) -> &'static str {
    match control {
        WindowControl::Minimize => "window_minimize",
        WindowControl::Maximize => "window_toggle_maximize",
        WindowControl::Fullscreen => "window_set_fullscreen",
        WindowControl::AlwaysOnTop => "window_set_always_on_top",
        WindowControl::Close => "window_close",
    }
}

#[tokio::test]
async fn controls_are_disabled_without_a_window() -> anyhow::Result<()> {
    let test = spawn_app();
    let window = &test.app.window;

    assert!(!window.is_attached());
    assert!(window.buttons().iter().all(|button| !button.enabled));

    for control in WindowControl::ALL {
        assert!(!window.click(control).await);
    }
    assert!(test.transport.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn each_click_sends_exactly_one_command() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("window_state", &mock::maximized_window());
    for control in WindowControl::ALL {
        test.transport.respond(command_for(control), &());
    }
    let window = &test.app.window;

    window.attach("main");
    window.sync().await;
    assert!(window.buttons().iter().all(|button| button.enabled));

    for control in WindowControl::ALL {
        test.transport.clear_calls();
        assert!(window.click(control).await, "{control:?}");
        let commands: Vec<String> = test
            .transport
            .calls()
            .into_iter()
            .map(|(command, _)| command)
            .collect();
        assert_eq!(commands, [command_for(control), "window_state"]);
    }
    Ok(())
}

#[tokio::test]
async fn displayed_state_comes_from_backend() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("window_set_fullscreen", &());
    test.transport.respond_once("window_state", &WindowState::default());
    test.transport.respond(
        "window_state",
        &WindowState {
            is_fullscreen: true,
            ..WindowState::default()
        },
    );
    let window = &test.app.window;
    window.attach("main");
    window.sync().await;

    window.click(WindowControl::Fullscreen).await;

    assert_eq!(
        test.transport.last_args("window_set_fullscreen"),
        Some(json!({ "label": "main", "enabled": true }))
    );
    assert!(window.state().is_fullscreen);
    let fullscreen = window
        .buttons()
        .into_iter()
        .find(|button| button.control == WindowControl::Fullscreen)
        .expect("fullscreen button");
    assert!(fullscreen.active);
    Ok(())
}

#[tokio::test]
async fn failed_command_toasts_and_still_resyncs() -> anyhow::Result<()> {
    let test = spawn_app();
    test.transport.respond("window_state", &mock::maximized_window());
    test.transport
        .fail("window_toggle_maximize", "window handle is stale");
    let window = &test.app.window;
    window.attach("main");

    assert!(!window.click(WindowControl::Maximize).await);

    assert_eq!(test.transport.call_count("window_state"), 1);
    assert!(window.state().is_maximized);
    let toast = test.app.toasts.toasts().pop().expect("error toast raised");
    assert_eq!(toast.toast_type, ToastType::Error);
    assert_eq!(toast.message, "Window action failed: window handle is stale");
    Ok(())
}

#[tokio::test]
async fn detaching_disables_controls_again() -> anyhow::Result<()> {
    let test = spawn_app();
    let window = &test.app.window;
    window.attach("main");
    window.detach();

    assert!(!window.click(WindowControl::Close).await);
    assert!(test.transport.calls().is_empty());
    assert_eq!(window.state(), WindowState::default());
    Ok(())
}
