use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use test_helpers::spawn_app_with;
use ui::Config;
use ui::state::{Locale, Preferences, PreferencesHandle, WindowGeometry};
use ui::theme::ThemeMode;

#[test]
fn preferences_round_trip_through_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("preferences.json");
    let prefs = PreferencesHandle::default();
    prefs.set_theme_mode(ThemeMode::Dark);
    prefs.set_locale(Locale::ZhCn);
    prefs.set_background_opacity(40);
    prefs.set_window_geometry(Some(WindowGeometry {
        x: 120,
        y: 80,
        width: 1280,
        height: 800,
        maximized: false,
    }));

    prefs.save_to(&path)?;
    let loaded = PreferencesHandle::load_from(&path);

    assert_eq!(*loaded.get(), *prefs.get());
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(saved["theme_mode"], "dark");
    assert_eq!(saved["locale"], "zh-CN");
    assert!(saved.get("system_prefers_dark").is_none());
    Ok(())
}

#[test]
fn missing_or_invalid_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.json");
    assert_eq!(*PreferencesHandle::load_from(&missing).get(), Preferences::default());

    let invalid = dir.path().join("invalid.json");
    fs::write(&invalid, "{ not json")?;
    assert_eq!(*PreferencesHandle::load_from(&invalid).get(), Preferences::default());
    Ok(())
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("preferences.json");
    fs::write(&path, r#"{ "theme_mode": "light", "locale": "en-GB" }"#)?;

    let prefs = PreferencesHandle::load_from(&path);

    assert_eq!(prefs.get().theme_mode, ThemeMode::Light);
    assert_eq!(prefs.get().locale, Locale::EnUs);
    assert_eq!(prefs.get().background, Preferences::default().background);
    Ok(())
}

#[test]
fn reset_restores_defaults_and_notifies() {
    let prefs = PreferencesHandle::default();
    prefs.set_system_prefers_dark(true);
    prefs.set_theme_mode(ThemeMode::Light);
    prefs.set_background_blur(8);

    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    let _sub = prefs
        .store()
        .subscribe(move |_| counter.set(counter.get() + 1));

    prefs.reset();

    assert_eq!(notified.get(), 1);
    assert_eq!(prefs.get().theme_mode, ThemeMode::System);
    assert_eq!(prefs.get().background.blur, 0);
    assert!(prefs.get().system_prefers_dark);
    assert!(prefs.is_dark_mode());

    prefs.reset();
    assert_eq!(notified.get(), 1);
}

#[test]
fn app_saves_to_configured_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("preferences.json");
    let image = dir.path().join("mountains.png");
    fs::write(&image, b"\x89PNG")?;

    let test = spawn_app_with(Config {
        preferences_path: Some(path.clone()),
        request_timeout: None,
        ..Config::default()
    });
    let background = test.app.background_image();
    assert!(background.set_image(&image));
    assert!(!background.set_image(dir.path().join("notes.txt")));
    test.app.save_preferences()?;

    let reloaded = spawn_app_with(Config {
        preferences_path: Some(path),
        ..Config::default()
    });
    assert_eq!(
        reloaded.app.preferences.get().background.path,
        Some(image)
    );
    Ok(())
}
