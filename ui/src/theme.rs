use std::fmt;

use serde::{Deserialize, Serialize};

/// The user's theme choice. `System` follows the OS color scheme.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Unknown values fall back to `System`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is actually painted: `System` already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

pub fn resolve_effective_theme(mode: ThemeMode, system_prefers_dark: bool) -> Theme {
    match mode {
        ThemeMode::Light => Theme::Light,
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::System if system_prefers_dark => Theme::Dark,
        ThemeMode::System => Theme::Light,
    }
}

/// The explicit mode a theme toggle switches to. Toggling always leaves
/// `System` for the opposite of what is currently painted.
pub fn toggled_mode(effective: Theme) -> ThemeMode {
    match effective {
        Theme::Light => ThemeMode::Dark,
        Theme::Dark => ThemeMode::Light,
    }
}
