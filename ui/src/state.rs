use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::theme::{Theme, ThemeMode, resolve_effective_theme};

type Listener<S> = Rc<dyn Fn(&Rc<S>)>;

struct StoreInner<S> {
    state: RefCell<Rc<S>>,
    listeners: RefCell<Vec<(u64, Listener<S>)>>,
    next_listener: Cell<u64>,
}

/// Shared, observable state container.
///
/// Passed explicitly to whatever needs it instead of living in a global.
/// Cloning is cheap and every clone sees the same state.
pub struct Store<S> {
    inner: Rc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Default + Clone + PartialEq + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl<S: Clone + PartialEq + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial)),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> Rc<S> {
        self.inner.state.borrow().clone()
    }

    /// Mutate a copy of the state and publish it. Listeners only run when
    /// the result differs from the current state.
    pub fn reduce_mut<F>(&self, f: F)
    where
        F: FnOnce(&mut S),
    {
        let current = self.get();
        let mut next = (*current).clone();
        f(&mut next);
        if next == *current {
            return;
        }
        self.publish(Rc::new(next));
    }

    pub fn set(&self, value: S) {
        if *self.get() == value {
            return;
        }
        self.publish(Rc::new(value));
    }

    fn publish(&self, next: Rc<S>) {
        *self.inner.state.borrow_mut() = next.clone();
        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener<S>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Rc<S>) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let inner: Weak<StoreInner<S>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.listeners.borrow_mut().retain(|(l, _)| *l != id);
                }
            })),
        }
    }

    /// Subscribe to one projection of the state. `listener` runs only when
    /// the projected value changes.
    pub fn select<T, Sel, F>(&self, selector: Sel, listener: F) -> Subscription
    where
        T: PartialEq + 'static,
        Sel: Fn(&S) -> T + 'static,
        F: Fn(&T) + 'static,
    {
        let last = RefCell::new(selector(&self.get()));
        self.subscribe(move |state| {
            let next = selector(state);
            if *last.borrow() == next {
                return;
            }
            listener(&next);
            *last.borrow_mut() = next;
        })
    }
}

impl<S: Default + Clone + PartialEq + 'static> Store<S> {
    pub fn reset(&self) {
        self.set(S::default());
    }
}

pub const DEFAULT_BACKGROUND_OPACITY: u8 = 20;
pub const MAX_BACKGROUND_OPACITY: u8 = 100;
pub const MAX_BACKGROUND_BLUR: u8 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundImage {
    pub path: Option<PathBuf>,
    /// Percent, 0..=100.
    pub opacity: u8,
    /// Pixels, 0..=20.
    pub blur: u8,
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            path: None,
            opacity: DEFAULT_BACKGROUND_OPACITY,
            blur: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    EnUs,
    ZhCn,
}

impl Locale {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// Map any English or Chinese tag onto the supported variant.
    pub fn normalize(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_ascii_lowercase();
        if lower.starts_with("en") {
            Some(Locale::EnUs)
        } else if lower.starts_with("zh") {
            Some(Locale::ZhCn)
        } else {
            None
        }
    }
}

impl Serialize for Locale {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Locale::normalize(&tag).unwrap_or_else(|| {
            tracing::warn!(%tag, "unsupported locale in preferences, using default");
            Locale::default()
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

/// Everything the desktop front end remembers between launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme_mode: ThemeMode,
    /// Reported by the OS at runtime, never persisted.
    #[serde(skip)]
    pub system_prefers_dark: bool,
    pub background: BackgroundImage,
    pub locale: Locale,
    pub window_geometry: Option<WindowGeometry>,
}

impl Preferences {
    pub fn effective_theme(&self) -> Theme {
        resolve_effective_theme(self.theme_mode, self.system_prefers_dark)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.effective_theme().is_dark()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Failed to write preferences to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize preferences")]
    Serialize(#[from] serde_json::Error),
}

/// The preference store plus one setter per field.
#[derive(Clone, Default)]
pub struct PreferencesHandle {
    store: Store<Preferences>,
}

impl PreferencesHandle {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            store: Store::new(preferences),
        }
    }

    pub fn store(&self) -> &Store<Preferences> {
        &self.store
    }

    pub fn get(&self) -> Rc<Preferences> {
        self.store.get()
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) {
        self.store.reduce_mut(|prefs| prefs.theme_mode = mode);
    }

    pub fn set_system_prefers_dark(&self, prefers_dark: bool) {
        self.store
            .reduce_mut(|prefs| prefs.system_prefers_dark = prefers_dark);
    }

    pub fn set_background_image(&self, path: Option<PathBuf>) {
        self.store.reduce_mut(|prefs| prefs.background.path = path);
    }

    pub fn set_background_opacity(&self, opacity: u8) {
        let opacity = opacity.min(MAX_BACKGROUND_OPACITY);
        self.store
            .reduce_mut(|prefs| prefs.background.opacity = opacity);
    }

    pub fn set_background_blur(&self, blur: u8) {
        let blur = blur.min(MAX_BACKGROUND_BLUR);
        self.store.reduce_mut(|prefs| prefs.background.blur = blur);
    }

    pub fn set_locale(&self, locale: Locale) {
        self.store.reduce_mut(|prefs| prefs.locale = locale);
    }

    /// Returns false and leaves the locale alone for unsupported tags.
    pub fn set_locale_tag(&self, tag: &str) -> bool {
        match Locale::normalize(tag) {
            Some(locale) => {
                self.set_locale(locale);
                true
            }
            None => false,
        }
    }

    pub fn set_window_geometry(&self, geometry: Option<WindowGeometry>) {
        self.store
            .reduce_mut(|prefs| prefs.window_geometry = geometry);
    }

    /// Restore defaults, keeping the OS-reported dark preference.
    pub fn reset(&self) {
        let system_prefers_dark = self.get().system_prefers_dark;
        self.store.set(Preferences {
            system_prefers_dark,
            ..Preferences::default()
        });
    }

    pub fn is_dark_mode(&self) -> bool {
        self.get().is_dark_mode()
    }

    /// Read preferences saved by [`Self::save_to`].
    ///
    /// A missing file yields defaults. An unreadable or malformed file also
    /// yields defaults, with a warning.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no saved preferences");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read preferences: {e}");
                return Self::default();
            }
        };
        match serde_json::from_str::<Preferences>(&contents) {
            Ok(preferences) => Self::new(preferences),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid preferences: {e}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        let json = serde_json::to_string_pretty(&*self.get())?;
        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)
        };
        write().map_err(|source| PreferencesError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(())
    }
}
