use std::path::{Path, PathBuf};

use crate::contexts::toast::ToastHandle;
use crate::state::{BackgroundImage, PreferencesHandle};

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BackgroundImageError {
    #[error("Unsupported image format. Use PNG, JPG, WEBP or GIF.")]
    UnsupportedFormat,
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Check that `path` names an existing image file of a supported type.
pub fn validate_image_path(path: &Path) -> Result<(), BackgroundImageError> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(BackgroundImageError::UnsupportedFormat);
    }
    if !path.is_file() {
        return Err(BackgroundImageError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BackgroundImageHook {
    preferences: PreferencesHandle,
    toasts: ToastHandle,
}

pub fn use_background_image(
    preferences: &PreferencesHandle,
    toasts: &ToastHandle,
) -> BackgroundImageHook {
    BackgroundImageHook {
        preferences: preferences.clone(),
        toasts: toasts.clone(),
    }
}

impl BackgroundImageHook {
    pub fn current(&self) -> BackgroundImage {
        self.preferences.get().background.clone()
    }

    /// Use `path` as the window background. An invalid path leaves the
    /// current background in place and raises an error toast.
    pub fn set_image(&self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if let Err(error) = validate_image_path(&path) {
            tracing::warn!(path = %path.display(), "rejected background image: {error}");
            self.toasts.error(error.to_string());
            return false;
        }
        self.preferences.set_background_image(Some(path));
        true
    }

    pub fn clear(&self) {
        self.preferences.set_background_image(None);
    }

    pub fn set_opacity(&self, opacity: u8) {
        self.preferences.set_background_opacity(opacity);
    }

    pub fn set_blur(&self, blur: u8) {
        self.preferences.set_background_blur(blur);
    }
}
