use std::time::Duration;

use payloads::APIClient;

use crate::contexts::toast::ToastHandle;

pub mod use_about_data;
pub mod use_action;
pub mod use_background_image;
pub mod use_cache_info;
pub mod use_env_vars;
pub mod use_environments;
pub mod use_fetch;
pub mod use_git;
pub mod use_shims;

pub use use_about_data::{AboutData, use_about_data};
pub use use_action::Action;
pub use use_background_image::{
    BackgroundImageError, BackgroundImageHook, use_background_image,
    validate_image_path,
};
pub use use_cache_info::{CacheHooks, use_cache_info};
pub use use_env_vars::{EnvVarHooks, use_env_vars};
pub use use_environments::{EnvironmentHooks, use_environments};
pub use use_fetch::{
    FetchHookReturn, Refreshable, RenderState, Resource, ResourceError, Status,
};
pub use use_git::{GitHooks, use_git};
pub use use_shims::{ShimHooks, use_shims};

/// Whether a value has been fetched at least once.
///
/// Distinguishes "not fetched yet" from "fetched and empty", which matters
/// when choosing between a skeleton and a "no data" message.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::NotFetched => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::NotFetched => None,
        }
    }
}

/// Everything a feature hook needs to reach the backend and report back.
#[derive(Clone)]
pub struct HookContext {
    pub client: APIClient,
    pub toasts: ToastHandle,
    /// Budget applied to every resource refresh. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}
