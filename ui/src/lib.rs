//! State layer of the envdesk desktop front end.
//!
//! Every read from the native backend is a [`hooks::Resource`], every write
//! an [`hooks::Action`]. Views render from resource snapshots and the
//! notification queue; they never see a `Result`.

use std::path::PathBuf;
use std::rc::Rc;

use payloads::requests::EnvVarScope;
use payloads::{APIClient, HttpTransport};

pub mod components;
pub mod config;
pub mod contexts;
pub mod hooks;
pub mod logs;
pub mod state;
pub mod theme;

pub use config::{Config, ConfigError};

use components::{CacheCleanupDialog, SystemInfoCard, WindowControls};
use contexts::toast::ToastHandle;
use hooks::use_git::DEFAULT_LOG_LIMIT;
use hooks::{
    AboutData, BackgroundImageHook, CacheHooks, EnvVarHooks, EnvironmentHooks,
    GitHooks, HookContext, ShimHooks, use_about_data, use_background_image,
    use_cache_info, use_env_vars, use_environments, use_git, use_shims,
};
use state::{PreferencesError, PreferencesHandle};

/// The long-lived pieces of the front end, wired to one backend client.
pub struct App {
    pub config: Config,
    pub client: APIClient,
    pub toasts: ToastHandle,
    pub preferences: PreferencesHandle,
    pub about: AboutData,
    pub cache: CacheHooks,
    pub environments: EnvironmentHooks,
    pub shims: ShimHooks,
    pub window: WindowControls,
    ctx: HookContext,
}

impl App {
    /// Preferences are loaded from `config.preferences_path` when it is set.
    pub fn new(config: Config, client: APIClient) -> Self {
        let toasts = ToastHandle::new(config.toast_duration_ms);
        let preferences = match &config.preferences_path {
            Some(path) => PreferencesHandle::load_from(path),
            None => PreferencesHandle::default(),
        };
        let ctx = HookContext {
            client: client.clone(),
            toasts: toasts.clone(),
            request_timeout: config.request_timeout,
        };

        Self {
            about: use_about_data(&ctx),
            cache: use_cache_info(&ctx),
            environments: use_environments(&ctx),
            shims: use_shims(&ctx),
            window: WindowControls::new(client.clone(), toasts.clone()),
            config,
            client,
            toasts,
            preferences,
            ctx,
        }
    }

    /// Talk to the backend over HTTP at `config.bridge_url`.
    pub fn from_config(config: Config) -> Self {
        let mut transport = HttpTransport::new(config.bridge_url.clone());
        if let Some(timeout) = config.request_timeout {
            transport = transport.with_timeout(timeout);
        }
        let client = APIClient::with_transport(Rc::new(transport));
        Self::new(config, client)
    }

    pub fn context(&self) -> &HookContext {
        &self.ctx
    }

    /// Load everything the start-up screens show, concurrently.
    pub async fn mount(&self) {
        tracing::info!(bridge = %self.config.bridge_url, "mounting");
        futures::join!(
            self.about.refresh_all(),
            self.cache.info.refresh(),
            self.environments.list.refresh(),
            self.shims.refresh_all(),
            self.window.sync(),
        );
    }

    /// Abort in-flight refreshes; late responses are ignored.
    pub fn unmount(&self) {
        self.about.unmount();
        self.cache.unmount();
        self.environments.unmount();
        self.shims.unmount();
        tracing::info!("unmounted");
    }

    pub fn git(&self, repo_path: impl Into<PathBuf>) -> GitHooks {
        use_git(&self.ctx, repo_path.into(), DEFAULT_LOG_LIMIT)
    }

    pub fn env_vars(&self, scope: EnvVarScope) -> EnvVarHooks {
        use_env_vars(&self.ctx, scope)
    }

    pub fn cleanup_dialog(&self) -> CacheCleanupDialog {
        self.cache.cleanup_dialog()
    }

    pub fn system_info_card(&self) -> SystemInfoCard {
        SystemInfoCard::new(&self.about.system)
    }

    pub fn background_image(&self) -> BackgroundImageHook {
        use_background_image(&self.preferences, &self.toasts)
    }

    /// Write preferences to `config.preferences_path`. Does nothing when no
    /// path is configured.
    pub fn save_preferences(&self) -> Result<(), PreferencesError> {
        match &self.config.preferences_path {
            Some(path) => self.preferences.save_to(path),
            None => Ok(()),
        }
    }
}
