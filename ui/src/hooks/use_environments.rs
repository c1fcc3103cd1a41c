use std::path::PathBuf;

use payloads::DetectedEnvironment;
use payloads::Environment;
use payloads::requests::{
    DetectEnvironments, InstallEnvironment, SetGlobalVersion, SetLocalVersion,
    UninstallEnvironment,
};

use super::{Action, HookContext, Resource};
use crate::contexts::toast::Toast;

#[derive(Clone)]
pub struct EnvironmentHooks {
    ctx: HookContext,
    pub list: Resource<Vec<Environment>>,
    pub install: Action<InstallEnvironment, ()>,
    pub uninstall: Action<UninstallEnvironment, ()>,
    pub set_global: Action<SetGlobalVersion, ()>,
    pub set_local: Action<SetLocalVersion, ()>,
}

pub fn use_environments(ctx: &HookContext) -> EnvironmentHooks {
    let client = ctx.client.clone();
    let list = Resource::new("environments", "env_list_failed", move || {
        let client = client.clone();
        async move { client.env_list().await }
    })
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let install = Action::new("Install", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.env_install(&details).await }
    })
    .refreshes(&list)
    .with_success_toast(|details: &InstallEnvironment, _: &()| {
        Toast::success(format!("Installed {} {}", details.env_type, details.version))
    });

    let client = ctx.client.clone();
    let uninstall = Action::new("Uninstall", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.env_uninstall(&details).await }
    })
    .refreshes(&list)
    .with_success_toast(|details: &UninstallEnvironment, _: &()| {
        Toast::success(format!(
            "Uninstalled {} {}",
            details.env_type, details.version
        ))
    });

    let client = ctx.client.clone();
    let set_global =
        Action::new("Set global version", ctx.toasts.clone(), move |details| {
            let client = client.clone();
            async move { client.env_set_global(&details).await }
        })
        .refreshes(&list)
        .with_success_toast(|details: &SetGlobalVersion, _: &()| {
            Toast::success(format!(
                "{} {} is now the global default",
                details.env_type, details.version
            ))
        });

    let client = ctx.client.clone();
    let set_local =
        Action::new("Set local version", ctx.toasts.clone(), move |details| {
            let client = client.clone();
            async move { client.env_set_local(&details).await }
        })
        .refreshes(&list)
        .with_success_toast(|details: &SetLocalVersion, _: &()| {
            Toast::success(format!(
                "Pinned {} {} in {}",
                details.env_type,
                details.version,
                details.project_path.display()
            ))
        });

    EnvironmentHooks {
        ctx: ctx.clone(),
        list,
        install,
        uninstall,
        set_global,
        set_local,
    }
}

impl EnvironmentHooks {
    /// Versions in effect for `start_path`, as the backend resolves them.
    pub fn detect(&self, start_path: PathBuf) -> Resource<Vec<DetectedEnvironment>> {
        let client = self.ctx.client.clone();
        let details = DetectEnvironments { start_path };
        Resource::with_params(
            "detected_environments",
            "env_detect_failed",
            details,
            move |details| {
                let client = client.clone();
                async move { client.env_detect(&details).await }
            },
        )
        .with_timeout(self.ctx.request_timeout)
    }

    pub fn unmount(&self) {
        self.list.unmount();
    }
}
