use payloads::EnvVar;
use payloads::requests::{EnvVarScope, ListEnvVars, RemoveEnvVar, SetEnvVar};

use super::{Action, HookContext, Resource};
use crate::contexts::toast::Toast;

#[derive(Clone)]
pub struct EnvVarHooks {
    pub scope: EnvVarScope,
    pub vars: Resource<Vec<EnvVar>>,
    pub set: Action<SetEnvVar, ()>,
    pub remove: Action<RemoveEnvVar, ()>,
}

pub fn use_env_vars(ctx: &HookContext, scope: EnvVarScope) -> EnvVarHooks {
    let client = ctx.client.clone();
    let details = ListEnvVars { scope };
    let vars = Resource::with_params(
        "env_vars",
        "env_var_list_failed",
        details,
        move |details| {
            let client = client.clone();
            async move { client.env_var_list(&details).await }
        },
    )
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let set = Action::new("Set variable", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.env_var_set(&details).await }
    })
    .refreshes(&vars)
    .with_success_toast(|details: &SetEnvVar, _: &()| {
        Toast::success(format!("Set {}", details.key))
    });

    let client = ctx.client.clone();
    let remove = Action::new("Remove variable", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.env_var_remove(&details).await }
    })
    .refreshes(&vars)
    .with_success_toast(|details: &RemoveEnvVar, _: &()| {
        Toast::success(format!("Removed {}", details.key))
    });

    EnvVarHooks {
        scope,
        vars,
        set,
        remove,
    }
}

impl EnvVarHooks {
    pub fn unmount(&self) {
        self.vars.unmount();
    }
}
