use payloads::requests::{CreateShim, RemoveShim};
use payloads::{PathStatus, ShimInfo};

use super::{Action, HookContext, Resource};
use crate::contexts::toast::Toast;

#[derive(Clone)]
pub struct ShimHooks {
    pub shims: Resource<Vec<ShimInfo>>,
    pub path_status: Resource<PathStatus>,
    pub create: Action<CreateShim, ShimInfo>,
    pub remove: Action<RemoveShim, ()>,
    pub setup_path: Action<(), ()>,
}

pub fn use_shims(ctx: &HookContext) -> ShimHooks {
    let client = ctx.client.clone();
    let shims = Resource::new("shims", "shim_list_failed", move || {
        let client = client.clone();
        async move { client.shim_list().await }
    })
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let path_status = Resource::new("path_status", "path_status_failed", move || {
        let client = client.clone();
        async move { client.path_status().await }
    })
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let create = Action::new("Create shim", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.shim_create(&details).await }
    })
    .refreshes(&shims)
    .with_success_toast(|_: &CreateShim, shim: &ShimInfo| {
        Toast::success(format!("Created shim {}", shim.binary_name))
    });

    let client = ctx.client.clone();
    let remove = Action::new("Remove shim", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.shim_remove(&details).await }
    })
    .refreshes(&shims)
    .with_success_toast(|details: &RemoveShim, _: &()| {
        Toast::success(format!("Removed shim {}", details.binary_name))
    });

    let client = ctx.client.clone();
    let setup_path = Action::new("Set up PATH", ctx.toasts.clone(), move |()| {
        let client = client.clone();
        async move { client.path_setup().await }
    })
    .refreshes(&path_status)
    .with_success_toast(|_: &(), _: &()| {
        Toast::info("Shim directory added to PATH. Restart your shell to use it.".into())
    });

    ShimHooks {
        shims,
        path_status,
        create,
        remove,
        setup_path,
    }
}

impl ShimHooks {
    pub async fn refresh_all(&self) {
        futures::join!(self.shims.refresh(), self.path_status.refresh());
    }

    pub fn unmount(&self) {
        self.shims.unmount();
        self.path_status.unmount();
    }
}
