use payloads::{SystemInfo, UpdateInfo};

use super::{HookContext, Resource};

/// Data behind the about page: updater status and a system summary.
#[derive(Clone)]
pub struct AboutData {
    pub update: Resource<UpdateInfo>,
    pub system: Resource<SystemInfo>,
}

impl AboutData {
    /// Refresh both cards concurrently. One failing does not affect the
    /// other.
    pub async fn refresh_all(&self) {
        futures::join!(self.update.refresh(), self.system.refresh());
    }

    /// `Some(true)` when a newer build exists, `None` until the first
    /// successful check.
    pub fn update_available(&self) -> Option<bool> {
        self.update.data().map(|info| info.update_available)
    }

    pub fn unmount(&self) {
        self.update.unmount();
        self.system.unmount();
    }
}

pub fn use_about_data(ctx: &HookContext) -> AboutData {
    let client = ctx.client.clone();
    let update = Resource::new("update", "update_check_failed", move || {
        let client = client.clone();
        async move { client.check_for_update().await }
    })
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let system = Resource::new("system_info", "system_info_failed", move || {
        let client = client.clone();
        async move {
            let (app, platform) =
                futures::try_join!(client.app_info(), client.platform_info())?;
            Ok(SystemInfo::assemble(app, platform))
        }
    })
    .with_timeout(ctx.request_timeout);

    AboutData { update, system }
}
