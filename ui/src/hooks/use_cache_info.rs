use std::cell::Cell;
use std::rc::Rc;

use payloads::requests::{CleanCache, CleanType};
use payloads::{CacheInfo, CleanResult, CleanupPreview, RepairResult, VerifyResult};

use super::{Action, HookContext, Resource};
use crate::components::CacheCleanupDialog;
use crate::contexts::toast::Toast;

/// Package cache: size summary plus the maintenance commands.
#[derive(Clone)]
pub struct CacheHooks {
    ctx: HookContext,
    pub info: Resource<CacheInfo>,
    pub clean: Action<CleanCache, CleanResult>,
    pub verify: Action<(), VerifyResult>,
    pub repair: Action<(), RepairResult>,
}

pub fn use_cache_info(ctx: &HookContext) -> CacheHooks {
    let client = ctx.client.clone();
    let info = Resource::new("cache_info", "cache_info_failed", move || {
        let client = client.clone();
        async move { client.cache_info().await }
    })
    .with_timeout(ctx.request_timeout);

    let client = ctx.client.clone();
    let clean = Action::new("Clean cache", ctx.toasts.clone(), move |details| {
        let client = client.clone();
        async move { client.cache_clean(&details).await }
    })
    .refreshes(&info)
    .with_success_toast(|_: &CleanCache, result: &CleanResult| {
        Toast::success(format!(
            "Cleaned {} files, freed {}",
            result.deleted_count, result.freed_human
        ))
    });

    let client = ctx.client.clone();
    let verify = Action::new("Verify cache", ctx.toasts.clone(), move |()| {
        let client = client.clone();
        async move { client.cache_verify().await }
    })
    .with_success_toast(|_: &(), result: &VerifyResult| {
        if result.is_healthy {
            Toast::success(format!(
                "Cache is healthy ({} entries checked)",
                result.valid_entries
            ))
        } else {
            Toast::warning(format!(
                "Cache has problems: {} missing, {} corrupted, {} size mismatches",
                result.missing_files, result.corrupted_files, result.size_mismatches
            ))
        }
    });

    let client = ctx.client.clone();
    let repair = Action::new("Repair cache", ctx.toasts.clone(), move |()| {
        let client = client.clone();
        async move { client.cache_repair().await }
    })
    .refreshes(&info)
    .with_success_toast(|_: &(), result: &RepairResult| {
        Toast::success(format!(
            "Removed {} broken entries, freed {}",
            result.removed_entries, result.freed_human
        ))
    });

    CacheHooks {
        ctx: ctx.clone(),
        info,
        clean,
        verify,
        repair,
    }
}

impl CacheHooks {
    /// Preview of what a clean would remove. Reads `clean_type` at refresh
    /// time, so changing the cell and refreshing previews the new type.
    pub fn cleanup_preview(
        &self,
        clean_type: Rc<Cell<CleanType>>,
    ) -> Resource<CleanupPreview> {
        let client = self.ctx.client.clone();
        Resource::new("cache_clean_preview", "cache_preview_failed", move || {
            let client = client.clone();
            let clean_type = clean_type.get();
            async move { client.cache_clean_preview(clean_type).await }
        })
        .with_timeout(self.ctx.request_timeout)
    }

    pub fn cleanup_dialog(&self) -> CacheCleanupDialog {
        CacheCleanupDialog::new(self)
    }

    pub fn unmount(&self) {
        self.info.unmount();
    }
}
