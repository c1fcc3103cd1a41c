use std::cell::Cell;
use std::rc::Rc;

use payloads::requests::{CleanCache, CleanType};
use payloads::{CleanResult, CleanupPreview};

use super::dialog::{Dialog, DialogOutcome, DialogStep};
use crate::hooks::{Action, CacheHooks, FetchHookReturn, Resource, Status};

#[derive(Debug, Clone, PartialEq)]
pub enum CleanupStep {
    /// Showing what would be removed.
    Preview,
    /// Waiting for the user to confirm the deletion.
    Confirm,
    Result(CleanResult),
}

impl DialogStep for CleanupStep {
    fn index(&self) -> usize {
        match self {
            CleanupStep::Preview => 0,
            CleanupStep::Confirm => 1,
            CleanupStep::Result(_) => 2,
        }
    }
}

/// The preview, confirm and result flow for cleaning the package cache.
pub struct CacheCleanupDialog {
    dialog: Dialog<CleanupStep>,
    clean_type: Rc<Cell<CleanType>>,
    use_trash: bool,
    preview: Resource<CleanupPreview>,
    clean: Action<CleanCache, CleanResult>,
}

impl CacheCleanupDialog {
    pub fn new(cache: &CacheHooks) -> Self {
        let clean_type = Rc::new(Cell::new(CleanType::default()));
        Self {
            dialog: Dialog::new(),
            preview: cache.cleanup_preview(clean_type.clone()),
            clean_type,
            use_trash: true,
            clean: cache.clean.clone(),
        }
    }

    pub fn step(&self) -> Option<&CleanupStep> {
        self.dialog.step()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn last_outcome(&self) -> Option<DialogOutcome> {
        self.dialog.last_outcome()
    }

    pub fn clean_type(&self) -> CleanType {
        self.clean_type.get()
    }

    pub fn is_cleaning(&self) -> bool {
        self.clean.is_pending()
    }

    /// Open on the preview step and load it.
    pub async fn open(&mut self) {
        if self.dialog.open(CleanupStep::Preview) {
            self.preview.refresh().await;
        }
    }

    /// Switch what gets cleaned and reload the preview.
    pub async fn set_clean_type(&self, clean_type: CleanType) {
        if self.dialog.step() != Some(&CleanupStep::Preview) {
            return;
        }
        self.clean_type.set(clean_type);
        self.preview.refresh().await;
    }

    pub fn set_use_trash(&mut self, use_trash: bool) {
        self.use_trash = use_trash;
    }

    pub fn preview(&self) -> FetchHookReturn<CleanupPreview> {
        self.preview.snapshot()
    }

    pub fn preview_resource(&self) -> &Resource<CleanupPreview> {
        &self.preview
    }

    /// The preview on screen is settled, non-empty and for the selected
    /// clean type.
    ///
    /// A preview kept from another clean type while the new one reloads or
    /// after it failed does not count.
    pub fn can_proceed(&self) -> bool {
        if self.preview.status() != Status::Ready {
            return false;
        }
        self.preview.data().is_some_and(|preview| {
            preview.clean_type == self.clean_type.get() && preview.total_count > 0
        })
    }

    /// Preview → Confirm.
    pub fn proceed(&mut self) -> bool {
        self.can_proceed()
            && self.dialog.step() == Some(&CleanupStep::Preview)
            && self.dialog.advance(CleanupStep::Confirm)
    }

    /// Run the clean. On success move to the result step. On failure stay
    /// on Confirm; the error toast carries a retry.
    pub async fn confirm(&mut self) -> Option<CleanResult> {
        if self.dialog.step() != Some(&CleanupStep::Confirm) {
            return None;
        }
        let details = CleanCache {
            clean_type: self.clean_type.get(),
            use_trash: self.use_trash,
        };
        let result = self.clean.run(details).await?;
        self.dialog.advance(CleanupStep::Result(result.clone()));
        Some(result)
    }

    /// Close after the result has been shown.
    pub fn finish(&mut self) -> Option<DialogOutcome> {
        if !matches!(self.dialog.step(), Some(CleanupStep::Result(_))) {
            return None;
        }
        self.dialog.confirm();
        self.dialog.close()
    }

    pub fn cancel(&mut self) -> Option<DialogOutcome> {
        self.dialog.dismiss()
    }
}

impl Drop for CacheCleanupDialog {
    fn drop(&mut self) {
        self.preview.unmount();
    }
}
