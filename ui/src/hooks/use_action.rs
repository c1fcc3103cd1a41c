use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};
use payloads::{ClientError, Validate};

use super::Refreshable;
use crate::contexts::toast::{RetryAction, Toast, ToastHandle};

type RunFn<P, R> = Rc<dyn Fn(P) -> LocalBoxFuture<'static, Result<R, ClientError>>>;
type SuccessToastFn<P, R> = Rc<dyn Fn(&P, &R) -> Toast>;

/// Sets a flag for as long as the guard lives.
struct PendingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> PendingGuard<'a> {
    fn try_set(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// A one-shot command that mutates backend state.
///
/// Carries its own `pending` flag, separate from any resource's loading
/// state. After a success it refreshes its dependent resources instead of
/// patching their data. Failures become a toast and a `None` return.
pub struct Action<P, R> {
    label: &'static str,
    run_fn: RunFn<P, R>,
    pending: Rc<Cell<bool>>,
    toasts: ToastHandle,
    dependents: Vec<Rc<dyn Refreshable>>,
    success_toast: Option<SuccessToastFn<P, R>>,
}

impl<P, R> Clone for Action<P, R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            run_fn: self.run_fn.clone(),
            pending: self.pending.clone(),
            toasts: self.toasts.clone(),
            dependents: self.dependents.clone(),
            success_toast: self.success_toast.clone(),
        }
    }
}

impl<P, R> Action<P, R>
where
    P: Validate + Clone + 'static,
    R: 'static,
{
    /// `label` names the action in notifications, e.g. "Clean cache".
    pub fn new<F, Fut>(label: &'static str, toasts: ToastHandle, run_fn: F) -> Self
    where
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = Result<R, ClientError>> + 'static,
    {
        Self {
            label,
            run_fn: Rc::new(move |params| run_fn(params).boxed_local()),
            pending: Rc::new(Cell::new(false)),
            toasts,
            dependents: Vec::new(),
            success_toast: None,
        }
    }

    /// Refresh `resource` after every successful run.
    pub fn refreshes<D>(mut self, resource: &D) -> Self
    where
        D: Refreshable + Clone + 'static,
    {
        self.dependents.push(Rc::new(resource.clone()));
        self
    }

    pub fn with_success_toast<F>(mut self, toast: F) -> Self
    where
        F: Fn(&P, &R) -> Toast + 'static,
    {
        self.success_toast = Some(Rc::new(toast));
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Run the command once.
    ///
    /// Returns `None` when the parameters are invalid, when a run is already
    /// pending, or when the backend call fails. The user has been notified in
    /// the first and last case.
    pub async fn run(&self, params: P) -> Option<R> {
        if let Err(error) = params.validate() {
            tracing::warn!(action = self.label, %error, "rejected invalid parameters");
            self.toasts.error(format!("{}: {error}", self.label));
            return None;
        }

        let Some(guard) = PendingGuard::try_set(&self.pending) else {
            tracing::debug!(action = self.label, "ignored: already pending");
            return None;
        };

        tracing::info!(action = self.label, "running");
        let outcome = (self.run_fn)(params.clone()).await;
        drop(guard);

        match outcome {
            Ok(result) => {
                join_all(self.dependents.iter().map(|dependent| dependent.trigger()))
                    .await;
                if let Some(toast) = &self.success_toast {
                    let toast = self.toasts.with_default_duration(toast(&params, &result));
                    self.toasts.add(toast);
                }
                tracing::info!(action = self.label, "succeeded");
                Some(result)
            }
            Err(error) => {
                tracing::warn!(
                    action = self.label,
                    kind = %error.kind(),
                    "failed: {error}"
                );
                let toast = Toast::error(format!("{} failed: {error}", self.label))
                    .no_auto_dismiss()
                    .with_retry(self.retry_with(params));
                self.toasts.add(toast);
                None
            }
        }
    }

    fn retry_with(&self, params: P) -> RetryAction {
        let action = self.clone();
        RetryAction::new("Retry", move || {
            let action = action.clone();
            let params = params.clone();
            async move {
                action.run(params).await;
            }
        })
    }
}
