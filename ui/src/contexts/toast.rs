use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use jiff::{Span, Timestamp};
use uuid::Uuid;

pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Error,
    Warning,
    Success,
    Info,
}

type RetryFn = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Re-invokes whatever failed, from the notification itself.
#[derive(Clone)]
pub struct RetryAction {
    pub label: String,
    run: RetryFn,
}

impl RetryAction {
    pub fn new<F, Fut>(label: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Self {
            label: label.into(),
            run: Rc::new(move || run().boxed_local()),
        }
    }

    pub async fn run(&self) {
        (self.run)().await;
    }
}

impl fmt::Debug for RetryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<u32>, // milliseconds, None for no auto-dismiss
    pub created_at: Timestamp,
    pub retry: Option<RetryAction>,
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(DEFAULT_TOAST_DURATION_MS),
            created_at: Timestamp::now(),
            retry: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn no_auto_dismiss(mut self) -> Self {
        self.duration = None;
        self
    }

    pub fn with_retry(mut self, retry: RetryAction) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.duration
            .map(|ms| self.created_at + Span::new().milliseconds(i64::from(ms)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToastState {
    /// In the order they were raised.
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
    Clear,
    PruneExpired(Timestamp),
}

impl ToastState {
    fn reduce(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => {
                self.toasts.push(toast);
            }
            ToastAction::Remove(id) => {
                self.toasts.retain(|toast| toast.id != id);
            }
            ToastAction::Clear => {
                self.toasts.clear();
            }
            ToastAction::PruneExpired(now) => {
                self.toasts.retain(|toast| {
                    toast.expires_at().is_none_or(|expires| expires > now)
                });
            }
        }
    }
}

/// Shared handle to the notification queue.
///
/// Notifications are separate from logging: every toast is also written to
/// the log, but the queue only ever holds what the user should see.
#[derive(Clone)]
pub struct ToastHandle {
    state: Rc<RefCell<ToastState>>,
    default_duration: Option<u32>,
}

impl Default for ToastHandle {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TOAST_DURATION_MS))
    }
}

impl ToastHandle {
    pub fn new(default_duration: Option<u32>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ToastState::default())),
            default_duration,
        }
    }

    fn dispatch(&self, action: ToastAction) {
        self.state.borrow_mut().reduce(action);
    }

    pub fn add(&self, toast: Toast) -> Uuid {
        match toast.toast_type {
            ToastType::Error => tracing::error!(toast = %toast.id, "{}", toast.message),
            ToastType::Warning => tracing::warn!(toast = %toast.id, "{}", toast.message),
            ToastType::Success | ToastType::Info => {
                tracing::info!(toast = %toast.id, "{}", toast.message)
            }
        }
        let id = toast.id;
        self.dispatch(ToastAction::Add(toast));
        id
    }

    /// Give `toast` the queue's configured display time.
    pub(crate) fn with_default_duration(&self, mut toast: Toast) -> Toast {
        toast.duration = self.default_duration;
        toast
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.add(self.with_default_duration(Toast::error(message.into())))
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.add(self.with_default_duration(Toast::warning(message.into())))
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.add(self.with_default_duration(Toast::success(message.into())))
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.add(self.with_default_duration(Toast::info(message.into())))
    }

    pub fn remove(&self, id: Uuid) {
        self.dispatch(ToastAction::Remove(id));
    }

    pub fn clear(&self) {
        self.dispatch(ToastAction::Clear);
    }

    /// Drop toasts whose display time has passed. Returns how many were
    /// dropped.
    pub fn prune_expired(&self, now: Timestamp) -> usize {
        let before = self.state.borrow().toasts.len();
        self.dispatch(ToastAction::PruneExpired(now));
        before - self.state.borrow().toasts.len()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Toast> {
        self.state
            .borrow()
            .toasts
            .iter()
            .find(|toast| toast.id == id)
            .cloned()
    }

    /// Dismiss a toast and run its retry action, if it has one.
    pub async fn retry(&self, id: Uuid) -> bool {
        let Some(retry) = self.get(id).and_then(|toast| toast.retry) else {
            return false;
        };
        self.remove(id);
        retry.run().await;
        true
    }
}
