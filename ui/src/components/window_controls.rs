use std::cell::{Cell, RefCell};
use std::rc::Rc;

use payloads::requests::{SetWindowFlag, WindowTarget};
use payloads::{APIClient, ClientError, WindowState};

use crate::contexts::toast::ToastHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowControl {
    Minimize,
    Maximize,
    Fullscreen,
    AlwaysOnTop,
    Close,
}

impl WindowControl {
    pub const ALL: [WindowControl; 5] = [
        WindowControl::Minimize,
        WindowControl::Maximize,
        WindowControl::Fullscreen,
        WindowControl::AlwaysOnTop,
        WindowControl::Close,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlButton {
    pub control: WindowControl,
    pub label: &'static str,
    pub enabled: bool,
    /// Toggle controls are shown pressed while their flag is set.
    pub active: bool,
}

/// Title bar buttons for one native window.
///
/// The displayed state is whatever the backend last reported; a click never
/// flips it locally.
#[derive(Clone)]
pub struct WindowControls {
    client: APIClient,
    toasts: ToastHandle,
    target: Rc<RefCell<Option<WindowTarget>>>,
    state: Rc<Cell<WindowState>>,
}

impl WindowControls {
    pub fn new(client: APIClient, toasts: ToastHandle) -> Self {
        Self {
            client,
            toasts,
            target: Rc::new(RefCell::new(None)),
            state: Rc::new(Cell::new(WindowState::default())),
        }
    }

    pub fn attach(&self, label: impl Into<String>) {
        let label = label.into();
        tracing::debug!(window = %label, "window handle attached");
        *self.target.borrow_mut() = Some(WindowTarget { label });
    }

    pub fn detach(&self) {
        *self.target.borrow_mut() = None;
        self.state.set(WindowState::default());
    }

    pub fn is_attached(&self) -> bool {
        self.target.borrow().is_some()
    }

    pub fn state(&self) -> WindowState {
        self.state.get()
    }

    pub fn buttons(&self) -> Vec<ControlButton> {
        let enabled = self.is_attached();
        let state = self.state.get();
        WindowControl::ALL
            .into_iter()
            .map(|control| {
                let (label, active) = match control {
                    WindowControl::Minimize => ("Minimize", false),
                    WindowControl::Maximize if state.is_maximized => ("Restore", true),
                    WindowControl::Maximize => ("Maximize", false),
                    WindowControl::Fullscreen => ("Fullscreen", state.is_fullscreen),
                    WindowControl::AlwaysOnTop => {
                        ("Always on top", state.is_always_on_top)
                    }
                    WindowControl::Close => ("Close", false),
                };
                ControlButton {
                    control,
                    label,
                    enabled,
                    active,
                }
            })
            .collect()
    }

    /// Re-read the window state from the backend. Keeps the previous state
    /// when detached or when the query fails.
    pub async fn sync(&self) {
        let Some(target) = self.target.borrow().clone() else {
            return;
        };
        match self.client.window_state(&target).await {
            Ok(state) => self.state.set(state),
            Err(e) => {
                tracing::warn!(window = %target.label, "failed to read window state: {e}");
            }
        }
    }

    /// Send the control's command, then reconcile with the backend.
    ///
    /// Returns false without any call while no window is attached.
    pub async fn click(&self, control: WindowControl) -> bool {
        let Some(target) = self.target.borrow().clone() else {
            tracing::debug!(?control, "ignored click: no window attached");
            return false;
        };

        let outcome = self.send(control, &target).await;
        if let Err(e) = &outcome {
            tracing::warn!(?control, window = %target.label, "window command failed: {e}");
            self.toasts.error(format!("Window action failed: {e}"));
        }
        self.sync().await;
        outcome.is_ok()
    }

    async fn send(
        &self,
        control: WindowControl,
        target: &WindowTarget,
    ) -> Result<(), ClientError> {
        let state = self.state.get();
        let flag = |enabled| SetWindowFlag {
            label: target.label.clone(),
            enabled,
        };
        match control {
            WindowControl::Minimize => self.client.window_minimize(target).await,
            WindowControl::Maximize => self.client.window_toggle_maximize(target).await,
            WindowControl::Fullscreen => {
                self.client
                    .window_set_fullscreen(&flag(!state.is_fullscreen))
                    .await
            }
            WindowControl::AlwaysOnTop => {
                self.client
                    .window_set_always_on_top(&flag(!state.is_always_on_top))
                    .await
            }
            WindowControl::Close => self.client.window_close(target).await,
        }
    }
}
