pub mod toast;

pub use toast::{RetryAction, Toast, ToastHandle, ToastType};
