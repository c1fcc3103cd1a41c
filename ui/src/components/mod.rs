//! View models: the state and decisions behind each widget, without the
//! markup.

pub mod cache_cleanup_dialog;
pub mod dialog;
pub mod environment_list;
pub mod list;
pub mod system_info_card;
pub mod window_controls;

pub use cache_cleanup_dialog::{CacheCleanupDialog, CleanupStep};
pub use dialog::{Dialog, DialogOutcome, DialogPhase, DialogStep};
pub use environment_list::{EnvironmentFilter, EnvironmentList};
pub use list::{ListView, ShowMore};
pub use system_info_card::{CardAlert, SystemInfoCard, SystemInfoCardView};
pub use window_controls::{ControlButton, WindowControl, WindowControls};
