use payloads::SystemInfo;

use crate::hooks::{RenderState, Resource, ResourceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAlert {
    pub tag: &'static str,
    pub message: String,
}

impl From<&ResourceError> for CardAlert {
    fn from(error: &ResourceError) -> Self {
        Self {
            tag: error.tag,
            message: error.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SystemInfoCardView {
    Skeleton,
    /// Nothing known yet and the fetch failed; offers Retry.
    Alert(CardAlert),
    /// Last known info. `alert` is set when the latest refresh failed.
    Info {
        info: SystemInfo,
        alert: Option<CardAlert>,
        is_refreshing: bool,
    },
}

/// Version and platform card on the about page.
#[derive(Clone)]
pub struct SystemInfoCard {
    system: Resource<SystemInfo>,
}

impl SystemInfoCard {
    pub fn new(system: &Resource<SystemInfo>) -> Self {
        Self {
            system: system.clone(),
        }
    }

    pub fn view(&self) -> SystemInfoCardView {
        let snapshot = self.system.snapshot();
        match snapshot.render_state(|_| false) {
            RenderState::Loading | RenderState::Empty => SystemInfoCardView::Skeleton,
            RenderState::Error(error) => SystemInfoCardView::Alert(error.into()),
            RenderState::Ready {
                data,
                is_refreshing,
                error,
            } => SystemInfoCardView::Info {
                info: data.clone(),
                alert: error.map(CardAlert::from),
                is_refreshing,
            },
        }
    }

    pub async fn retry(&self) {
        self.system.refresh().await;
    }
}
