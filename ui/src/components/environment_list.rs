use payloads::Environment;

use super::list::{ListView, ShowMore};
use crate::hooks::{FetchHookReturn, ResourceError};

pub const NO_MATCHES_MESSAGE: &str = "No environments match the filter";
pub const NO_ENVIRONMENTS_MESSAGE: &str = "No environments detected";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvironmentFilter {
    /// Runtimes whose provider works on this machine.
    #[default]
    Available,
    Installed,
    All,
}

/// Filter, search and show-more state of the environments page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentList {
    pub filter: EnvironmentFilter,
    pub search: String,
    pub show_more: ShowMore,
}

impl EnvironmentList {
    /// Stable identity of a row across refreshes and filter changes.
    pub fn key(env: &Environment) -> &str {
        &env.env_type
    }

    pub fn set_filter(&mut self, filter: EnvironmentFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn toggle_show_more(&mut self) {
        self.show_more.toggle();
    }

    pub fn is_filtering(&self) -> bool {
        self.filter != EnvironmentFilter::All || !self.search.trim().is_empty()
    }

    pub fn matches(&self, env: &Environment) -> bool {
        let passes_filter = match self.filter {
            EnvironmentFilter::Available => env.available,
            EnvironmentFilter::Installed => env.is_installed(),
            EnvironmentFilter::All => true,
        };
        let query = self.search.trim().to_lowercase();
        passes_filter
            && (query.is_empty()
                || env.env_type.to_lowercase().contains(&query)
                || env.provider.to_lowercase().contains(&query))
    }

    /// Matching environments in backend order.
    pub fn filtered<'a>(&self, envs: &'a [Environment]) -> Vec<&'a Environment> {
        envs.iter().filter(|env| self.matches(env)).collect()
    }

    pub fn render<'a>(
        &self,
        envs: Option<&'a [Environment]>,
        is_loading: bool,
        error: Option<&'a ResourceError>,
    ) -> ListView<'a, Environment> {
        let empty_message = if self.is_filtering() {
            NO_MATCHES_MESSAGE
        } else {
            NO_ENVIRONMENTS_MESSAGE
        };
        ListView::build(
            envs.map(|envs| self.filtered(envs)),
            is_loading,
            error,
            empty_message,
            &self.show_more,
        )
    }

    pub fn view<'a>(
        &self,
        snapshot: &'a FetchHookReturn<Vec<Environment>>,
    ) -> ListView<'a, Environment> {
        self.render(
            snapshot.data.as_ref().map(Vec::as_slice),
            snapshot.is_loading,
            snapshot.error.as_ref(),
        )
    }
}
