use crate::hooks::ResourceError;

pub const DEFAULT_COLLAPSED_LIMIT: usize = 6;

/// Exactly one of the branches a list can show.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Error {
        error: &'a ResourceError,
        /// False while a retry is already running.
        can_retry: bool,
    },
    Empty(&'static str),
    Items {
        items: Vec<&'a T>,
        /// Items before show-more truncation.
        total: usize,
        hidden: usize,
        is_refreshing: bool,
        /// A later refresh failed; `items` are the last known good ones.
        stale_error: Option<&'a ResourceError>,
    },
}

impl<'a, T> ListView<'a, T> {
    /// `items` is `None` until the first successful fetch.
    pub fn build(
        items: Option<Vec<&'a T>>,
        is_loading: bool,
        error: Option<&'a ResourceError>,
        empty_message: &'static str,
        show_more: &ShowMore,
    ) -> Self {
        match (items, error) {
            (None, None) => ListView::Loading,
            (None, Some(error)) => ListView::Error {
                error,
                can_retry: !is_loading,
            },
            (Some(items), Some(error)) if items.is_empty() => ListView::Error {
                error,
                can_retry: !is_loading,
            },
            (Some(items), None) if items.is_empty() => ListView::Empty(empty_message),
            (Some(items), stale_error) => {
                let total = items.len();
                let (items, hidden) = show_more.apply(items);
                ListView::Items {
                    items,
                    total,
                    hidden,
                    is_refreshing: is_loading,
                    stale_error,
                }
            }
        }
    }

    pub fn items(&self) -> &[&'a T] {
        match self {
            ListView::Items { items, .. } => items,
            _ => &[],
        }
    }
}

/// Collapses long lists to their first few items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    pub expanded: bool,
    pub collapsed_limit: usize,
}

impl Default for ShowMore {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSED_LIMIT)
    }
}

impl ShowMore {
    pub fn new(collapsed_limit: usize) -> Self {
        Self {
            expanded: false,
            collapsed_limit,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Returns the visible items and how many were hidden.
    pub fn apply<I>(&self, mut items: Vec<I>) -> (Vec<I>, usize) {
        if self.expanded || items.len() <= self.collapsed_limit {
            return (items, 0);
        }
        let hidden = items.len() - self.collapsed_limit;
        items.truncate(self.collapsed_limit);
        (items, hidden)
    }

    /// Toggle label, or `None` when everything fits.
    pub fn label(&self, total: usize) -> Option<String> {
        if total <= self.collapsed_limit {
            return None;
        }
        Some(if self.expanded {
            "Show less".to_string()
        } else {
            format!("Show more ({})", total - self.collapsed_limit)
        })
    }
}
