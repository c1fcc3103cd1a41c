use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use jiff::Timestamp;
use payloads::{ClientError, ErrorKind, Validate};

use super::FetchState;

type FetchFn<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, ClientError>>>;

/// Lifecycle of a resource.
///
/// Moves `Idle → Loading → {Ready, Failed}`, and back to `Loading` on every
/// later refresh. There is no path from `Idle` straight to `Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// A failed refresh, as views see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceError {
    pub kind: ErrorKind,
    /// User-facing category, e.g. `network_error` or `update_check_failed`.
    pub tag: &'static str,
    pub message: String,
}

impl ResourceError {
    pub fn from_client(error: &ClientError, fallback_tag: &'static str) -> Self {
        let kind = error.kind();
        Self {
            kind,
            tag: kind.tag(fallback_tag),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Point-in-time copy of a resource's state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub status: Status,
    pub is_loading: bool,
    pub error: Option<ResourceError>,
}

/// Which of the mutually exclusive branches a view should render.
#[derive(Debug, PartialEq)]
pub enum RenderState<'a, T> {
    /// Nothing to show yet; render a skeleton.
    Loading,
    /// Nothing to show and the last attempt failed; render an alert with
    /// a retry control.
    Error(&'a ResourceError),
    /// Fetched successfully, but there is nothing in it.
    Empty,
    /// Data to show. `error` is set when a later refresh failed and the
    /// data is stale.
    Ready {
        data: &'a T,
        is_refreshing: bool,
        error: Option<&'a ResourceError>,
    },
}

impl<T> FetchHookReturn<T> {
    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }

    /// Pick the render branch for this snapshot.
    ///
    /// Once a refresh has failed with nothing to show, this is `Error`,
    /// never `Loading`, so a skeleton cannot hang after a failure.
    pub fn render_state<F>(&self, is_empty: F) -> RenderState<'_, T>
    where
        F: Fn(&T) -> bool,
    {
        match self.data.as_ref() {
            None => match &self.error {
                Some(error) => RenderState::Error(error),
                None => RenderState::Loading,
            },
            Some(data) if is_empty(data) => match &self.error {
                Some(error) => RenderState::Error(error),
                None => RenderState::Empty,
            },
            Some(data) => RenderState::Ready {
                data,
                is_refreshing: self.is_loading,
                error: self.error.as_ref(),
            },
        }
    }
}

struct ResourceState<T> {
    data: FetchState<T>,
    status: Status,
    error: Option<ResourceError>,
    latest_request: u64,
    in_flight: Vec<(u64, AbortHandle)>,
    mounted: bool,
    last_fetched_at: Option<Timestamp>,
}

/// One asynchronously fetched piece of view state.
///
/// Cloning is cheap and every clone shares the same state.
pub struct Resource<T> {
    name: &'static str,
    failure_tag: &'static str,
    timeout: Option<Duration>,
    fetch_fn: FetchFn<T>,
    state: Rc<RefCell<ResourceState<T>>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            failure_tag: self.failure_tag,
            timeout: self.timeout,
            fetch_fn: self.fetch_fn.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + 'static> Resource<T> {
    /// Wrap a read operation.
    ///
    /// `failure_tag` is the tag reported for failures that are neither
    /// network nor timeout problems.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let client = ctx.client.clone();
    /// let info = Resource::new("cache_info", "cache_info_failed", move || {
    ///     let client = client.clone();
    ///     async move { client.cache_info().await }
    /// });
    /// ```
    pub fn new<F, Fut>(
        name: &'static str,
        failure_tag: &'static str,
        fetch_fn: F,
    ) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ClientError>> + 'static,
    {
        Self {
            name,
            failure_tag,
            timeout: None,
            fetch_fn: Rc::new(move || fetch_fn().boxed_local()),
            state: Rc::new(RefCell::new(ResourceState {
                data: FetchState::NotFetched,
                status: Status::Idle,
                error: None,
                latest_request: 0,
                in_flight: Vec::new(),
                mounted: true,
                last_fetched_at: None,
            })),
        }
    }

    /// Wrap a read operation that takes request parameters.
    ///
    /// `params` are checked before every fetch. Invalid parameters fail the
    /// refresh with [`ErrorKind::InvalidInput`] and nothing is sent.
    pub fn with_params<P, F, Fut>(
        name: &'static str,
        failure_tag: &'static str,
        params: P,
        fetch_fn: F,
    ) -> Self
    where
        P: Validate + Clone + 'static,
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = Result<T, ClientError>> + 'static,
    {
        Self::new(name, failure_tag, move || {
            let fetch = params.validate().map(|()| fetch_fn(params.clone()));
            async move {
                match fetch {
                    Ok(fetch) => fetch.await,
                    Err(error) => Err(ClientError::from(error)),
                }
            }
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.as_ref().cloned()
    }

    pub fn error(&self) -> Option<ResourceError> {
        self.state.borrow().error.clone()
    }

    pub fn last_fetched_at(&self) -> Option<Timestamp> {
        self.state.borrow().last_fetched_at
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    pub fn snapshot(&self) -> FetchHookReturn<T> {
        let state = self.state.borrow();
        FetchHookReturn {
            data: state.data.clone(),
            status: state.status,
            is_loading: state.status == Status::Loading,
            error: state.error.clone(),
        }
    }

    /// Fetch again, keeping the current data visible until the result
    /// arrives.
    ///
    /// Never fails to the caller; the outcome is only observable through
    /// the resource state. A response that arrives after a newer refresh was
    /// started is dropped, so the latest request always wins.
    pub async fn refresh(&self) {
        let (request_id, registration) = {
            let mut state = self.state.borrow_mut();
            if !state.mounted {
                tracing::debug!(resource = self.name, "refresh skipped: unmounted");
                return;
            }
            state.latest_request += 1;
            state.status = Status::Loading;
            state.error = None;

            let (handle, registration) = AbortHandle::new_pair();
            let request_id = state.latest_request;
            state.in_flight.push((request_id, handle));
            (request_id, registration)
        };

        tracing::debug!(resource = self.name, request_id, "refreshing");
        let fetch = Abortable::new((self.fetch_fn)(), registration);
        let outcome = match self.timeout {
            Some(budget) => tokio::time::timeout(budget, fetch)
                .await
                .unwrap_or(Ok(Err(ClientError::Timeout(budget)))),
            None => fetch.await,
        };

        let mut state = self.state.borrow_mut();
        state.in_flight.retain(|(id, _)| *id != request_id);

        let Ok(result) = outcome else {
            tracing::debug!(resource = self.name, request_id, "refresh aborted");
            return;
        };
        if !state.mounted {
            return;
        }
        if request_id != state.latest_request {
            tracing::debug!(
                resource = self.name,
                request_id,
                latest = state.latest_request,
                "discarding stale response"
            );
            return;
        }

        match result {
            Ok(value) => {
                state.data = FetchState::Fetched(value);
                state.status = Status::Ready;
                state.error = None;
                state.last_fetched_at = Some(Timestamp::now());
                tracing::debug!(resource = self.name, request_id, "refresh succeeded");
            }
            Err(error) => {
                let error = ResourceError::from_client(&error, self.failure_tag);
                tracing::warn!(
                    resource = self.name,
                    tag = error.tag,
                    "refresh failed: {}",
                    error.message
                );
                state.error = Some(error);
                state.status = Status::Failed;
            }
        }
    }

    /// Tear down with the owning view: abort in-flight fetches and ignore
    /// any later refresh.
    pub fn unmount(&self) {
        let mut state = self.state.borrow_mut();
        state.mounted = false;
        for (_, handle) in state.in_flight.drain(..) {
            handle.abort();
        }
    }
}

/// A resource whose concrete data type does not matter to the caller.
///
/// Actions and the app hold their dependents through this so one action can
/// refresh resources of different types.
pub trait Refreshable {
    fn resource_name(&self) -> &'static str;
    fn trigger(&self) -> LocalBoxFuture<'_, ()>;
    fn teardown(&self);
}

impl<T: Clone + 'static> Refreshable for Resource<T> {
    fn resource_name(&self) -> &'static str {
        self.name
    }

    fn trigger(&self) -> LocalBoxFuture<'_, ()> {
        self.refresh().boxed_local()
    }

    fn teardown(&self) {
        self.unmount();
    }
}
