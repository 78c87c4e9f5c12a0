use futures::FutureExt;
use futures::future::BoxFuture;
use payloads::ClientError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::{FetchState, SettleOnDrop, report_failure};
use crate::ErrorReporter;

type FetchFn<D, T> =
    Arc<dyn Fn(D) -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;
type ShouldFetchFn<D> = Arc<dyn Fn(&D) -> bool + Send + Sync>;

#[derive(Debug, Clone)]
pub struct FetchHookState<D, T> {
    pub deps: D,
    pub data: FetchState<T>,
    pub is_loading: bool,
    /// Message of the last failed fetch, cleared by the next success.
    pub error: Option<String>,
    latest_request: u64,
}

impl<D: PartialEq, T: PartialEq> PartialEq for FetchHookState<D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.deps == other.deps
            && self.data == other.data
            && self.is_loading == other.is_loading
            && self.error == other.error
    }
}

impl<D, T> FetchHookState<D, T> {
    /// True while the first fetch is in flight.
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }
}

/// Holds the result of one fetch keyed by `deps`.
///
/// A fetch is made on creation and whenever the deps change, unless
/// `should_fetch` rejects them. As with [`QueryHook`](super::QueryHook),
/// only the most recently issued request may commit.
pub struct FetchHook<D, T> {
    fetch_fn: FetchFn<D, T>,
    should_fetch: ShouldFetchFn<D>,
    state: watch::Sender<FetchHookState<D, T>>,
    reporter: Arc<dyn ErrorReporter>,
    context: String,
}

/// Generic fetch hook composer.
///
/// # Example
///
/// ```rust,ignore
/// let stats = use_fetch(
///     "dashboard stats",
///     (),
///     |_| true,
///     move |_| {
///         let client = client.clone();
///         async move { client.dashboard_stats().await }
///     },
///     toasts.clone(),
/// )
/// .await;
/// ```
pub async fn use_fetch<D, T, S, F, Fut>(
    context: impl Into<String>,
    deps: D,
    should_fetch: S,
    fetch_fn: F,
    reporter: Arc<dyn ErrorReporter>,
) -> FetchHook<D, T>
where
    D: PartialEq + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    S: Fn(&D) -> bool + Send + Sync + 'static,
    F: Fn(D) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
{
    let hook = FetchHook::new(context, deps, should_fetch, fetch_fn, reporter);
    hook.refetch().await;
    hook
}

impl<D, T> FetchHook<D, T>
where
    D: PartialEq + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub fn new<S, F, Fut>(
        context: impl Into<String>,
        deps: D,
        should_fetch: S,
        fetch_fn: F,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self
    where
        S: Fn(&D) -> bool + Send + Sync + 'static,
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let fetch_fn: FetchFn<D, T> =
            Arc::new(move |deps: D| fetch_fn(deps).boxed());
        let (state, _) = watch::channel(FetchHookState {
            deps,
            data: FetchState::NotFetched,
            is_loading: false,
            error: None,
            latest_request: 0,
        });
        Self {
            fetch_fn,
            should_fetch: Arc::new(should_fetch),
            state,
            reporter,
            context: context.into(),
        }
    }

    /// Replace the deps and refetch if they changed. Returns whether they
    /// changed.
    pub async fn set_deps(&self, deps: D) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if state.deps == deps {
                return false;
            }
            state.deps = deps;
            true
        });
        if changed {
            self.refetch().await;
        }
        changed
    }

    /// Fetch with the current deps. Deps that `should_fetch` rejects make
    /// no call but still supersede any request in flight.
    pub async fn refetch(&self) {
        let mut request = 0;
        let mut deps = None;
        self.state.send_if_modified(|state| {
            state.latest_request += 1;
            request = state.latest_request;
            let fetching = (self.should_fetch)(&state.deps);
            if fetching {
                deps = Some(state.deps.clone());
            }
            std::mem::replace(&mut state.is_loading, fetching) != fetching
        });
        let Some(deps) = deps else {
            tracing::debug!("{}: nothing to fetch", self.context);
            return;
        };
        let _settle = SettleOnDrop::new(|| {
            self.state.send_if_modified(|state| {
                if state.latest_request != request || !state.is_loading {
                    return false;
                }
                state.is_loading = false;
                true
            });
        });

        let result = (self.fetch_fn)(deps).await;

        let mut error = None;
        let committed = self.state.send_if_modified(|state| {
            if state.latest_request != request {
                return false;
            }
            state.is_loading = false;
            match result {
                Ok(data) => {
                    state.data = FetchState::Fetched(data);
                    state.error = None;
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    error = Some(e);
                }
            }
            true
        });

        if !committed {
            tracing::debug!("{}: dropping superseded request {request}", self.context);
            return;
        }
        if let Some(error) = error {
            report_failure(self.reporter.as_ref(), &self.context, &error);
        }
    }

    pub fn deps(&self) -> D {
        self.state.borrow().deps.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchHookState<D, T>> {
        self.state.subscribe()
    }
}

impl<D, T> FetchHook<D, T>
where
    D: PartialEq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn data(&self) -> FetchState<T> {
        self.state.borrow().data.clone()
    }

    pub fn snapshot(&self) -> FetchHookState<D, T> {
        self.state.borrow().clone()
    }
}
