use futures::FutureExt;
use futures::future::BoxFuture;
use payloads::{
    APIClient, ClientError, ListEndpoint, Page, Pagination, QueryOverrides,
    QueryParameters,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::{SettleOnDrop, report_failure};
use crate::ErrorReporter;

type ListFetchFn<T> = Arc<
    dyn Fn(QueryParameters) -> BoxFuture<'static, Result<Page<T>, ClientError>>
        + Send
        + Sync,
>;

/// Everything a list screen renders from.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Parameters the hook was last configured with. One-shot overrides
    /// passed to `refetch` are not recorded here.
    pub params: QueryParameters,
    /// Items of the last committed page, in server order.
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub is_loading: bool,
    /// Token of the most recently issued request. Only that request may
    /// commit.
    latest_request: u64,
}

// The request token is bookkeeping, not something a screen can observe.
impl<T: PartialEq> PartialEq for QueryState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.items == other.items
            && self.pagination == other.pagination
            && self.is_loading == other.is_loading
    }
}

impl<T> QueryState<T> {
    fn new(params: QueryParameters) -> Self {
        Self {
            params,
            items: Vec::new(),
            pagination: Pagination::default(),
            is_loading: false,
            latest_request: 0,
        }
    }

    pub fn total_items(&self) -> u64 {
        self.pagination.total
    }

    pub fn total_pages(&self) -> u64 {
        self.pagination.total_pages
    }
}

/// A paged, filtered, searchable view of one list endpoint.
///
/// Share it across tasks with an `Arc`. Requests may overlap; whichever was
/// issued last is the only one allowed to touch the state, no matter in
/// which order the responses arrive.
pub struct QueryHook<T> {
    fetch_fn: ListFetchFn<T>,
    state: watch::Sender<QueryState<T>>,
    reporter: Arc<dyn ErrorReporter>,
    context: String,
}

/// Build a query hook and run its first fetch.
///
/// # Example
///
/// ```rust,ignore
/// let users = use_query(
///     "users",
///     QueryParameters::new(1, 20).search("jane"),
///     move |params| {
///         let client = client.clone();
///         async move { client.list(&endpoints::USERS, &params).await }
///     },
///     toasts.clone(),
/// )
/// .await;
/// ```
pub async fn use_query<T, F, Fut>(
    context: impl Into<String>,
    params: QueryParameters,
    fetch_fn: F,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<T>
where
    T: Send + Sync + 'static,
    F: Fn(QueryParameters) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<T>, ClientError>> + Send + 'static,
{
    let hook = QueryHook::new(context, params, fetch_fn, reporter);
    hook.refetch(QueryOverrides::default()).await;
    hook
}

/// Query hook over one of the backend's list endpoints.
pub async fn use_resource_list<T>(
    client: Arc<APIClient>,
    endpoint: ListEndpoint,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    use_query(
        endpoint.path,
        params,
        move |params| {
            let client = client.clone();
            async move { client.list(&endpoint, &params).await }
        },
        reporter,
    )
    .await
}

impl<T: Send + Sync + 'static> QueryHook<T> {
    /// Build the hook without fetching; `use_query` also runs the first
    /// fetch.
    pub fn new<F, Fut>(
        context: impl Into<String>,
        params: QueryParameters,
        fetch_fn: F,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self
    where
        F: Fn(QueryParameters) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, ClientError>> + Send + 'static,
    {
        let fetch_fn: ListFetchFn<T> =
            Arc::new(move |params: QueryParameters| fetch_fn(params).boxed());
        let (state, _) = watch::channel(QueryState::new(params));
        Self {
            fetch_fn,
            state,
            reporter,
            context: context.into(),
        }
    }

    /// Replace the parameters. Fetches once if they differ from the current
    /// ones and does nothing otherwise. Returns whether a fetch was made.
    pub async fn set_params(&self, params: QueryParameters) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if state.params == params {
                return false;
            }
            state.params = params;
            true
        });
        if changed {
            self.refetch(QueryOverrides::default()).await;
        }
        changed
    }

    pub async fn set_page(&self, page: u32) -> bool {
        self.set_params(self.params().page(page)).await
    }

    pub async fn set_limit(&self, limit: u32) -> bool {
        self.set_params(self.params().limit(limit)).await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> bool {
        self.set_params(self.params().search(search)).await
    }

    pub async fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        self.set_params(self.params().filter(key, value)).await
    }

    /// Fetch once with `overrides` layered over the current parameters.
    pub async fn refetch(&self, overrides: QueryOverrides) {
        let mut request = 0;
        let mut params = QueryParameters::default();
        self.state.send_if_modified(|state| {
            state.latest_request += 1;
            request = state.latest_request;
            params = state.params.merged(&overrides);
            !std::mem::replace(&mut state.is_loading, true)
        });
        let _settle = SettleOnDrop::new(|| {
            self.state.send_if_modified(|state| {
                if state.latest_request != request || !state.is_loading {
                    return false;
                }
                state.is_loading = false;
                true
            });
        });
        tracing::debug!(
            "{}: request {request} with {:?}",
            self.context,
            params.to_query_pairs()
        );

        let result = (self.fetch_fn)(params).await;

        let mut error = None;
        let committed = self.state.send_if_modified(|state| {
            if state.latest_request != request {
                return false;
            }
            state.is_loading = false;
            match result {
                Ok(page) => {
                    state.items = page.items;
                    state.pagination = page.pagination;
                }
                Err(e) => error = Some(e),
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

    pub fn params(&self) -> QueryParameters {
        self.state.borrow().params.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn total_items(&self) -> u64 {
        self.state.borrow().total_items()
    }

    pub fn total_pages(&self) -> u64 {
        self.state.borrow().total_pages()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone + Send + Sync + 'static> QueryHook<T> {
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }
}
