use payloads::{APIClient, ClientError, DetailEndpoint};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::{FetchHook, FetchHookState};
use crate::ErrorReporter;

/// One entity looked up by id.
///
/// Without an id (or with one that prints as blank) no call is made and the
/// data stays where it was. Changing the id refetches.
pub struct DetailHook<I, T> {
    inner: FetchHook<Option<I>, Option<T>>,
}

fn has_id<I: Display>(id: &Option<I>) -> bool {
    id.as_ref().is_some_and(|id| !id.to_string().trim().is_empty())
}

pub async fn use_detail<I, T, F, Fut>(
    context: impl Into<String>,
    id: Option<I>,
    fetch_fn: F,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<I, T>
where
    I: Display + PartialEq + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<T>, ClientError>> + Send + 'static,
{
    let hook = DetailHook::new(context, id, fetch_fn, reporter);
    hook.refetch().await;
    hook
}

/// Detail hook over one of the backend's detail endpoints.
pub(crate) async fn use_resource_detail<I, T>(
    client: Arc<APIClient>,
    endpoint: DetailEndpoint,
    id: Option<I>,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<I, T>
where
    I: Display + PartialEq + Clone + Send + Sync + 'static,
    T: DeserializeOwned + Send + Sync + 'static,
{
    use_detail(
        endpoint.path,
        id,
        move |id| {
            let client = client.clone();
            async move { client.detail(&endpoint, &id).await }
        },
        reporter,
    )
    .await
}

impl<I, T> DetailHook<I, T>
where
    I: Display + PartialEq + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub fn new<F, Fut>(
        context: impl Into<String>,
        id: Option<I>,
        fetch_fn: F,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, ClientError>> + Send + 'static,
    {
        let fetch_fn = Arc::new(fetch_fn);
        let inner = FetchHook::new(
            context,
            id,
            has_id::<I>,
            move |id: Option<I>| {
                let fetch_fn = fetch_fn.clone();
                async move {
                    match id {
                        Some(id) => fetch_fn(id).await,
                        None => Ok(None),
                    }
                }
            },
            reporter,
        );
        Self { inner }
    }

    /// Point the hook at another entity. Returns whether the id changed.
    pub async fn set_id(&self, id: Option<I>) -> bool {
        self.inner.set_deps(id).await
    }

    pub async fn refetch(&self) {
        self.inner.refetch().await
    }

    pub fn id(&self) -> Option<I> {
        self.inner.deps()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.error()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchHookState<Option<I>, Option<T>>> {
        self.inner.subscribe()
    }
}

impl<I, T> DetailHook<I, T>
where
    I: Display + PartialEq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// The entity, or `None` until one has been loaded.
    pub fn data(&self) -> Option<T> {
        self.inner.data().into_option().flatten()
    }
}
