use futures::FutureExt;
use futures::future::BoxFuture;
use payloads::requests::Validate;
use payloads::{ClientError, Envelope};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::{SettleOnDrop, report_failure};
use crate::ErrorReporter;

type MutateFn<P> =
    Arc<dyn Fn(P) -> BoxFuture<'static, Result<Envelope, ClientError>> + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct MutationState {
    pub is_loading: bool,
    /// Server message of the last successful call, if it sent one.
    pub last_message: Option<String>,
    /// Message of the last failed call.
    pub last_error: Option<String>,
    in_flight: usize,
}

impl PartialEq for MutationState {
    fn eq(&self, other: &Self) -> bool {
        self.is_loading == other.is_loading
            && self.last_message == other.last_message
            && self.last_error == other.last_error
    }
}

/// Wraps one state-changing call.
///
/// `execute` reports success as a bool and never fails; errors go to the
/// reporter. Lists affected by the change are not refetched here, the
/// caller decides which ones to refresh.
pub struct MutationHook<P> {
    mutate_fn: MutateFn<P>,
    state: watch::Sender<MutationState>,
    reporter: Arc<dyn ErrorReporter>,
    context: String,
}

pub fn use_mutation<P, F, Fut>(
    context: impl Into<String>,
    mutate_fn: F,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<P>
where
    P: Validate + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Envelope, ClientError>> + Send + 'static,
{
    let mutate_fn: MutateFn<P> = Arc::new(move |payload: P| mutate_fn(payload).boxed());
    let (state, _) = watch::channel(MutationState::default());
    MutationHook {
        mutate_fn,
        state,
        reporter,
        context: context.into(),
    }
}

impl<P: Validate + Send + 'static> MutationHook<P> {
    /// Run the call. Returns true iff the server accepted it.
    pub async fn execute(&self, payload: P) -> bool {
        if let Some(message) = payload.validate().error_message() {
            tracing::debug!("{}: refusing invalid request: {message}", self.context);
            self.state.send_modify(|state| {
                state.last_message = None;
                state.last_error = Some(message.to_string());
            });
            self.reporter.report_error(message);
            return false;
        }

        self.state.send_modify(|state| {
            state.in_flight += 1;
            state.is_loading = true;
        });
        let settle = SettleOnDrop::new(|| {
            self.state.send_modify(|state| {
                state.in_flight = state.in_flight.saturating_sub(1);
                state.is_loading = state.in_flight > 0;
            });
        });

        let result = (self.mutate_fn)(payload).await;
        drop(settle);

        self.state.send_modify(|state| {
            match &result {
                Ok(envelope) => {
                    state.last_message = envelope.message.clone();
                    state.last_error = None;
                }
                Err(error) => {
                    state.last_message = None;
                    state.last_error = Some(error.to_string());
                }
            }
        });

        match result {
            Ok(_) => {
                tracing::info!("{}: done", self.context);
                true
            }
            Err(error) => {
                report_failure(self.reporter.as_ref(), &self.context, &error);
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn last_message(&self) -> Option<String> {
        self.state.borrow().last_message.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn snapshot(&self) -> MutationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }
}
