use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use super::ErrorReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<Duration>, // None for no auto-dismiss
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(Duration::from_secs(5)),
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn no_auto_dismiss(mut self) -> Self {
        self.duration = None;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: HashMap<Uuid, Toast>,
    /// Insertion order, oldest first.
    order: Vec<Uuid>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
    Clear,
}

impl ToastState {
    pub fn reduce(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => {
                self.order.push(toast.id);
                self.toasts.insert(toast.id, toast);
            }
            ToastAction::Remove(id) => {
                self.toasts.remove(&id);
                self.order.retain(|existing| *existing != id);
            }
            ToastAction::Clear => {
                self.toasts.clear();
                self.order.clear();
            }
        }
    }

    /// Visible toasts, oldest first.
    pub fn ordered(&self) -> Vec<Toast> {
        self.order
            .iter()
            .filter_map(|id| self.toasts.get(id).cloned())
            .collect()
    }
}

/// Shared handle to the toast stack. Clones refer to the same stack.
#[derive(Clone, Default)]
pub struct ToastHandle {
    state: Arc<Mutex<ToastState>>,
}

impl ToastHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn dispatch(&self, action: ToastAction) {
        self.lock().reduce(action);
    }

    pub fn add(&self, toast: Toast) -> Uuid {
        let toast_id = toast.id;
        let duration = toast.duration;

        self.dispatch(ToastAction::Add(toast));

        // Auto-dismiss needs a runtime; without one the toast stays until
        // removed by hand.
        if let Some(duration) = duration
            && let Ok(runtime) = tokio::runtime::Handle::try_current()
        {
            let handle = self.clone();
            runtime.spawn(async move {
                tokio::time::sleep(duration).await;
                handle.remove(toast_id);
            });
        }
        toast_id
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.add(Toast::error(message.into()))
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.add(Toast::success(message.into()))
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.add(Toast::info(message.into()))
    }

    pub fn remove(&self, id: Uuid) {
        self.dispatch(ToastAction::Remove(id));
    }

    pub fn clear(&self) {
        self.dispatch(ToastAction::Clear);
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().ordered()
    }

    /// Messages of the visible error toasts, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|toast| toast.toast_type == ToastType::Error)
            .map(|toast| toast.message)
            .collect()
    }
}

impl ErrorReporter for ToastHandle {
    fn report_error(&self, message: &str) {
        self.error(message);
    }
}
