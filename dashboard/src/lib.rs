//! State and data access for the marketplace admin console.
//!
//! Every screen talks to the backend through a hook: [`hooks::QueryHook`]
//! for paginated lists, [`hooks::DetailHook`] for a single entity and
//! [`hooks::MutationHook`] for state-changing calls. Hooks publish their
//! state through a watch channel and hand failures to an
//! [`ErrorReporter`], normally the toast stack in [`contexts::toast`].

pub mod config;
pub mod contexts;
pub mod hooks;
pub mod logs;

pub use config::Config;
pub use contexts::{ErrorReporter, LogReporter};
pub use contexts::toast::{Toast, ToastHandle, ToastType};
