pub mod toast;

/// Receives the failures hooks could not handle themselves. Rendering
/// them is up to the implementor.
pub trait ErrorReporter: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Reports failures to the log only, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report_error(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
