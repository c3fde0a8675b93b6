//! Task-local trace context for web requests.
//!
//! Gives error rendering and security logging access to the current
//! request's trace id without threading it through every call. The scope is
//! established by the `RequestTrace` middleware; anything outside a request
//! sees `"unknown"`.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id for the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given trace id in scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
