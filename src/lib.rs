pub use error::{Error, Result};
pub use observer::{StatusObserver, TracingObserver};
pub use transport::{HttpTransport, Transport, WireRequest, WireResponse};
pub use types::{DispatchOutcome, DispatchRequest, StatusEvent, StatusPhase, DEFAULT_EVENT_TYPE};

mod error;
pub mod notifier;
mod observer;
mod transport;
mod types;

/// Sends a `repository_dispatch` event for `request` using the default HTTP
/// transport.
///
/// # Arguments
///
/// * `request`: The target repository coordinates, file path and content, and
///   optional credential/event type.
///
/// Failures are not returned as `Err`: the outcome's `success` flag and
/// `error` field describe what happened.
pub async fn dispatch(request: &DispatchRequest) -> DispatchOutcome {
    notifier::DispatchNotifier::new().notify(request).await
}

/// Sends a `repository_dispatch` event, reporting progress to `observer`.
///
/// The observer receives zero or more status events (warning, sending,
/// success, error) before the terminal outcome is returned.
pub async fn dispatch_with_observer(
    request: &DispatchRequest,
    observer: &dyn StatusObserver,
) -> DispatchOutcome {
    notifier::DispatchNotifier::new()
        .notify_with_observer(request, observer)
        .await
}
