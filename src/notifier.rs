use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::error::{Error, Result};
use crate::observer::StatusObserver;
use crate::transport::{HttpTransport, Transport, WireRequest, WireResponse};
use crate::types::{DispatchOutcome, DispatchRequest, StatusEvent, StatusPhase};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

// Field names are a contract with the receiving workflow; they must match the
// `github.event.client_payload` lookups on the Actions side.
#[derive(Debug, Serialize)]
struct DispatchEventBody<'a> {
    event_type: &'a str,
    client_payload: ClientPayload<'a>,
}

#[derive(Debug, Serialize)]
struct ClientPayload<'a> {
    filename: &'a str,
    content_base64: String,
}

/// Sends `repository_dispatch` events and reports progress and outcome
pub struct DispatchNotifier<T = HttpTransport> {
    transport: T,
    api_base: String,
}

impl DispatchNotifier<HttpTransport> {
    /// Creates a notifier backed by the default HTTP transport
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for DispatchNotifier<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> DispatchNotifier<T> {
    /// Creates a notifier over the given transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            api_base: GITHUB_API_BASE.to_string(),
        }
    }

    /// Points the notifier at a different API root, e.g. a GitHub Enterprise
    /// installation
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Triggers the dispatch workflow described by `request`.
    ///
    /// Every failure is captured in the returned outcome; nothing is retried
    /// and nothing is reported twice.
    #[instrument(skip(self, request))]
    pub async fn notify(&self, request: &DispatchRequest) -> DispatchOutcome {
        self.run(request, None).await
    }

    /// Same as [`notify`](Self::notify), additionally delivering progress
    /// events to `observer` as the call moves through its phases.
    #[instrument(skip(self, request, observer))]
    pub async fn notify_with_observer(
        &self,
        request: &DispatchRequest,
        observer: &dyn StatusObserver,
    ) -> DispatchOutcome {
        self.run(request, Some(observer)).await
    }

    async fn run(
        &self,
        request: &DispatchRequest,
        observer: Option<&dyn StatusObserver>,
    ) -> DispatchOutcome {
        debug!(
            owner = %request.owner,
            repo = %request.repo,
            event_type = %request.event_type,
            "Starting dispatch"
        );

        let missing = missing_fields(request);
        if !missing.is_empty() {
            let err = Error::Validation(missing.join(", "));
            error!(error = %err, "Dispatch request rejected");
            emit(observer, StatusPhase::Error, err.to_string(), None);
            return DispatchOutcome::failed(err, None);
        }

        if request.credential.is_none() {
            warn!("No credential provided; the request may be rate-limited or rejected");
            emit(
                observer,
                StatusPhase::Warning,
                "No credential provided; the request may be rate-limited or rejected by GitHub",
                None,
            );
        }

        emit(
            observer,
            StatusPhase::Sending,
            "Preparing dispatch payload",
            None,
        );

        let wire = match self.build_wire_request(request) {
            Ok(wire) => wire,
            Err(err) => {
                error!(error = %err, "Payload preparation failed");
                emit(observer, StatusPhase::Error, err.to_string(), None);
                return DispatchOutcome::failed(err, None);
            }
        };

        emit(
            observer,
            StatusPhase::Sending,
            format!("Sending repository_dispatch event to {}", wire.url),
            None,
        );

        match self.transport.send(&wire).await {
            Ok(response) => interpret_response(request, &response, observer),
            Err(err) => {
                error!(error = %err, "Dispatch request failed in transit");
                emit(observer, StatusPhase::Error, err.to_string(), None);
                DispatchOutcome::failed(err, None)
            }
        }
    }

    fn build_wire_request(&self, request: &DispatchRequest) -> Result<WireRequest> {
        let payload = DispatchEventBody {
            event_type: &request.event_type,
            client_payload: ClientPayload {
                filename: &request.file_path,
                content_base64: STANDARD.encode(request.file_content.as_bytes()),
            },
        };
        let body = serde_json::to_value(&payload).map_err(|e| Error::Encoding(e.to_string()))?;

        let mut headers = vec![
            ("Accept".to_string(), GITHUB_V3_ACCEPT.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        if let Some(credential) = &request.credential {
            headers.push(("Authorization".to_string(), format!("Bearer {credential}")));
        }

        Ok(WireRequest {
            url: self.dispatch_url(&request.owner, &request.repo),
            headers,
            body,
        })
    }

    fn dispatch_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/dispatches", self.api_base)
    }
}

fn interpret_response(
    request: &DispatchRequest,
    response: &WireResponse,
    observer: Option<&dyn StatusObserver>,
) -> DispatchOutcome {
    let status = response.status;

    if (200..300).contains(&status) {
        let message = format!(
            "Dispatch event delivered to {}/{} (HTTP {status})",
            request.owner, request.repo
        );
        debug!(status = status, "Dispatch accepted");
        emit(observer, StatusPhase::Success, message.clone(), Some(status));
        return DispatchOutcome::succeeded(message, status);
    }

    // Best effort: GitHub error bodies are JSON with a top-level "message",
    // but non-JSON bodies fall back to the status text.
    let body: Option<serde_json::Value> = serde_json::from_str(&response.body).ok();
    let message = body
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map_or_else(|| status_text(status), str::to_string);

    let err = Error::Api {
        status,
        message,
        body,
    };
    error!(status = status, error = %err, "GitHub rejected the dispatch");
    emit(observer, StatusPhase::Error, err.to_string(), Some(status));
    DispatchOutcome::failed(err, Some(status))
}

fn missing_fields(request: &DispatchRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if request.owner.is_empty() {
        missing.push("owner");
    }
    if request.repo.is_empty() {
        missing.push("repo");
    }
    if request.file_path.is_empty() {
        missing.push("file_path");
    }
    missing
}

fn status_text(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(
            || format!("Request failed with status {status}"),
            str::to_string,
        )
}

fn emit(
    observer: Option<&dyn StatusObserver>,
    phase: StatusPhase,
    message: impl Into<String>,
    http_status: Option<u16>,
) {
    if let Some(observer) = observer {
        observer.on_status(&StatusEvent {
            phase,
            message: message.into(),
            http_status,
        });
    }
}
