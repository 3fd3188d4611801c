use crate::error::Error;

/// Event type used when the caller does not override it. The receiving
/// workflow's `repository_dispatch` trigger must list the same value.
pub const DEFAULT_EVENT_TYPE: &str = "update-file-event";

/// Parameters for a single `repository_dispatch` call.
#[derive(Clone)]
pub struct DispatchRequest {
    pub owner: String,
    pub repo: String,
    pub file_path: String,
    pub file_content: String,
    pub credential: Option<String>,
    pub event_type: String,
}

impl DispatchRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        file_path: impl Into<String>,
        file_content: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            file_path: file_path.into(),
            file_content: file_content.into(),
            credential: None,
            event_type: DEFAULT_EVENT_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }
}

// The credential must stay out of logs and error reports.
impl std::fmt::Debug for DispatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchRequest")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("file_path", &self.file_path)
            .field("content_len", &self.file_content.len())
            .field("event_type", &self.event_type)
            .field("has_credential", &self.credential.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    Sending,
    Warning,
    Success,
    Error,
}

/// Progress notification delivered to a `StatusObserver` while a dispatch runs.
#[derive(Debug, Clone)]
pub struct StatusEvent {
    pub phase: StatusPhase,
    pub message: String,
    pub http_status: Option<u16>,
}

/// Terminal result of one dispatch call.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub success: bool,
    pub message: String,
    pub http_status: Option<u16>,
    pub error: Option<Error>,
}

impl DispatchOutcome {
    pub(crate) fn succeeded(message: String, http_status: u16) -> Self {
        Self {
            success: true,
            message,
            http_status: Some(http_status),
            error: None,
        }
    }

    pub(crate) fn failed(error: Error, http_status: Option<u16>) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            http_status,
            error: Some(error),
        }
    }
}
