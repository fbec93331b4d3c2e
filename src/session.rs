//! Session controller: the view-state machine behind the chat screen.
//!
//! Three states. `Empty` is the initial state and where every failure lands,
//! `Processing` means exactly one request is outstanding, `Results` holds the
//! last stored response. Outcomes carry the generation token issued at submit
//! time; a token that no longer matches is a late arrival from an abandoned
//! request and is dropped.

use tracing::{debug, info};

use crate::api_client::{ChatResponse, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Processing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Toast-equivalent surfaced on the status bar. Replaced by the next
/// transition that raises one.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    fn info(title: &str, body: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            body,
        }
    }

    fn error(title: &str, body: String) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            body,
        }
    }
}

/// Token tying an in-flight request to the submission that started it.
pub type RequestToken = u64;

#[derive(Debug)]
pub struct SessionController {
    state: ViewState,
    response: Option<ChatResponse>,
    generation: RequestToken,
    disabled: bool,
    notice: Option<Notice>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Empty,
            response: None,
            generation: 0,
            disabled: false,
            notice: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn response(&self) -> Option<&ChatResponse> {
        self.response.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn submit_enabled(&self) -> bool {
        !self.disabled && self.state != ViewState::Processing
    }

    /// Accept a submission and enter `Processing`. Returns the token the
    /// caller must attach to the eventual outcome, or `None` when the text is
    /// blank, a request is already outstanding, or submission is disabled.
    /// A stored response is kept so the results stay visible underneath.
    pub fn submit(&mut self, text: &str) -> Option<RequestToken> {
        if text.trim().is_empty() || !self.submit_enabled() {
            return None;
        }
        self.generation += 1;
        self.state = ViewState::Processing;
        self.notice = None;
        info!(generation = self.generation, "submission accepted");
        Some(self.generation)
    }

    /// Store a successful outcome. Returns false for stale tokens.
    pub fn on_success(&mut self, token: RequestToken, response: ChatResponse) -> bool {
        if !self.accepts(token) {
            return false;
        }
        let count = response.tickets_created.len();
        self.response = Some(response);
        self.state = ViewState::Results;
        self.notice = Some(Notice::info(
            "Processing Complete",
            format!("Created {count} tickets from SharePoint complaints."),
        ));
        info!(tickets = count, "processing complete");
        true
    }

    /// Record a failed outcome and fall back to `Empty`. Returns false for
    /// stale tokens.
    pub fn on_failure(&mut self, token: RequestToken, error: &TransportError) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.state = ViewState::Empty;
        self.notice = Some(Notice::error(
            "Processing Failed",
            error.message().to_string(),
        ));
        info!(error = error.message(), "processing failed");
        true
    }

    /// Abandon the outstanding request. The network call is not aborted; the
    /// generation bump guarantees its late outcome is ignored.
    pub fn cancel(&mut self) -> bool {
        if self.state != ViewState::Processing {
            return false;
        }
        self.generation += 1;
        self.state = ViewState::Empty;
        info!("processing cancelled");
        true
    }

    /// Explicit "start a new session": drop the stored response and notice.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ViewState::Empty;
        self.response = None;
        self.notice = None;
        info!("session reset");
    }

    fn accepts(&self, token: RequestToken) -> bool {
        if token != self.generation || self.state != ViewState::Processing {
            debug!(token, generation = self.generation, "ignoring stale outcome");
            return false;
        }
        true
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
