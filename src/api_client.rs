//! HTTP client for the TelecomMaster chat endpoint.
//!
//! Two modes, fixed at construction: live (one POST against the configured
//! backend) and mock (sleep for the fixture delay, return the fixture). Every
//! transport failure collapses into the single `TransportError` kind.

use std::collections::HashSet;
use std::fmt;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::mock::MockFixture;

/// Fixed path appended to the configured base URL.
pub const CHAT_ENDPOINT: &str = "/api/v1/chat";

/// Shown to the user when the transport gives us nothing better.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    CustomerService,
    Supervisor,
    Manager,
    Admin,
}

/// Ticket priority. P1 is the highest urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P1 => "P1 Critical",
            Priority::P2 => "P2 High",
            Priority::P3 => "P3 Medium",
            Priority::P4 => "P4 Low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_role: UserRole,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub category: String,
    pub team: String,
    pub status: String,
    pub complaint_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub agent_name: String,
    pub response: String,
    pub tickets_created: Vec<Ticket>,
    pub processing_complete: bool,
}

/// The one user-visible failure kind. Carries a human-readable message when
/// the transport gave us one, the generic fallback otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_FAILURE_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new("Request timed out. Please try again.")
        } else {
            Self::generic()
        }
    }
}

#[derive(Debug, Clone)]
enum ClientMode {
    Live { base_url: String },
    Mock { fixture: MockFixture },
}

/// Client for the chat endpoint. Stateless per call and cheap to clone, so a
/// worker thread can own its own handle.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::blocking::Client,
    mode: ClientMode,
}

impl ChatClient {
    pub fn live(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            mode: ClientMode::Live {
                base_url: base_url.trim_end_matches('/').to_string(),
            },
        })
    }

    pub fn mock(fixture: MockFixture) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            mode: ClientMode::Mock { fixture },
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, ClientMode::Mock { .. })
    }

    /// Submit one chat message and wait for the agent's answer. Blocking; the
    /// TUI runs this on a worker thread. No retry, no coalescing.
    pub fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = match &self.mode {
            ClientMode::Mock { fixture } => {
                let delay_ms = fixture.delay().as_millis() as u64;
                debug!(delay_ms, "mock mode, returning fixture");
                thread::sleep(fixture.delay());
                fixture.response().clone()
            }
            ClientMode::Live { base_url } => {
                let url = format!("{base_url}{CHAT_ENDPOINT}");
                debug!(%url, "sending chat request");
                let http_response = self
                    .http
                    .post(&url)
                    .json(request)
                    .send()
                    .map_err(|err| {
                        warn!(%err, "chat request failed");
                        TransportError::from(err)
                    })?;
                let status = http_response.status();
                if !status.is_success() {
                    warn!(%status, "chat endpoint returned non-success");
                    return Err(TransportError::new(format!(
                        "Processing backend returned {status}."
                    )));
                }
                http_response.json::<ChatResponse>().map_err(|err| {
                    warn!(%err, "failed to decode chat response");
                    TransportError::generic()
                })?
            }
        };

        info!(
            agent = %response.agent_name,
            tickets = response.tickets_created.len(),
            complete = response.processing_complete,
            "chat response received"
        );
        warn_on_duplicate_ids(&response);
        Ok(response)
    }
}

// Ticket ids are supposed to be unique within one response. The backend owns
// that invariant; we only surface violations in the log.
fn warn_on_duplicate_ids(response: &ChatResponse) {
    let mut seen = HashSet::new();
    for ticket in &response.tickets_created {
        if !seen.insert(ticket.id.as_str()) {
            warn!(ticket_id = %ticket.id, "duplicate ticket id in response");
        }
    }
}
