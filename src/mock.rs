//! Injected fixture for mock mode.
//!
//! Deliberately a value you construct and hand to `ChatClient::mock`, not a
//! module-level static, so tests can swap the delay and the payload.

use std::time::Duration;

use crate::api_client::{ChatResponse, Priority, Ticket};

pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct MockFixture {
    delay: Duration,
    response: ChatResponse,
}

impl MockFixture {
    pub fn new(delay: Duration, response: ChatResponse) -> Self {
        Self { delay, response }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn response(&self) -> &ChatResponse {
        &self.response
    }
}

impl Default for MockFixture {
    /// The canned demo answer: three tickets spanning the priority range.
    fn default() -> Self {
        let response = ChatResponse {
            agent_name: "TelecomMaster".to_string(),
            response: "Processed latest SharePoint complaints and created prioritized \
                       Jira tickets. I've analyzed 12 customer complaints and successfully \
                       created 3 high-priority tickets for immediate attention."
                .to_string(),
            tickets_created: vec![
                Ticket {
                    id: "TELECOM-001".to_string(),
                    title: "Network Outage - Downtown Area".to_string(),
                    priority: Priority::P1,
                    category: "Network".to_string(),
                    team: "Network Operations".to_string(),
                    status: "Open".to_string(),
                    complaint_id: "SP-44321".to_string(),
                },
                Ticket {
                    id: "TELECOM-002".to_string(),
                    title: "Billing Discrepancy for Postpaid Plan".to_string(),
                    priority: Priority::P3,
                    category: "Billing".to_string(),
                    team: "Finance Support".to_string(),
                    status: "Open".to_string(),
                    complaint_id: "SP-44359".to_string(),
                },
                Ticket {
                    id: "TELECOM-003".to_string(),
                    title: "Service Speed Below Contract Terms".to_string(),
                    priority: Priority::P2,
                    category: "Performance".to_string(),
                    team: "Technical Support".to_string(),
                    status: "In Progress".to_string(),
                    complaint_id: "SP-44387".to_string(),
                },
            ],
            processing_complete: true,
        };
        Self::new(DEFAULT_MOCK_DELAY, response)
    }
}
