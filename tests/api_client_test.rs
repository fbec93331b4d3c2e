use std::time::{Duration, Instant};

use serde_json::json;
use telecom_master::api_client::{
    ChatClient, ChatRequest, ChatResponse, Priority, TransportError, UserRole,
    GENERIC_FAILURE_MESSAGE,
};
use telecom_master::mock::MockFixture;

fn instant_mock() -> ChatClient {
    ChatClient::mock(MockFixture::default().with_delay(Duration::ZERO))
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        user_role: UserRole::CustomerService,
        user_id: "demo-user-001".to_string(),
    }
}

#[test]
fn test_mock_mode_returns_fixture_regardless_of_input() {
    let client = instant_mock();

    let first = client.send_message(&request("urgent outage downtown")).unwrap();
    let second = client.send_message(&request("something else entirely")).unwrap();
    assert_eq!(first, second);

    assert_eq!(first.agent_name, "TelecomMaster");
    assert!(first.processing_complete);
    assert_eq!(first.tickets_created.len(), 3);

    // The demo scenario: one P1 network ticket among the three.
    let p1 = first
        .tickets_created
        .iter()
        .find(|t| t.priority == Priority::P1)
        .unwrap();
    assert_eq!(p1.category, "Network");
    assert_eq!(p1.id, "TELECOM-001");
}

#[test]
fn test_mock_mode_waits_for_configured_delay() {
    let client = ChatClient::mock(MockFixture::default().with_delay(Duration::from_millis(50)));

    let start = Instant::now();
    client.send_message(&request("hi")).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_mock_fixture_preserves_ticket_order() {
    let response = instant_mock().send_message(&request("go")).unwrap();
    let ids: Vec<&str> = response
        .tickets_created
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["TELECOM-001", "TELECOM-002", "TELECOM-003"]);
}

#[test]
fn test_request_wire_shape() {
    let value = serde_json::to_value(request("process complaints")).unwrap();
    assert_eq!(
        value,
        json!({
            "message": "process complaints",
            "user_role": "customer_service",
            "user_id": "demo-user-001",
        })
    );
}

#[test]
fn test_user_role_spellings() {
    for (role, spelling) in [
        (UserRole::CustomerService, "customer_service"),
        (UserRole::Supervisor, "supervisor"),
        (UserRole::Manager, "manager"),
        (UserRole::Admin, "admin"),
    ] {
        assert_eq!(serde_json::to_value(role).unwrap(), json!(spelling));
    }
}

#[test]
fn test_response_wire_shape() {
    let raw = r#"{
        "agent_name": "TelecomMaster",
        "response": "Done.",
        "tickets_created": [
            {
                "id": "TELECOM-100",
                "title": "SIM activation stuck",
                "priority": "P2",
                "category": "Provisioning",
                "team": "Technical Support",
                "status": "Open",
                "complaint_id": "SP-90001"
            }
        ],
        "processing_complete": true
    }"#;

    let response: ChatResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(response.agent_name, "TelecomMaster");
    assert!(response.processing_complete);

    let ticket = &response.tickets_created[0];
    assert_eq!(ticket.id, "TELECOM-100");
    assert_eq!(ticket.priority, Priority::P2);
    assert_eq!(ticket.complaint_id, "SP-90001");
}

#[test]
fn test_priority_labels() {
    assert_eq!(Priority::P1.label(), "P1 Critical");
    assert_eq!(Priority::P2.label(), "P2 High");
    assert_eq!(Priority::P3.label(), "P3 Medium");
    assert_eq!(Priority::P4.label(), "P4 Low");
}

#[test]
fn test_priority_is_ordinal() {
    assert!(Priority::P1 < Priority::P2);
    assert!(Priority::P3 < Priority::P4);
}

#[test]
fn test_transport_error_generic_fallback() {
    let error = TransportError::generic();
    assert_eq!(error.message(), GENERIC_FAILURE_MESSAGE);
    assert_eq!(error.to_string(), GENERIC_FAILURE_MESSAGE);
}
