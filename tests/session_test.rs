use telecom_master::api_client::{TransportError, GENERIC_FAILURE_MESSAGE};
use telecom_master::mock::MockFixture;
use telecom_master::session::{NoticeLevel, SessionController, ViewState};

fn canned_response() -> telecom_master::api_client::ChatResponse {
    MockFixture::default().response().clone()
}

#[test]
fn test_submit_from_empty_enters_processing() {
    let mut session = SessionController::new();
    assert_eq!(session.state(), ViewState::Empty);

    let token = session.submit("process the latest complaints");
    assert!(token.is_some());
    assert_eq!(session.state(), ViewState::Processing);
    assert!(!session.submit_enabled());
}

#[test]
fn test_blank_submission_is_rejected() {
    let mut session = SessionController::new();

    assert!(session.submit("").is_none());
    assert!(session.submit("   \t  ").is_none());
    assert_eq!(session.state(), ViewState::Empty);
}

#[test]
fn test_submit_rejected_while_processing() {
    let mut session = SessionController::new();
    let first = session.submit("first");
    assert!(first.is_some());

    assert!(session.submit("second").is_none());
    assert_eq!(session.state(), ViewState::Processing);
}

#[test]
fn test_submit_rejected_when_disabled() {
    let mut session = SessionController::new();
    session.set_disabled(true);

    assert!(session.submit("anything").is_none());
    assert_eq!(session.state(), ViewState::Empty);

    session.set_disabled(false);
    assert!(session.submit("anything").is_some());
}

#[test]
fn test_success_stores_response_and_raises_notice() {
    let mut session = SessionController::new();
    let token = session.submit("go").unwrap();

    assert!(session.on_success(token, canned_response()));
    assert_eq!(session.state(), ViewState::Results);
    assert_eq!(session.response().unwrap().tickets_created.len(), 3);

    let notice = session.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, "Processing Complete");
    assert!(notice.body.contains("3 tickets"));
}

#[test]
fn test_failure_returns_to_empty_with_error_notice() {
    let mut session = SessionController::new();
    let token = session.submit("go").unwrap();

    let error = TransportError::generic();
    assert!(session.on_failure(token, &error));
    assert_eq!(session.state(), ViewState::Empty);
    assert!(session.submit_enabled());

    let notice = session.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Processing Failed");
    assert_eq!(notice.body, GENERIC_FAILURE_MESSAGE);
}

#[test]
fn test_cancel_ignores_late_outcome() {
    let mut session = SessionController::new();
    let token = session.submit("go").unwrap();

    assert!(session.cancel());
    assert_eq!(session.state(), ViewState::Empty);
    assert!(session.submit_enabled());

    // The abandoned request resolving later must not change anything.
    assert!(!session.on_success(token, canned_response()));
    assert_eq!(session.state(), ViewState::Empty);
    assert!(session.response().is_none());

    assert!(!session.on_failure(token, &TransportError::generic()));
    assert_eq!(session.state(), ViewState::Empty);
}

#[test]
fn test_cancel_outside_processing_is_noop() {
    let mut session = SessionController::new();
    assert!(!session.cancel());

    let token = session.submit("go").unwrap();
    session.on_success(token, canned_response());
    assert!(!session.cancel());
    assert_eq!(session.state(), ViewState::Results);
}

#[test]
fn test_resubmit_from_results_keeps_previous_response() {
    let mut session = SessionController::new();
    let token = session.submit("first").unwrap();
    session.on_success(token, canned_response());

    let second = session.submit("second");
    assert!(second.is_some());
    assert_eq!(session.state(), ViewState::Processing);
    // Previous results stay visible underneath the loading state.
    assert!(session.response().is_some());
}

#[test]
fn test_stale_outcome_after_new_submission_is_ignored() {
    let mut session = SessionController::new();
    let first = session.submit("first").unwrap();
    session.cancel();
    let second = session.submit("second").unwrap();

    assert!(!session.on_failure(first, &TransportError::generic()));
    assert_eq!(session.state(), ViewState::Processing);

    assert!(session.on_success(second, canned_response()));
    assert_eq!(session.state(), ViewState::Results);
}

#[test]
fn test_reset_clears_response_and_notice() {
    let mut session = SessionController::new();
    let token = session.submit("go").unwrap();
    session.on_success(token, canned_response());
    assert!(session.response().is_some());
    assert!(session.notice().is_some());

    session.reset();
    assert_eq!(session.state(), ViewState::Empty);
    assert!(session.response().is_none());
    assert!(session.notice().is_none());
}
