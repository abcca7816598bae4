use super::*;
use crate::{bridge::ActionCommand, creation::CreationProgress, permission::PERMISSION_DENIED_HINT, test_support::RecordingBridge};
use shared::error::ErrorCode;

fn controller(gate: PermissionGate, versions: Vec<VersionRecord>) -> ToggleConfirmController {
    let mut controller = ToggleConfirmController::new(gate);
    controller.observe(versions, CreationProgress::default());
    controller
}

fn released(c: &ToggleConfirmController, id: &str) -> bool {
    c.rows()
        .into_iter()
        .find(|row| row.id.as_str() == id)
        .map(|row| row.displayed_released)
        .expect("row present")
}

#[test]
fn cancelling_leaves_displayed_state_untouched() {
    for initial in [false, true] {
        let mut c = controller(
            PermissionGate::granted(),
            vec![VersionRecord::new("2", initial)],
        );
        let bridge = RecordingBridge::default();

        assert!(matches!(
            c.request_toggle(&VersionId::new("2")),
            ToggleOutcome::Pending(_)
        ));
        assert_eq!(released(&c, "2"), initial, "no optimistic flip while pending");

        let cancelled = c.cancel().expect("pending toggle");
        assert_eq!(cancelled.requested_released, !initial);
        assert_eq!(released(&c, "2"), initial);
        assert!(c.dialog().is_none());
        assert!(bridge.sent().is_empty());
    }
}

#[test]
fn denied_permission_never_opens_dialog() {
    let mut c = controller(
        PermissionGate::denied(),
        vec![VersionRecord::new("1", false), VersionRecord::new("2", true)],
    );

    for id in ["1", "2"] {
        assert_eq!(c.request_toggle(&VersionId::new(id)), ToggleOutcome::Denied);
        assert!(c.dialog().is_none());
        assert!(c.pending().is_none());
    }
    assert!(!released(&c, "1"));
    assert!(released(&c, "2"));

    for row in c.rows() {
        assert!(!row.interactive);
        assert_eq!(row.denial_hint, Some(PERMISSION_DENIED_HINT));
    }
}

#[test]
fn confirming_dispatches_inverted_release_state() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("2", true)]);
    let bridge = RecordingBridge::default();

    c.request_toggle(&VersionId::new("2"));
    let request = c.confirm(&bridge).expect("dispatch").expect("request");

    assert_eq!(request, EditVersionRequest::new(VersionId::new("2"), false));
    assert_eq!(
        bridge.sent(),
        vec![ActionCommand::EditVersion(EditVersionRequest::new(
            VersionId::new("2"),
            false
        ))]
    );
    assert!(c.pending().is_none());
    // still waiting for the refreshed record
    assert!(released(&c, "2"));
}

#[test]
fn dialog_message_names_target_state() {
    let mut c = controller(
        PermissionGate::granted(),
        vec![VersionRecord::new("1", false), VersionRecord::new("2", true)],
    );

    c.request_toggle(&VersionId::new("1"));
    let msg = c.dialog().expect("dialog").message();
    assert!(msg.contains("released") && !msg.contains("unreleased"));
    assert!(msg.contains('1'));
    c.cancel();

    c.request_toggle(&VersionId::new("2"));
    let msg = c.dialog().expect("dialog").message();
    assert!(msg.contains("unreleased"));
    assert!(msg.contains('2'));
}

#[test]
fn two_row_scenario() {
    let mut c = controller(
        PermissionGate::granted(),
        vec![VersionRecord::new("1", false), VersionRecord::new("2", true)],
    );
    let bridge = RecordingBridge::default();

    c.request_toggle(&VersionId::new("1"));
    assert_eq!(
        c.dialog().expect("dialog").message(),
        "Are you sure to mark version 1 as released?"
    );
    c.confirm(&bridge).expect("dispatch");
    assert_eq!(
        bridge.sent(),
        vec![ActionCommand::EditVersion(EditVersionRequest::new(
            VersionId::new("1"),
            true
        ))]
    );

    c.request_toggle(&VersionId::new("2"));
    assert_eq!(
        c.dialog().expect("dialog").message(),
        "Are you sure to mark version 2 as unreleased?"
    );
    c.cancel();
    assert_eq!(bridge.sent().len(), 1);
    assert!(released(&c, "2"));
}

#[test]
fn second_toggle_while_pending_is_rejected() {
    let mut c = controller(
        PermissionGate::granted(),
        vec![VersionRecord::new("1", false), VersionRecord::new("2", true)],
    );

    c.request_toggle(&VersionId::new("1"));
    assert_eq!(c.request_toggle(&VersionId::new("2")), ToggleOutcome::Busy);
    assert_eq!(c.dialog().expect("dialog").target_id().as_str(), "1");
    assert!(c.rows().iter().all(|row| !row.interactive));
}

#[test]
fn unknown_version_does_not_open_dialog() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("1", false)]);
    assert_eq!(
        c.request_toggle(&VersionId::new("9")),
        ToggleOutcome::UnknownVersion
    );
    assert!(c.dialog().is_none());
}

#[test]
fn bridge_failure_surfaces_without_reopening_dialog() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("1", false)]);
    let bridge = RecordingBridge::failing(BridgeError::Disconnected);

    c.request_toggle(&VersionId::new("1"));
    let err = c.confirm(&bridge).expect_err("dispatch should fail");
    assert!(matches!(
        err,
        ToggleError::Dispatch {
            source: BridgeError::Disconnected,
            ..
        }
    ));
    assert!(c.pending().is_none());
    assert!(c.last_failure().is_some());
    assert!(!released(&c, "1"));
}

#[test]
fn reported_edit_failure_keeps_last_known_record() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("1", false)]);
    let bridge = RecordingBridge::default();
    c.request_toggle(&VersionId::new("1"));
    c.confirm(&bridge).expect("dispatch");

    c.report_failure(ActionFailure::EditVersion {
        id: VersionId::new("1"),
        error: ApiError::new(ErrorCode::Forbidden, "You do not have permission"),
    });

    assert_eq!(
        c.last_failure().map(ActionFailure::message),
        Some("You do not have permission".to_string())
    );
    assert!(c.pending().is_none());
    assert!(!released(&c, "1"));
    c.clear_failure();
    assert!(c.last_failure().is_none());
}

#[test]
fn refreshed_record_drives_displayed_state() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("1", false)]);
    let bridge = RecordingBridge::default();
    c.request_toggle(&VersionId::new("1"));
    c.confirm(&bridge).expect("dispatch");

    c.observe(vec![VersionRecord::new("1", true)], CreationProgress::default());
    assert!(released(&c, "1"));
}

#[test]
fn revoked_permission_discards_pending_without_dispatch() {
    let mut c = controller(PermissionGate::granted(), vec![VersionRecord::new("1", false)]);
    let bridge = RecordingBridge::default();
    c.request_toggle(&VersionId::new("1"));

    c.set_permission(PermissionGate::denied());
    assert_eq!(c.confirm(&bridge).expect("no dispatch error"), None);
    assert!(bridge.sent().is_empty());
    assert!(c.pending().is_none());
}

#[test]
fn pending_toggle_for_vanished_row_is_discarded() {
    let mut c = controller(
        PermissionGate::granted(),
        vec![VersionRecord::new("1", false), VersionRecord::new("2", true)],
    );
    c.request_toggle(&VersionId::new("2"));
    c.observe(vec![VersionRecord::new("1", false)], CreationProgress::default());
    assert!(c.dialog().is_none());
}

#[test]
fn create_version_is_gated_and_not_doubled() {
    let bridge = RecordingBridge::default();

    let mut denied = controller(PermissionGate::denied(), vec![]);
    assert_eq!(
        denied
            .request_create_version(&bridge, "/users/alice/collections/MAL/")
            .expect("no dispatch"),
        CreateOutcome::Denied
    );
    assert!(denied.create_affordance().is_none());

    let mut c = controller(PermissionGate::granted(), vec![]);
    assert_eq!(
        c.request_create_version(&bridge, "/users/alice/collections/MAL/")
            .expect("dispatch"),
        CreateOutcome::Dispatched
    );

    let mut progress = CreationProgress::default();
    progress.begin();
    c.observe(vec![], progress);
    assert_eq!(
        c.request_create_version(&bridge, "/users/alice/collections/MAL/")
            .expect("dispatch"),
        CreateOutcome::AlreadyLoading
    );
    assert_eq!(bridge.sent().len(), 1);
    assert_eq!(
        c.create_affordance(),
        Some(CreateAffordance {
            loading: true,
            error: None
        })
    );
}

#[test]
fn create_version_error_is_shown_verbatim() {
    let mut c = controller(PermissionGate::granted(), vec![]);
    let mut progress = CreationProgress::default();
    let attempt = progress.begin();
    progress.fail(attempt, ApiError::new(ErrorCode::Forbidden, "error"));
    c.observe(vec![], progress);

    assert_eq!(
        c.create_affordance(),
        Some(CreateAffordance {
            loading: false,
            error: Some("error".to_string())
        })
    );
}
