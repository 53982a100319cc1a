use std::sync::Arc;

use super::common::*;
use crate::portal::scheme::domain::SchemeApplicationStatus;
use crate::portal::scheme::service::SchemeServiceError;
use crate::portal::session::CitizenSession;

#[test]
fn apply_snapshots_the_scheme_name_and_starts_pending() {
    let (service, _) = build_service();

    let application = service.apply(&session(), "pmay").expect("apply");

    assert_eq!(application.scheme_name, "Pradhan Mantri Awas Yojana");
    assert_eq!(application.status, SchemeApplicationStatus::Pending);
    assert_eq!(application.user_id, "9876500001");
}

#[test]
fn second_apply_for_same_scheme_is_rejected_without_writing() {
    let (service, _) = build_service();

    service.apply(&session(), "pmay").expect("first apply");
    let err = service
        .apply(&session(), "pmay")
        .expect_err("duplicate apply");

    assert!(matches!(err, SchemeServiceError::AlreadyApplied));
    assert_eq!(err.to_string(), "You have already applied for this scheme");
    assert_eq!(service.list_for_user(&session()).expect("list").len(), 1);
}

#[test]
fn same_citizen_may_apply_to_different_schemes() {
    let (service, _) = build_service();

    service.apply(&session(), "pmay").expect("first scheme");
    service.apply(&session(), "ayushman").expect("second scheme");

    let listed = service.list_for_user(&session()).expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].scheme_id, "pmay");
    assert_eq!(listed[1].scheme_id, "ayushman");
}

#[test]
fn different_citizens_may_apply_to_the_same_scheme() {
    let (service, _) = build_service();

    service.apply(&session(), "pmay").expect("first citizen");
    service
        .apply(&CitizenSession::new("9876500002"), "pmay")
        .expect("second citizen");

    assert_eq!(service.list_for_user(&session()).expect("list").len(), 1);
}

#[test]
fn missing_catalog_entry_snapshots_unknown() {
    let (service, _) = build_service();

    let application = service.apply(&session(), "ghost-scheme").expect("apply");

    assert_eq!(application.scheme_name, "Unknown");
}

#[test]
fn apply_emits_activity_event() {
    let (service, activity) = build_service();

    let application = service.apply(&session(), "pmay").expect("apply");

    let events = activity.events();
    assert_eq!(events.len(), 1);
    let (event, payload) = &events[0];
    assert_eq!(event, "scheme_applied");
    assert_eq!(payload["applicationId"], application.id.0.as_str());
    assert_eq!(payload["schemeId"], "pmay");
}

#[test]
fn sheet_bridge_receives_the_committed_application() {
    let sheets = Arc::new(RecordingSheets::default());
    let service = build_service_with_sheets(sheets.clone());

    let application = service.apply(&session(), "pmay").expect("apply");

    assert_eq!(sheets.scheme_syncs(), vec![application.id.0.clone()]);
}

#[test]
fn catalog_lists_seeded_schemes_in_order() {
    let (service, _) = build_service();

    let schemes = service.schemes().expect("catalog");
    assert_eq!(schemes.len(), 2);
    assert_eq!(schemes[0].id, "pmay");
    assert_eq!(schemes[1].id, "ayushman");
}
