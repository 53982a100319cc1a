use super::common::application;
use crate::portal::scheme::domain::SchemeApplicationStatus;
use crate::portal::scheme::views::{
    summary_badge_class, SchemeApplicationView, SchemeSummaryView,
};

#[test]
fn summary_counts_statuses_in_first_seen_order() {
    let applications = vec![
        application(SchemeApplicationStatus::Pending, "0001"),
        application(SchemeApplicationStatus::Accepted, "0002"),
        application(SchemeApplicationStatus::Pending, "0003"),
        application(SchemeApplicationStatus::Rejected, "0004"),
    ];

    let summary = SchemeSummaryView::from_applications(&applications);

    assert_eq!(summary.total, 4);
    let rows: Vec<(&str, usize, &str)> = summary
        .entries
        .iter()
        .map(|entry| (entry.status.as_str(), entry.count, entry.badge_class))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Pending", 2, "badge-pending"),
            ("Accepted", 1, "badge-resolved"),
            ("Rejected", 1, "badge-in-progress"),
        ]
    );
}

#[test]
fn empty_summary_reports_zero_total() {
    let summary = SchemeSummaryView::from_applications(&[]);
    assert!(summary.is_empty());
    assert!(summary.entries.is_empty());
}

#[test]
fn unknown_status_falls_back_to_pending_badge() {
    assert_eq!(summary_badge_class("Escalated"), "badge-pending");
    assert_eq!(summary_badge_class("ACCEPTED"), "badge-resolved");
    assert_eq!(summary_badge_class("rejected"), "badge-in-progress");
}

#[test]
fn application_view_formats_status_and_date() {
    let view =
        SchemeApplicationView::from_application(&application(SchemeApplicationStatus::Pending, "0001"));

    assert_eq!(view.scheme_name, "Pradhan Mantri Awas Yojana");
    assert_eq!(view.status_label, "Pending");
    assert_eq!(view.status_class, "status-pending");
    assert_eq!(view.applied_on, "15/01/2026");
}
