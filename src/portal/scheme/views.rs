use serde::Serialize;

use crate::portal::views::{format_date, status_badge_class};

use super::domain::SchemeApplication;

pub const EMPTY_SUMMARY_MESSAGE: &str = "No scheme applications yet";

/// Summary badge class used on the dashboard counters.
pub fn summary_badge_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "accepted" => "badge-resolved",
        "rejected" => "badge-in-progress",
        _ => "badge-pending",
    }
}

/// One row of the status summary; rows appear in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: String,
    pub count: usize,
    pub badge_class: &'static str,
}

/// Dashboard summary: per-status counts plus the total.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeSummaryView {
    pub entries: Vec<StatusCountEntry>,
    pub total: usize,
}

impl SchemeSummaryView {
    pub fn from_applications(applications: &[SchemeApplication]) -> Self {
        let mut entries: Vec<StatusCountEntry> = Vec::new();
        for application in applications {
            let label = application.status.label();
            match entries.iter_mut().find(|entry| entry.status == label) {
                Some(entry) => entry.count += 1,
                None => entries.push(StatusCountEntry {
                    status: label.to_string(),
                    count: 1,
                    badge_class: summary_badge_class(label),
                }),
            }
        }

        Self {
            total: applications.len(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Row shown on the citizen's scheme-applications list.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeApplicationView {
    pub id: String,
    pub scheme_id: String,
    pub scheme_name: String,
    pub status_label: &'static str,
    pub status_class: String,
    pub applied_on: String,
}

impl SchemeApplicationView {
    pub fn from_application(application: &SchemeApplication) -> Self {
        Self {
            id: application.id.0.clone(),
            scheme_id: application.scheme_id.clone(),
            scheme_name: application.scheme_name.clone(),
            status_label: application.status.label(),
            status_class: status_badge_class(application.status.label()),
            applied_on: format_date(application.applied_at),
        }
    }
}
