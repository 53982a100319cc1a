use serde::Serialize;

use crate::portal::views::{format_date, format_date_time, format_inr, status_badge_class};

use super::domain::ScholarshipApplication;

pub const EMPTY_LIST_MESSAGE: &str =
    "No scholarship applications yet. Apply now to get started!";
pub const MARK_SHEETS_MISSING_MESSAGE: &str = "No mark sheets found";

/// Card shown on the applications list screen.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCardView {
    pub id: String,
    pub student_name: String,
    pub course: String,
    pub grade_display: String,
    pub family_income_display: String,
    pub status_label: &'static str,
    pub status_class: String,
    pub eligibility_tag: &'static str,
    pub eligibility_class: &'static str,
    /// Suggested programs joined for display, or the refusal reason.
    pub eligibility_note: String,
    pub applied_on: String,
    pub mark_sheet_count: usize,
}

impl ApplicationCardView {
    pub fn from_application(app: &ScholarshipApplication) -> Self {
        Self {
            id: app.id.0.clone(),
            student_name: app.student_name.clone(),
            course: app.course.clone(),
            grade_display: format!("{}%", app.grade_percentage),
            family_income_display: format!("₹{}/year", format_inr(app.family_income)),
            status_label: app.status.label(),
            status_class: status_badge_class(app.status.label()),
            eligibility_tag: eligibility_tag(app),
            eligibility_class: eligibility_class(app),
            eligibility_note: if app.eligibility.eligible {
                app.eligibility.suggestions.join(", ")
            } else {
                app.eligibility.reason.clone()
            },
            applied_on: format_date(app.applied_at),
            mark_sheet_count: app.mark_sheets.len(),
        }
    }
}

/// Applications list screen for one citizen.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListView {
    pub cards: Vec<ApplicationCardView>,
}

impl ApplicationListView {
    pub fn from_applications(applications: &[ScholarshipApplication]) -> Self {
        Self {
            cards: applications
                .iter()
                .map(ApplicationCardView::from_application)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Detail modal with every stored field.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetailView {
    pub id: String,
    pub student_name: String,
    pub course: String,
    pub grade_display: String,
    pub family_income_display: String,
    pub purpose: String,
    pub status_label: &'static str,
    pub status_class: String,
    pub eligibility_tag: &'static str,
    pub eligibility_class: &'static str,
    pub suggestions: Vec<String>,
    pub reason: String,
    pub applied_at_display: String,
    pub mark_sheet_count: usize,
}

impl ApplicationDetailView {
    pub fn from_application(app: &ScholarshipApplication) -> Self {
        Self {
            id: app.id.0.clone(),
            student_name: app.student_name.clone(),
            course: app.course.clone(),
            grade_display: format!("{}%", app.grade_percentage),
            family_income_display: format!("₹{}/year", format_inr(app.family_income)),
            purpose: app.purpose.clone(),
            status_label: app.status.label(),
            status_class: status_badge_class(app.status.label()),
            eligibility_tag: eligibility_tag(app),
            eligibility_class: eligibility_class(app),
            suggestions: app.eligibility.suggestions.clone(),
            reason: app.eligibility.reason.clone(),
            applied_at_display: format_date_time(app.applied_at),
            mark_sheet_count: app.mark_sheets.len(),
        }
    }
}

/// Gallery modal entry; only inline-encoded images make it in.
#[derive(Debug, Clone, Serialize)]
pub struct MarkSheetView {
    pub name: String,
    pub data: String,
    pub uploaded_at_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkSheetGalleryView {
    pub student_name: String,
    pub sheets: Vec<MarkSheetView>,
}

impl MarkSheetGalleryView {
    pub fn from_application(app: &ScholarshipApplication) -> Self {
        Self {
            student_name: app.student_name.clone(),
            sheets: app
                .mark_sheets
                .iter()
                .filter(|sheet| sheet.is_inline_image())
                .map(|sheet| MarkSheetView {
                    name: sheet.name.clone(),
                    data: sheet.data.clone(),
                    uploaded_at_display: format_date_time(sheet.uploaded_at),
                })
                .collect(),
        }
    }
}

/// Blocking confirmation text shown right after a submission.
pub fn submission_notice(app: &ScholarshipApplication) -> String {
    if app.eligibility.eligible {
        format!(
            "Application submitted successfully!\n\n✓ You are eligible for:\n{}\n\nYour application status: {}",
            app.eligibility.suggestions.join("\n"),
            app.status.label()
        )
    } else {
        format!(
            "Application submitted.\n\n✗ Not eligible at this time.\nReason: {}\n\nYou can reapply if your circumstances change.",
            app.eligibility.reason
        )
    }
}

fn eligibility_tag(app: &ScholarshipApplication) -> &'static str {
    if app.eligibility.eligible {
        "✓ Eligible"
    } else {
        "✗ Not Eligible"
    }
}

fn eligibility_class(app: &ScholarshipApplication) -> &'static str {
    if app.eligibility.eligible {
        "eligible"
    } else {
        "not-eligible"
    }
}
