use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StoredRecord;

/// Identifier wrapper for stored scholarship applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// A citizen's scholarship application as persisted in the
/// `scholarshipApplications` collection.
///
/// Fields serialize in camelCase so blobs stay readable next to the other
/// portal collections. `applied_at` is written once at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipApplication {
    pub id: ApplicationId,
    pub user_id: String,
    pub student_name: String,
    pub course: String,
    pub grade_percentage: f64,
    pub family_income: f64,
    pub purpose: String,
    pub mark_sheets: Vec<MarkSheet>,
    pub eligibility: EligibilityVerdict,
    pub status: ScholarshipStatus,
    pub applied_at: DateTime<Utc>,
}

impl StoredRecord for ScholarshipApplication {
    fn record_id(&self) -> &str {
        &self.id.0
    }
}

/// One uploaded mark sheet, stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSheet {
    pub name: String,
    /// Inline `data:<mime>;base64,…` URL.
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
}

impl MarkSheet {
    /// The gallery renders inline images only.
    pub fn is_inline_image(&self) -> bool {
        self.data.starts_with("data:image/")
    }
}

/// Verdict produced by the eligibility rules.
///
/// `suggestions` keeps tier firing order and may carry overlapping programs;
/// `reason` is populated only when not eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub suggestions: Vec<String>,
    pub reason: String,
}

/// Status assigned at creation; review transitions happen elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScholarshipStatus {
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl ScholarshipStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScholarshipStatus::UnderReview => "Under Review",
            ScholarshipStatus::NotEligible => "Not Eligible",
        }
    }
}
