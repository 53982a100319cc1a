//! Scholarship application intake, eligibility, and screen rendering.

pub mod attachments;
pub mod domain;
pub mod eligibility;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use attachments::{AttachmentError, MarkSheetUpload};
pub use domain::{
    ApplicationId, EligibilityVerdict, MarkSheet, ScholarshipApplication, ScholarshipStatus,
};
pub use eligibility::{EligibilityConfig, EligibilityEngine};
pub use router::scholarship_router;
pub use service::{ScholarshipForm, ScholarshipService, ScholarshipServiceError};
