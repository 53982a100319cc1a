use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use crate::portal::activity::ActivityLog;
use crate::portal::ids::IdGenerator;
use crate::portal::session::CitizenSession;
use crate::portal::sheets::SheetSync;
use crate::store::{Collection, KeyValueStore, StoreError, SCHOLARSHIP_APPLICATIONS};

use super::attachments::{encode_uploads, AttachmentError, MarkSheetUpload};
use super::domain::{ApplicationId, ScholarshipApplication, ScholarshipStatus};
use super::eligibility::EligibilityEngine;

/// Form fields captured from the application screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipForm {
    pub student_name: String,
    pub course: String,
    pub grade_percentage: f64,
    pub family_income: f64,
    pub purpose: String,
}

/// Service composing the eligibility engine, the application collection, and
/// the activity/sheet collaborators.
pub struct ScholarshipService<S, L> {
    applications: Collection<ScholarshipApplication, S>,
    engine: EligibilityEngine,
    activity: Arc<L>,
    sheets: Option<Arc<dyn SheetSync>>,
    ids: IdGenerator,
}

impl<S, L> ScholarshipService<S, L>
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    pub fn new(store: Arc<S>, activity: Arc<L>, sheets: Option<Arc<dyn SheetSync>>) -> Self {
        Self {
            applications: Collection::new(store, SCHOLARSHIP_APPLICATIONS),
            engine: EligibilityEngine::default(),
            activity,
            sheets,
            ids: IdGenerator::new("SA"),
        }
    }

    pub fn with_engine(mut self, engine: EligibilityEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Submit a new application.
    ///
    /// Attachments encode first; any encoding failure aborts the submission
    /// with nothing written. The verdict decides the initial status, then the
    /// committed record is reported to the activity sink and the optional
    /// sheet bridge.
    pub async fn submit(
        &self,
        session: &CitizenSession,
        form: ScholarshipForm,
        uploads: Vec<MarkSheetUpload>,
    ) -> Result<ScholarshipApplication, ScholarshipServiceError> {
        if !form.grade_percentage.is_finite() || !form.family_income.is_finite() {
            return Err(ScholarshipServiceError::InvalidSubmission(
                "grade percentage and family income must be numeric".to_string(),
            ));
        }

        let mark_sheets = encode_uploads(uploads).await?;
        let eligibility = self
            .engine
            .evaluate(form.grade_percentage, form.family_income);
        let status = if eligibility.eligible {
            ScholarshipStatus::UnderReview
        } else {
            ScholarshipStatus::NotEligible
        };

        let application = ScholarshipApplication {
            id: ApplicationId(self.ids.next()),
            user_id: session.user_id().to_string(),
            student_name: form.student_name,
            course: form.course,
            grade_percentage: form.grade_percentage,
            family_income: form.family_income,
            purpose: form.purpose,
            mark_sheets,
            eligibility,
            status,
            applied_at: Utc::now(),
        };

        self.applications.append(application.clone())?;

        self.activity.record(
            "scholarship_application_submitted",
            json!({
                "applicationId": application.id.0,
                "userId": application.user_id,
                "studentName": application.student_name,
                "course": application.course,
                "eligibility": application.eligibility.eligible,
            }),
        );

        if let Some(sheets) = &self.sheets {
            match sheets.sync_scholarship(&application) {
                Ok(receipt) if receipt.success => {
                    debug!(id = %application.id.0, "scholarship application synced to sheet");
                }
                Ok(receipt) => warn!(
                    id = %application.id.0,
                    reason = receipt.reason.as_deref().unwrap_or("unspecified"),
                    "sheet sync rejected scholarship application"
                ),
                Err(err) => warn!(id = %application.id.0, %err, "sheet sync failed"),
            }
        }

        Ok(application)
    }

    /// Applications owned by the session user, in submission order.
    pub fn list_for_user(
        &self,
        session: &CitizenSession,
    ) -> Result<Vec<ScholarshipApplication>, ScholarshipServiceError> {
        Ok(self
            .applications
            .find_by(|app| app.user_id == session.user_id())?)
    }

    pub fn detail(
        &self,
        id: &ApplicationId,
    ) -> Result<ScholarshipApplication, ScholarshipServiceError> {
        self.applications
            .find_by_id(&id.0)?
            .ok_or(ScholarshipServiceError::NotFound)
    }

    /// Application for the mark-sheet gallery; a missing application and an
    /// empty attachment set both read as not found.
    pub fn mark_sheets(
        &self,
        id: &ApplicationId,
    ) -> Result<ScholarshipApplication, ScholarshipServiceError> {
        let application = self.detail(id)?;
        if application.mark_sheets.is_empty() {
            return Err(ScholarshipServiceError::NotFound);
        }
        Ok(application)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScholarshipServiceError {
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Application not found")]
    NotFound,
}
