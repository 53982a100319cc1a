use std::sync::{Arc, Mutex};

use chrono::TimeZone;
use chrono::Utc;
use serde_json::Value;

use crate::portal::activity::ActivityLog;
use crate::portal::scheme::domain::SchemeApplication;
use crate::portal::scholarship::attachments::MarkSheetUpload;
use crate::portal::scholarship::domain::{
    ApplicationId, EligibilityVerdict, MarkSheet, ScholarshipApplication, ScholarshipStatus,
};
use crate::portal::scholarship::service::{ScholarshipForm, ScholarshipService};
use crate::portal::session::CitizenSession;
use crate::portal::sheets::{SheetSync, SyncError, SyncReceipt};
use crate::store::MemoryStore;

pub(super) fn session() -> CitizenSession {
    CitizenSession::new("9876500001")
}

pub(super) fn form() -> ScholarshipForm {
    ScholarshipForm {
        student_name: "Asha Kumari".to_string(),
        course: "B.Sc. Physics".to_string(),
        grade_percentage: 87.5,
        family_income: 240_000.0,
        purpose: "Tuition and hostel fees".to_string(),
    }
}

pub(super) fn ineligible_form() -> ScholarshipForm {
    ScholarshipForm {
        grade_percentage: 40.0,
        family_income: 900_000.0,
        ..form()
    }
}

pub(super) fn upload(name: &str, content_type: &str, content: &[u8]) -> MarkSheetUpload {
    MarkSheetUpload {
        name: name.to_string(),
        content_type: content_type.to_string(),
        content: content.to_vec(),
    }
}

/// Fully populated record with a fixed timestamp for view assertions.
pub(super) fn stored_application(eligible: bool) -> ScholarshipApplication {
    let applied_at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 45).unwrap();
    let eligibility = if eligible {
        EligibilityVerdict {
            eligible: true,
            suggestions: vec![
                "Merit Scholarship (85%+ grades)".to_string(),
                "Need-Based Scholarship (Family income ≤ ₹2.5L)".to_string(),
            ],
            reason: String::new(),
        }
    } else {
        EligibilityVerdict {
            eligible: false,
            suggestions: Vec::new(),
            reason: "Family income exceeds eligibility threshold (₹8L/year)".to_string(),
        }
    };

    ScholarshipApplication {
        id: ApplicationId("SA1757000000000-0001".to_string()),
        user_id: "9876500001".to_string(),
        student_name: "Asha Kumari".to_string(),
        course: "B.Sc. Physics".to_string(),
        grade_percentage: 87.5,
        family_income: 240_000.0,
        purpose: "Tuition and hostel fees".to_string(),
        mark_sheets: vec![
            MarkSheet {
                name: "semester-1.png".to_string(),
                data: "data:image/png;base64,aGVsbG8=".to_string(),
                uploaded_at: applied_at,
            },
            MarkSheet {
                name: "transcript.pdf".to_string(),
                data: "data:application/pdf;base64,aGVsbG8=".to_string(),
                uploaded_at: applied_at,
            },
        ],
        eligibility,
        status: if eligible {
            ScholarshipStatus::UnderReview
        } else {
            ScholarshipStatus::NotEligible
        },
        applied_at,
    }
}

#[derive(Default)]
pub(super) struct MemoryActivityLog {
    events: Mutex<Vec<(String, Value)>>,
}

impl MemoryActivityLog {
    pub(super) fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().expect("activity mutex poisoned").clone()
    }
}

impl ActivityLog for MemoryActivityLog {
    fn record(&self, event: &str, payload: Value) {
        self.events
            .lock()
            .expect("activity mutex poisoned")
            .push((event.to_string(), payload));
    }
}

#[derive(Clone, Copy)]
pub(super) enum SheetMode {
    Accept,
    Reject,
    Fail,
}

pub(super) struct RecordingSheets {
    mode: SheetMode,
    scholarship_syncs: Mutex<Vec<String>>,
}

impl RecordingSheets {
    pub(super) fn new(mode: SheetMode) -> Self {
        Self {
            mode,
            scholarship_syncs: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn scholarship_syncs(&self) -> Vec<String> {
        self.scholarship_syncs
            .lock()
            .expect("sheet mutex poisoned")
            .clone()
    }

    fn receipt(&self) -> Result<SyncReceipt, SyncError> {
        match self.mode {
            SheetMode::Accept => Ok(SyncReceipt::ok()),
            SheetMode::Reject => Ok(SyncReceipt::rejected("sheet quota exceeded")),
            SheetMode::Fail => Err(SyncError::Transport("sheet endpoint offline".to_string())),
        }
    }
}

impl SheetSync for RecordingSheets {
    fn sync_scholarship(
        &self,
        record: &ScholarshipApplication,
    ) -> Result<SyncReceipt, SyncError> {
        self.scholarship_syncs
            .lock()
            .expect("sheet mutex poisoned")
            .push(record.id.0.clone());
        self.receipt()
    }

    fn sync_scheme_application(
        &self,
        _record: &SchemeApplication,
    ) -> Result<SyncReceipt, SyncError> {
        self.receipt()
    }
}

pub(super) fn build_service() -> (
    Arc<ScholarshipService<MemoryStore, MemoryActivityLog>>,
    Arc<MemoryStore>,
    Arc<MemoryActivityLog>,
) {
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(MemoryActivityLog::default());
    let service = Arc::new(ScholarshipService::new(
        store.clone(),
        activity.clone(),
        None,
    ));
    (service, store, activity)
}

pub(super) fn build_service_with_sheets(
    sheets: Arc<RecordingSheets>,
) -> Arc<ScholarshipService<MemoryStore, MemoryActivityLog>> {
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(MemoryActivityLog::default());
    Arc::new(ScholarshipService::new(store, activity, Some(sheets)))
}
