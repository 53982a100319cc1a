use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::portal::activity::ActivityLog;
use crate::portal::scheme::domain::{
    Scheme, SchemeApplication, SchemeApplicationId, SchemeApplicationStatus,
};
use crate::portal::scheme::service::SchemeApplicationService;
use crate::portal::scholarship::domain::ScholarshipApplication;
use crate::portal::session::CitizenSession;
use crate::portal::sheets::{SheetSync, SyncError, SyncReceipt};
use crate::store::MemoryStore;

pub(super) fn session() -> CitizenSession {
    CitizenSession::new("9876500001")
}

pub(super) fn catalog() -> Vec<Scheme> {
    vec![
        Scheme {
            id: "pmay".to_string(),
            name: "Pradhan Mantri Awas Yojana".to_string(),
            description: "Housing assistance".to_string(),
        },
        Scheme {
            id: "ayushman".to_string(),
            name: "Ayushman Bharat".to_string(),
            description: "Health coverage".to_string(),
        },
    ]
}

pub(super) fn application(status: SchemeApplicationStatus, suffix: &str) -> SchemeApplication {
    SchemeApplication {
        id: SchemeApplicationId(format!("APP1757000000000-{suffix}")),
        user_id: "9876500001".to_string(),
        scheme_id: "pmay".to_string(),
        scheme_name: "Pradhan Mantri Awas Yojana".to_string(),
        status,
        applied_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 45).unwrap(),
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

#[derive(Default)]
pub(super) struct RecordingSheets {
    scheme_syncs: Mutex<Vec<String>>,
}

impl RecordingSheets {
    pub(super) fn scheme_syncs(&self) -> Vec<String> {
        self.scheme_syncs.lock().expect("sheet mutex poisoned").clone()
    }
}

impl SheetSync for RecordingSheets {
    fn sync_scholarship(
        &self,
        _record: &ScholarshipApplication,
    ) -> Result<SyncReceipt, SyncError> {
        Ok(SyncReceipt::ok())
    }

    fn sync_scheme_application(
        &self,
        record: &SchemeApplication,
    ) -> Result<SyncReceipt, SyncError> {
        self.scheme_syncs
            .lock()
            .expect("sheet mutex poisoned")
            .push(record.id.0.clone());
        Ok(SyncReceipt::ok())
    }
}

pub(super) fn build_service() -> (
    Arc<SchemeApplicationService<MemoryStore, MemoryActivityLog>>,
    Arc<MemoryActivityLog>,
) {
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(MemoryActivityLog::default());
    let service = Arc::new(SchemeApplicationService::new(store, activity.clone(), None));
    for scheme in catalog() {
        service.add_scheme(scheme).expect("seed catalog");
    }
    (service, activity)
}

pub(super) fn build_service_with_sheets(
    sheets: Arc<RecordingSheets>,
) -> Arc<SchemeApplicationService<MemoryStore, MemoryActivityLog>> {
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(MemoryActivityLog::default());
    let service = Arc::new(SchemeApplicationService::new(
        store,
        activity,
        Some(sheets),
    ));
    for scheme in catalog() {
        service.add_scheme(scheme).expect("seed catalog");
    }
    service
}
