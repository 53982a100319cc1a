use serde::{Deserialize, Serialize};

use crate::portal::scheme::domain::SchemeApplication;
use crate::portal::scholarship::domain::ScholarshipApplication;

/// Result reported by a spreadsheet bridge for one synced record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReceipt {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SyncReceipt {
    pub fn ok() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Transport failure while reaching the remote sheet.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("sheet transport unavailable: {0}")]
    Transport(String),
}

/// Optional outbound bridge mirroring committed records to a remote sheet.
///
/// Services hold this as a nullable capability (`Option<Arc<dyn SheetSync>>`)
/// rather than probing for it ambiently. Sync runs after the local record is
/// committed; rejections and transport failures are logged, never surfaced to
/// the citizen, and never retried.
pub trait SheetSync: Send + Sync {
    fn sync_scholarship(&self, record: &ScholarshipApplication) -> Result<SyncReceipt, SyncError>;
    fn sync_scheme_application(
        &self,
        record: &SchemeApplication,
    ) -> Result<SyncReceipt, SyncError>;
}
