use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use crate::portal::activity::ActivityLog;
use crate::portal::ids::IdGenerator;
use crate::portal::session::CitizenSession;
use crate::portal::sheets::SheetSync;
use crate::store::{Collection, KeyValueStore, StoreError, SCHEMES, SCHEME_APPLICATIONS};

use super::domain::{Scheme, SchemeApplication, SchemeApplicationId, SchemeApplicationStatus};

const UNKNOWN_SCHEME_NAME: &str = "Unknown";

/// Service handling scheme applications and catalog reads.
pub struct SchemeApplicationService<S, L> {
    applications: Collection<SchemeApplication, S>,
    schemes: Collection<Scheme, S>,
    activity: Arc<L>,
    sheets: Option<Arc<dyn SheetSync>>,
    ids: IdGenerator,
}

impl<S, L> SchemeApplicationService<S, L>
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    pub fn new(store: Arc<S>, activity: Arc<L>, sheets: Option<Arc<dyn SheetSync>>) -> Self {
        Self {
            applications: Collection::new(store.clone(), SCHEME_APPLICATIONS),
            schemes: Collection::new(store, SCHEMES),
            activity,
            sheets,
            ids: IdGenerator::new("APP"),
        }
    }

    /// Apply for a scheme.
    ///
    /// A citizen holds at most one application per scheme; repeats are
    /// rejected before anything is written. The scheme name is snapshotted
    /// from the catalog, falling back to `Unknown` when the catalog has no
    /// matching entry.
    pub fn apply(
        &self,
        session: &CitizenSession,
        scheme_id: &str,
    ) -> Result<SchemeApplication, SchemeServiceError> {
        let duplicate = self.applications.find_first(|app| {
            app.user_id == session.user_id() && app.scheme_id == scheme_id
        })?;
        if duplicate.is_some() {
            return Err(SchemeServiceError::AlreadyApplied);
        }

        let scheme_name = self
            .schemes
            .find_by_id(scheme_id)?
            .map(|scheme| scheme.name)
            .unwrap_or_else(|| UNKNOWN_SCHEME_NAME.to_string());

        let application = SchemeApplication {
            id: SchemeApplicationId(self.ids.next()),
            user_id: session.user_id().to_string(),
            scheme_id: scheme_id.to_string(),
            scheme_name,
            status: SchemeApplicationStatus::Pending,
            applied_at: Utc::now(),
        };

        self.applications.append(application.clone())?;

        self.activity.record(
            "scheme_applied",
            json!({
                "applicationId": application.id.0,
                "userId": application.user_id,
                "schemeId": application.scheme_id,
            }),
        );

        if let Some(sheets) = &self.sheets {
            match sheets.sync_scheme_application(&application) {
                Ok(receipt) if receipt.success => {
                    debug!(id = %application.id.0, "scheme application synced to sheet");
                }
                Ok(receipt) => warn!(
                    id = %application.id.0,
                    reason = receipt.reason.as_deref().unwrap_or("unspecified"),
                    "sheet sync rejected scheme application"
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
    ) -> Result<Vec<SchemeApplication>, SchemeServiceError> {
        Ok(self
            .applications
            .find_by(|app| app.user_id == session.user_id())?)
    }

    pub fn schemes(&self) -> Result<Vec<Scheme>, SchemeServiceError> {
        Ok(self.schemes.list_all()?)
    }

    /// Catalog seeding entry for demos and tests.
    pub fn add_scheme(&self, scheme: Scheme) -> Result<(), SchemeServiceError> {
        Ok(self.schemes.append(scheme)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemeServiceError {
    #[error("You have already applied for this scheme")]
    AlreadyApplied,
    #[error(transparent)]
    Store(#[from] StoreError),
}
