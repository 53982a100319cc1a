use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast;
use tracing::debug;

use crate::portal::activity::ActivityLog;
use crate::portal::scheme::service::{SchemeApplicationService, SchemeServiceError};
use crate::portal::scheme::views::SchemeSummaryView;
use crate::portal::scholarship::service::{ScholarshipService, ScholarshipServiceError};
use crate::portal::scholarship::views::ApplicationListView;
use crate::portal::session::CitizenSession;
use crate::store::{KeyValueStore, StoreChange};

/// Screens the citizen dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    ScholarshipApplications,
    SchemeSummary,
}

/// Rendered contents of the active screen.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardSnapshot {
    Idle,
    ScholarshipApplications { applications: ApplicationListView },
    SchemeSummary { summary: SchemeSummaryView },
}

struct DashboardState {
    session: Option<CitizenSession>,
    view: DashboardView,
}

/// Tracks which screen is active and rebuilds it from the store on demand.
///
/// There is no diffing: every render rebuilds the whole active screen from
/// collection contents, and every change notification triggers a render no
/// matter which key changed.
pub struct Dashboard<S, L> {
    scholarships: Arc<ScholarshipService<S, L>>,
    schemes: Arc<SchemeApplicationService<S, L>>,
    state: Mutex<DashboardState>,
}

impl<S, L> Dashboard<S, L>
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    pub fn new(
        scholarships: Arc<ScholarshipService<S, L>>,
        schemes: Arc<SchemeApplicationService<S, L>>,
    ) -> Self {
        Self {
            scholarships,
            schemes,
            state: Mutex::new(DashboardState {
                session: None,
                view: DashboardView::ScholarshipApplications,
            }),
        }
    }

    /// Switch the active screen for a citizen session.
    pub fn activate(&self, session: CitizenSession, view: DashboardView) {
        let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());
        state.session = Some(session);
        state.view = view;
    }

    /// Rebuild the active screen from the store.
    pub fn render(&self) -> Result<DashboardSnapshot, DashboardError> {
        let (session, view) = {
            let state = self.state.lock().unwrap_or_else(|err| err.into_inner());
            (state.session.clone(), state.view)
        };
        let Some(session) = session else {
            return Ok(DashboardSnapshot::Idle);
        };

        match view {
            DashboardView::ScholarshipApplications => {
                let applications = self.scholarships.list_for_user(&session)?;
                Ok(DashboardSnapshot::ScholarshipApplications {
                    applications: ApplicationListView::from_applications(&applications),
                })
            }
            DashboardView::SchemeSummary => {
                let applications = self.schemes.list_for_user(&session)?;
                Ok(DashboardSnapshot::SchemeSummary {
                    summary: SchemeSummaryView::from_applications(&applications),
                })
            }
        }
    }

    /// React to one store change: whatever key changed, the active screen
    /// re-renders in full.
    pub fn handle_change(&self, change: &StoreChange) -> Result<DashboardSnapshot, DashboardError> {
        debug!(key = %change.key, "store changed, re-rendering active dashboard view");
        self.render()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Scholarship(#[from] ScholarshipServiceError),
    #[error(transparent)]
    Scheme(#[from] SchemeServiceError),
}

/// Background task re-rendering the active screen on every store change.
pub async fn watch<S, L>(
    dashboard: Arc<Dashboard<S, L>>,
    mut changes: broadcast::Receiver<StoreChange>,
) where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    loop {
        match changes.recv().await {
            Ok(change) => {
                if let Err(err) = dashboard.handle_change(&change) {
                    debug!(%err, "dashboard re-render failed");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "dashboard listener lagged behind store changes");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Router exposing the dashboard screen state.
pub fn dashboard_router<S, L>(dashboard: Arc<Dashboard<S, L>>) -> Router
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(render_handler::<S, L>))
        .route("/api/v1/dashboard/view", put(activate_handler::<S, L>))
        .with_state(dashboard)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateViewRequest {
    pub phone: String,
    pub view: DashboardView,
}

pub(crate) async fn render_handler<S, L>(
    State(dashboard): State<Arc<Dashboard<S, L>>>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    match dashboard.render() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn activate_handler<S, L>(
    State(dashboard): State<Arc<Dashboard<S, L>>>,
    axum::Json(request): axum::Json<ActivateViewRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    dashboard.activate(CitizenSession::new(request.phone), request.view);
    match dashboard.render() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::activity::ActivityLog;
    use crate::portal::scholarship::ScholarshipForm;
    use crate::store::MemoryStore;
    use serde_json::Value;

    #[derive(Default)]
    struct NullActivity;

    impl ActivityLog for NullActivity {
        fn record(&self, _event: &str, _payload: Value) {}
    }

    fn build() -> (
        Arc<MemoryStore>,
        Arc<ScholarshipService<MemoryStore, NullActivity>>,
        Arc<Dashboard<MemoryStore, NullActivity>>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let activity = Arc::new(NullActivity);
        let scholarships = Arc::new(ScholarshipService::new(
            store.clone(),
            activity.clone(),
            None,
        ));
        let schemes = Arc::new(SchemeApplicationService::new(store.clone(), activity, None));
        let dashboard = Arc::new(Dashboard::new(scholarships.clone(), schemes));
        (store, scholarships, dashboard)
    }

    fn form() -> ScholarshipForm {
        ScholarshipForm {
            student_name: "Asha Kumari".to_string(),
            course: "B.Sc. Physics".to_string(),
            grade_percentage: 91.0,
            family_income: 180_000.0,
            purpose: "Tuition".to_string(),
        }
    }

    #[test]
    fn renders_idle_before_activation() {
        let (_, _, dashboard) = build();
        assert!(matches!(
            dashboard.render().expect("render"),
            DashboardSnapshot::Idle
        ));
    }

    #[tokio::test]
    async fn change_notification_rerenders_active_view() {
        let (store, scholarships, dashboard) = build();
        dashboard.activate(
            CitizenSession::new("9876500001"),
            DashboardView::ScholarshipApplications,
        );

        let mut changes = store.subscribe();
        scholarships
            .submit(&CitizenSession::new("9876500001"), form(), Vec::new())
            .await
            .expect("submit");

        let change = changes.try_recv().expect("change delivered");
        let snapshot = dashboard.handle_change(&change).expect("re-render");

        match snapshot {
            DashboardSnapshot::ScholarshipApplications { applications } => {
                assert_eq!(applications.cards.len(), 1);
                assert_eq!(applications.cards[0].student_name, "Asha Kumari");
            }
            other => panic!("expected scholarship screen, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rerender_is_scoped_to_the_active_session() {
        let (store, scholarships, dashboard) = build();
        dashboard.activate(
            CitizenSession::new("9876500002"),
            DashboardView::ScholarshipApplications,
        );

        let mut changes = store.subscribe();
        scholarships
            .submit(&CitizenSession::new("9876500001"), form(), Vec::new())
            .await
            .expect("submit");

        let change = changes.try_recv().expect("change delivered");
        let snapshot = dashboard.handle_change(&change).expect("re-render");

        match snapshot {
            DashboardSnapshot::ScholarshipApplications { applications } => {
                assert!(applications.is_empty());
            }
            other => panic!("expected scholarship screen, got {other:?}"),
        }
    }
}
