use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::portal::activity::ActivityLog;
use crate::portal::session::CitizenSession;
use crate::store::KeyValueStore;

use super::service::{SchemeApplicationService, SchemeServiceError};
use super::views::{SchemeApplicationView, SchemeSummaryView};

/// Router exposing scheme application intake and the citizen summary screen.
pub fn scheme_router<S, L>(service: Arc<SchemeApplicationService<S, L>>) -> Router
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    Router::new()
        .route("/api/v1/scheme-applications", post(apply_handler::<S, L>))
        .route(
            "/api/v1/citizens/:phone/scheme-applications",
            get(summary_handler::<S, L>),
        )
        .route("/api/v1/schemes", get(schemes_handler::<S, L>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySchemeRequest {
    pub applicant_phone: String,
    pub scheme_id: String,
}

pub(crate) async fn apply_handler<S, L>(
    State(service): State<Arc<SchemeApplicationService<S, L>>>,
    axum::Json(request): axum::Json<ApplySchemeRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    let session = CitizenSession::new(request.applicant_phone);
    match service.apply(&session, &request.scheme_id) {
        Ok(application) => {
            let view = SchemeApplicationView::from_application(&application);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(err @ SchemeServiceError::AlreadyApplied) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<S, L>(
    State(service): State<Arc<SchemeApplicationService<S, L>>>,
    Path(phone): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    let session = CitizenSession::new(phone);
    match service.list_for_user(&session) {
        Ok(applications) => {
            let payload = json!({
                "summary": SchemeSummaryView::from_applications(&applications),
                "applications": applications
                    .iter()
                    .map(SchemeApplicationView::from_application)
                    .collect::<Vec<_>>(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn schemes_handler<S, L>(
    State(service): State<Arc<SchemeApplicationService<S, L>>>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    match service.schemes() {
        Ok(schemes) => (StatusCode::OK, axum::Json(schemes)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
