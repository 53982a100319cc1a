use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::portal::activity::ActivityLog;
use crate::portal::session::CitizenSession;
use crate::store::KeyValueStore;

use super::attachments::MarkSheetUpload;
use super::domain::ApplicationId;
use super::service::{ScholarshipForm, ScholarshipService, ScholarshipServiceError};
use super::views::{
    ApplicationCardView, ApplicationDetailView, ApplicationListView, MarkSheetGalleryView,
    MARK_SHEETS_MISSING_MESSAGE,
};

/// Router exposing scholarship intake and the list/detail/gallery screens.
pub fn scholarship_router<S, L>(service: Arc<ScholarshipService<S, L>>) -> Router
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/scholarship-applications",
            post(submit_handler::<S, L>),
        )
        .route(
            "/api/v1/scholarship-applications/:application_id",
            get(detail_handler::<S, L>),
        )
        .route(
            "/api/v1/scholarship-applications/:application_id/mark-sheets",
            get(mark_sheets_handler::<S, L>),
        )
        .route(
            "/api/v1/citizens/:phone/scholarship-applications",
            get(list_handler::<S, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScholarshipRequest {
    pub applicant_phone: String,
    pub student_name: String,
    pub course: String,
    pub grade_percentage: f64,
    pub family_income: f64,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub mark_sheets: Vec<MarkSheetUploadRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSheetUploadRequest {
    pub name: String,
    pub content_type: String,
    /// Raw file bytes, base64-encoded for transport.
    pub content_base64: String,
}

pub(crate) async fn submit_handler<S, L>(
    State(service): State<Arc<ScholarshipService<S, L>>>,
    axum::Json(request): axum::Json<SubmitScholarshipRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    let mut uploads = Vec::with_capacity(request.mark_sheets.len());
    for sheet in request.mark_sheets {
        match STANDARD.decode(sheet.content_base64.as_bytes()) {
            Ok(content) => uploads.push(MarkSheetUpload {
                name: sheet.name,
                content_type: sheet.content_type,
                content,
            }),
            Err(err) => {
                let payload = json!({
                    "error": format!("mark sheet '{}' is not valid base64: {err}", sheet.name),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
            }
        }
    }

    let session = CitizenSession::new(request.applicant_phone);
    let form = ScholarshipForm {
        student_name: request.student_name,
        course: request.course,
        grade_percentage: request.grade_percentage,
        family_income: request.family_income,
        purpose: request.purpose,
    };

    match service.submit(&session, form, uploads).await {
        Ok(application) => {
            let payload = json!({
                "application": ApplicationCardView::from_application(&application),
                "notice": super::views::submission_notice(&application),
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(err @ ScholarshipServiceError::InvalidSubmission(_))
        | Err(err @ ScholarshipServiceError::Attachment(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S, L>(
    State(service): State<Arc<ScholarshipService<S, L>>>,
    Path(phone): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    let session = CitizenSession::new(phone);
    match service.list_for_user(&session) {
        Ok(applications) => {
            let view = ApplicationListView::from_applications(&applications);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn detail_handler<S, L>(
    State(service): State<Arc<ScholarshipService<S, L>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    match service.detail(&ApplicationId(application_id)) {
        Ok(application) => {
            let view = ApplicationDetailView::from_application(&application);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScholarshipServiceError::NotFound) => {
            let payload = json!({ "error": "Application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn mark_sheets_handler<S, L>(
    State(service): State<Arc<ScholarshipService<S, L>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
    L: ActivityLog + 'static,
{
    match service.mark_sheets(&ApplicationId(application_id)) {
        Ok(application) => {
            let view = MarkSheetGalleryView::from_application(&application);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScholarshipServiceError::NotFound) => {
            let payload = json!({ "error": MARK_SHEETS_MISSING_MESSAGE });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
