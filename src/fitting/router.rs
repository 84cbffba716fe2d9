use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{BodyProfile, MeasurementSet};
use super::profiles::ProfileRepository;
use super::service::{FittingService, FittingServiceError, ProfileSaveRequest};

#[derive(Debug, Deserialize)]
pub(crate) struct FitPreviewRequest {
    #[serde(default)]
    measurements: MeasurementSet,
    #[serde(default)]
    body: BodyProfile,
}

/// Router builder exposing the fit preview and profile CRUD endpoints.
pub fn fitting_router<P>(service: Arc<FittingService<P>>) -> Router
where
    P: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/fit/preview", post(preview_handler::<P>))
        .route(
            "/api/v1/fit/profiles",
            put(save_profile_handler::<P>).get(list_profiles_handler::<P>),
        )
        .route(
            "/api/v1/fit/profiles/:name",
            get(get_profile_handler::<P>).delete(remove_profile_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn preview_handler<P>(
    State(service): State<Arc<FittingService<P>>>,
    axum::Json(request): axum::Json<FitPreviewRequest>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let preview = service.preview(&request.measurements, &request.body);
    (StatusCode::OK, axum::Json(preview)).into_response()
}

pub(crate) async fn save_profile_handler<P>(
    State(service): State<Arc<FittingService<P>>>,
    axum::Json(request): axum::Json<ProfileSaveRequest>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    match service.save_profile(request, Utc::now()) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_profiles_handler<P>(
    State(service): State<Arc<FittingService<P>>>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    match service.profiles() {
        Ok(profiles) => (StatusCode::OK, axum::Json(profiles)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_profile_handler<P>(
    State(service): State<Arc<FittingService<P>>>,
    Path(name): Path<String>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    match service.profile(&name) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_profile_handler<P>(
    State(service): State<Arc<FittingService<P>>>,
    Path(name): Path<String>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    match service.remove_profile(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: FittingServiceError) -> Response {
    let status = match &error {
        FittingServiceError::OutOfRange { .. } | FittingServiceError::UnnamedProfile => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FittingServiceError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        FittingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
