//! Admin review of mentor applications.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::{ValidatedPath, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ApplicationStatus, ApplicationView};
use crate::errors::AppResult;
use crate::types::ApplicationDecisionResponse;

/// Optional status filter for the application list
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationQuery {
    /// PENDING, APPROVED or REJECTED
    pub status: Option<ApplicationStatus>,
}

/// Create admin routes (requires auth middleware to be applied)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications))
        .route("/:id/approve", patch(approve_application))
        .route("/:id/reject", patch(reject_application))
}

/// List mentor applications, newest first
#[utoipa::path(
    get,
    path = "/admin/mentor-applications",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Mentor applications", body = Vec<ApplicationView>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ApplicationQuery>,
) -> AppResult<Json<Vec<ApplicationView>>> {
    let applications = state
        .application_service
        .list(current_user.id, query.status)
        .await?;

    Ok(Json(applications))
}

/// Approve a pending application and promote the applicant
#[utoipa::path(
    patch,
    path = "/admin/mentor-applications/{id}/approve",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application approved", body = ApplicationDecisionResponse),
        (status = 400, description = "Application already processed or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn approve_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<ApplicationDecisionResponse>> {
    let transition = state
        .application_service
        .approve(id, current_user.id)
        .await?;

    Ok(Json(ApplicationDecisionResponse::new(
        "Application approved successfully",
        transition,
    )))
}

/// Reject a pending application
#[utoipa::path(
    patch,
    path = "/admin/mentor-applications/{id}/reject",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application rejected", body = ApplicationDecisionResponse),
        (status = 400, description = "Application already processed or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn reject_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<ApplicationDecisionResponse>> {
    let transition = state
        .application_service
        .reject(id, current_user.id)
        .await?;

    Ok(Json(ApplicationDecisionResponse::new(
        "Application rejected successfully",
        transition,
    )))
}
