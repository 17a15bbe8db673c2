//! Mentorship request handlers for both sides of the request.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{RequestView, SentRequestView};
use crate::errors::AppResult;
use crate::types::RequestDecisionResponse;

/// Mentee asks a mentor for mentorship
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    pub mentor_id: Uuid,
    #[validate(length(min = 1, message = "Message is required"))]
    #[schema(example = "I'd love guidance on moving into finance.")]
    pub message: String,
}

/// Mentor's optional reply when accepting or declining
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RespondRequest {
    #[schema(example = "Welcome aboard!")]
    pub response: Option<String>,
}

/// Routes under `/mentor-requests` (requires auth middleware to be applied)
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/:id/accept", patch(accept_request))
        .route("/:id/reject", patch(reject_request))
}

/// Routes under `/mentee` (requires auth middleware to be applied)
pub fn mentee_routes() -> Router<AppState> {
    Router::new().route("/requests", get(list_sent_requests))
}

/// Send a mentorship request to an approved mentor
#[utoipa::path(
    post,
    path = "/mentor-requests",
    tag = "Mentor Requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequestRequest,
    responses(
        (status = 200, description = "Request sent", body = RequestDecisionResponse),
        (status = 400, description = "Validation error or request already sent"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only mentees can send requests"),
        (status = 404, description = "Mentor not found or not approved")
    )
)]
pub async fn create_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRequestRequest>,
) -> AppResult<Json<RequestDecisionResponse>> {
    let transition = state
        .request_service
        .create(current_user.id, payload.mentor_id, payload.message)
        .await?;

    Ok(Json(RequestDecisionResponse::new(
        "Request sent successfully",
        transition,
    )))
}

/// Requests for the caller: received ones for mentors, sent ones for mentees
#[utoipa::path(
    get,
    path = "/mentor-requests",
    tag = "Mentor Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requests visible to the caller", body = Vec<RequestView>),
        (status = 400, description = "Invalid role"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_requests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RequestView>>> {
    let requests = state.request_service.list_for_actor(current_user.id).await?;
    Ok(Json(requests))
}

/// Accept a pending request addressed to the caller
#[utoipa::path(
    patch,
    path = "/mentor-requests/{id}/accept",
    tag = "Mentor Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body(content = RespondRequest, description = "Optional reply to the mentee"),
    responses(
        (status = 200, description = "Request accepted", body = RequestDecisionResponse),
        (status = 400, description = "Request already processed or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a mentor or not the addressee"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn accept_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    payload: Option<Json<RespondRequest>>,
) -> AppResult<Json<RequestDecisionResponse>> {
    let response = payload.and_then(|Json(body)| body.response);
    let transition = state
        .request_service
        .accept(id, current_user.id, response)
        .await?;

    Ok(Json(RequestDecisionResponse::new(
        "Request accepted successfully",
        transition,
    )))
}

/// Decline a pending request addressed to the caller
#[utoipa::path(
    patch,
    path = "/mentor-requests/{id}/reject",
    tag = "Mentor Requests",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body(content = RespondRequest, description = "Optional reply to the mentee"),
    responses(
        (status = 200, description = "Request declined", body = RequestDecisionResponse),
        (status = 400, description = "Request already processed or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a mentor or not the addressee"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    payload: Option<Json<RespondRequest>>,
) -> AppResult<Json<RequestDecisionResponse>> {
    let response = payload.and_then(|Json(body)| body.response);
    let transition = state
        .request_service
        .reject(id, current_user.id, response)
        .await?;

    Ok(Json(RequestDecisionResponse::new(
        "Request declined successfully",
        transition,
    )))
}

/// Mentee dashboard: sent requests with the mentor's profile summary
#[utoipa::path(
    get,
    path = "/mentee/requests",
    tag = "Mentor Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requests sent by the caller", body = Vec<SentRequestView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Mentee access required")
    )
)]
pub async fn list_sent_requests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SentRequestView>>> {
    let requests = state
        .request_service
        .list_for_mentee(current_user.id)
        .await?;

    Ok(Json(requests))
}
