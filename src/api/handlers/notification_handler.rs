//! Notification inbox handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedPath;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Notification;
use crate::errors::AppResult;
use crate::types::MessageResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    #[schema(example = "All notifications marked as read")]
    pub message: String,
    /// Notifications that were unread before the call
    pub updated: u64,
}

/// Create notification routes (requires auth middleware to be applied)
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", patch(mark_all_read))
        .route("/:id/read", patch(mark_read))
}

/// The caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_notifications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.notification_service.list(current_user.id).await?;
    Ok(Json(notifications))
}

/// Number of unread notifications
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn unread_count(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state
        .notification_service
        .unread_count(current_user.id)
        .await?;

    Ok(Json(UnreadCountResponse { count }))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    patch,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = MessageResponse),
        (status = 400, description = "Malformed notification ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state
        .notification_service
        .mark_read(id, current_user.id)
        .await?;

    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// Mark every notification of the caller as read
#[utoipa::path(
    patch,
    path = "/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All notifications marked as read", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn mark_all_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = state
        .notification_service
        .mark_all_read(current_user.id)
        .await?;

    Ok(Json(MarkAllReadResponse {
        message: "All notifications marked as read".to_string(),
        updated,
    }))
}
